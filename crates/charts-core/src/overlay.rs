// File: crates/charts-core/src/overlay.rs
// Summary: Overlay trait for annotations drawn after the series geometry (labels, mark
// points, mark lines), plus the helper that renders a batch of them in order.

use crate::error::Result;
use crate::painter::Painter;

/// Overlay collects positions while a chart lays out its series, then draws on top of
/// the finished geometry.
pub trait Overlay {
    fn id(&self) -> &'static str;
    fn render(&self, painter: &mut Painter) -> Result<()>;
}

/// Renders overlays in list order; the first error aborts the rest.
pub fn render_overlays(painter: &mut Painter, overlays: &[&dyn Overlay]) -> Result<()> {
    for overlay in overlays {
        tracing::trace!(overlay = overlay.id(), "render overlay");
        overlay.render(painter)?;
    }
    Ok(())
}
