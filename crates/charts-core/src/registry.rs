// File: crates/charts-core/src/registry.rs
// Summary: Explicit theme and font registry handed to the top-level render calls.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::warn;

use crate::error::{ChartError, Result};
use crate::text::FontFace;
use crate::theme::{presets, Theme, THEME_LIGHT};

pub const DEFAULT_FONT_FAMILY: &str = "sans-serif";

/// Themes and fonts available to a render. Populated once at construction with the
/// built-in themes and the default font; installs need `&mut self`, lookups only `&self`,
/// so a registry behind an `Arc` can serve renders on several threads.
#[derive(Clone, Debug)]
pub struct Registry {
    themes: HashMap<String, Arc<Theme>>,
    fonts: HashMap<String, Arc<FontFace>>,
    default_font: Arc<FontFace>,
}

impl Default for Registry {
    fn default() -> Self {
        let themes = presets()
            .into_iter()
            .map(|t| (t.name.clone(), Arc::new(t)))
            .collect();
        let default_font = Arc::new(FontFace::estimated(DEFAULT_FONT_FAMILY));
        let mut fonts = HashMap::new();
        fonts.insert(DEFAULT_FONT_FAMILY.to_string(), default_font.clone());
        Self { themes, fonts, default_font }
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn install_theme(&mut self, theme: Theme) {
        self.themes.insert(theme.name.clone(), Arc::new(theme));
    }

    pub fn try_theme(&self, name: &str) -> Result<Arc<Theme>> {
        self.themes
            .get(name)
            .cloned()
            .ok_or_else(|| ChartError::ThemeNotFound(name.to_string()))
    }

    /// Theme by name, falling back to the light theme for unknown or empty names.
    pub fn theme(&self, name: &str) -> Arc<Theme> {
        if let Some(theme) = self.themes.get(name) {
            return theme.clone();
        }
        if !name.is_empty() {
            warn!(theme = name, "theme is not registered, using light");
        }
        self.themes
            .get(THEME_LIGHT)
            .cloned()
            .unwrap_or_else(|| Arc::new(Theme::light()))
    }

    /// Parses and installs a TTF/OTF font under `family`.
    pub fn install_font(&mut self, family: &str, data: &[u8]) -> Result<Arc<FontFace>> {
        let face = FontFace::from_data(family, data)?;
        Ok(self.install_font_face(face))
    }

    pub fn install_font_face(&mut self, face: FontFace) -> Arc<FontFace> {
        let face = Arc::new(face);
        self.fonts.insert(face.family().to_string(), face.clone());
        face
    }

    pub fn try_font(&self, family: &str) -> Result<Arc<FontFace>> {
        self.fonts
            .get(family)
            .cloned()
            .ok_or_else(|| ChartError::FontNotFound(family.to_string()))
    }

    /// Font by family, falling back to the default font.
    pub fn font(&self, family: &str) -> Arc<FontFace> {
        if family.is_empty() {
            return self.default_font.clone();
        }
        match self.fonts.get(family) {
            Some(face) => face.clone(),
            None => {
                warn!(family, "font is not installed, using default font");
                self.default_font.clone()
            }
        }
    }

    /// Makes an installed family the fallback font.
    pub fn set_default_font(&mut self, family: &str) -> Result<()> {
        self.default_font = self.try_font(family)?;
        Ok(())
    }

    pub fn default_font(&self) -> Arc<FontFace> {
        self.default_font.clone()
    }
}
