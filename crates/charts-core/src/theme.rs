// File: crates/charts-core/src/theme.rs
// Summary: Named color palettes (light/dark/grafana/ant) for axes, text and series.

use crate::style::Color;

pub const THEME_LIGHT: &str = "light";
pub const THEME_DARK: &str = "dark";
pub const THEME_GRAFANA: &str = "grafana";
pub const THEME_ANT: &str = "ant";

const DEFAULT_FONT_SIZE: f64 = 12.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    pub name: String,
    pub is_dark: bool,
    pub axis_stroke_color: Color,
    pub axis_split_line_color: Color,
    pub background_color: Color,
    pub text_color: Color,
    pub series_colors: Vec<Color>,
    pub font_size: f64,
}

fn echarts_palette() -> Vec<Color> {
    vec![
        Color::rgb(84, 112, 198),
        Color::rgb(145, 204, 117),
        Color::rgb(250, 200, 88),
        Color::rgb(238, 102, 102),
        Color::rgb(115, 192, 222),
        Color::rgb(59, 162, 114),
        Color::rgb(252, 132, 82),
        Color::rgb(154, 96, 180),
        Color::rgb(234, 124, 204),
    ]
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: THEME_LIGHT.to_string(),
            is_dark: false,
            axis_stroke_color: Color::rgb(110, 112, 121),
            axis_split_line_color: Color::rgb(224, 230, 242),
            background_color: Color::WHITE,
            text_color: Color::rgb(70, 70, 70),
            series_colors: echarts_palette(),
            font_size: DEFAULT_FONT_SIZE,
        }
    }

    pub fn dark() -> Self {
        Self {
            name: THEME_DARK.to_string(),
            is_dark: true,
            axis_stroke_color: Color::rgb(185, 184, 206),
            axis_split_line_color: Color::rgb(72, 71, 83),
            background_color: Color::rgb(16, 12, 42),
            text_color: Color::rgb(238, 238, 238),
            series_colors: echarts_palette(),
            font_size: DEFAULT_FONT_SIZE,
        }
    }

    pub fn grafana() -> Self {
        Self {
            name: THEME_GRAFANA.to_string(),
            is_dark: true,
            axis_stroke_color: Color::rgb(185, 184, 206),
            axis_split_line_color: Color::rgb(68, 67, 67),
            background_color: Color::rgb(31, 29, 29),
            text_color: Color::rgb(216, 217, 218),
            series_colors: vec![
                Color::rgb(126, 178, 109),
                Color::rgb(234, 184, 57),
                Color::rgb(110, 208, 224),
                Color::rgb(239, 132, 60),
                Color::rgb(226, 77, 66),
                Color::rgb(31, 120, 193),
                Color::rgb(112, 93, 160),
                Color::rgb(80, 134, 66),
            ],
            font_size: DEFAULT_FONT_SIZE,
        }
    }

    pub fn ant() -> Self {
        Self {
            name: THEME_ANT.to_string(),
            is_dark: false,
            axis_stroke_color: Color::rgb(110, 112, 121),
            axis_split_line_color: Color::rgb(224, 230, 242),
            background_color: Color::WHITE,
            text_color: Color::rgb(70, 70, 70),
            series_colors: vec![
                Color::rgb(91, 143, 249),
                Color::rgb(90, 216, 166),
                Color::rgb(93, 112, 146),
                Color::rgb(246, 189, 22),
                Color::rgb(111, 94, 249),
                Color::rgb(109, 200, 236),
                Color::rgb(148, 95, 185),
                Color::rgb(255, 152, 69),
            ],
            font_size: DEFAULT_FONT_SIZE,
        }
    }

    /// Series color for a render index, cycling through the palette.
    pub fn series_color(&self, index: usize) -> Color {
        if self.series_colors.is_empty() {
            return self.text_color;
        }
        self.series_colors[index % self.series_colors.len()]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

/// Return all built-in presets in a stable order.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark(), Theme::grafana(), Theme::ant()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_colors_cycle() {
        let theme = Theme::light();
        let n = theme.series_colors.len();
        assert_eq!(theme.series_color(0), Color::rgb(84, 112, 198));
        assert_eq!(theme.series_color(n + 1), theme.series_color(1));
    }

    #[test]
    fn preset_names_are_unique() {
        let names: Vec<String> = presets().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["light", "dark", "grafana", "ant"]);
    }
}
