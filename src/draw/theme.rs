//! Static styling shared by every window.

use super::color::Color;

/// Process-wide palette; built once and only read afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Clear color behind the editor and viewer scenes
    pub background: Color,
    /// Output panel fill
    pub panel: Color,
    /// Header bar fill
    pub panel_accent: Color,
    /// Input panel fill
    pub input_bg: Color,
    /// Outer input border
    pub input_border: Color,
    pub text_primary: Color,
    /// Placeholder and secondary labels
    pub text_secondary: Color,
    /// Idle shape-selector button
    pub button_bg: Color,
    /// Active shape-selector button
    pub button_active: Color,
    /// Terminal caret
    pub cursor: Color,
    /// Header gradient, top row
    pub header_top: Color,
    /// Header gradient, bottom row
    pub header_bottom: Color,
    /// Red close dot
    pub close_button: Color,
    /// Glyph drawn over the close dot
    pub close_glyph: Color,
    /// Blue pen dot that toggles the color panel
    pub pen_button: Color,
    /// Glyph drawn over the pen dot
    pub pen_glyph: Color,
    /// Editor color panel fill
    pub color_panel: Color,
    /// Marker for the last collected placement point
    pub placement_marker: Color,
}

impl Theme {
    /// Deep blue "dark ocean" palette.
    pub const fn dark_ocean() -> Self {
        Self {
            background: Color::rgb(8, 12, 18),
            panel: Color::new(14, 22, 35, 210),
            panel_accent: Color::new(18, 28, 44, 235),
            input_bg: Color::new(9, 14, 22, 230),
            input_border: Color::new(60, 120, 220, 180),
            text_primary: Color::rgb(236, 242, 252),
            text_secondary: Color::rgb(160, 176, 200),
            button_bg: Color::new(24, 42, 68, 220),
            button_active: Color::new(34, 62, 98, 240),
            cursor: Color::rgb(255, 255, 255),
            header_top: Color::new(18, 28, 44, 220),
            header_bottom: Color::new(12, 18, 28, 220),
            close_button: Color::rgb(235, 80, 80),
            close_glyph: Color::new(250, 230, 230, 230),
            pen_button: Color::new(90, 150, 255, 230),
            pen_glyph: Color::rgb(20, 30, 60),
            color_panel: Color::new(14, 22, 35, 230),
            placement_marker: Color::new(255, 255, 255, 200),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark_ocean()
    }
}
