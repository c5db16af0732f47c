//! Configuration type definitions.

use serde::{Deserialize, Serialize};

/// Editor interaction settings.
///
/// Distances are in pixels; they are squared before being compared against
/// squared hit-test scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Maximum distance from a vertex for a Ctrl+click to start dragging it (valid range: 2.0 - 64.0)
    #[serde(default = "default_selection_radius")]
    pub selection_radius: f64,

    /// Maximum distance from a shape's outline for Ctrl+Shift+click to delete it (valid range: 2.0 - 64.0)
    #[serde(default = "default_delete_tolerance")]
    pub delete_tolerance: f64,

    /// Stroke half-width used to draw shapes (valid range: 0 - 10)
    #[serde(default = "default_stroke_thickness")]
    pub stroke_thickness: i32,

    /// While dragging a triangle or quadrilateral, re-pick the vertex nearest the
    /// pointer on every motion instead of keeping the one grabbed at drag start
    #[serde(default = "default_drag_magnet")]
    pub drag_magnet: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            selection_radius: default_selection_radius(),
            delete_tolerance: default_delete_tolerance(),
            stroke_thickness: default_stroke_thickness(),
            drag_magnet: default_drag_magnet(),
        }
    }
}

/// Initial window sizes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Editor and viewer window width (valid range: 320 - 4096)
    #[serde(default = "default_editor_width")]
    pub editor_width: u32,

    #[serde(default = "default_editor_height")]
    pub editor_height: u32,

    /// GUI terminal window width (valid range: 320 - 4096)
    #[serde(default = "default_terminal_width")]
    pub terminal_width: u32,

    #[serde(default = "default_terminal_height")]
    pub terminal_height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            editor_width: default_editor_width(),
            editor_height: default_editor_height(),
            terminal_width: default_terminal_width(),
            terminal_height: default_terminal_height(),
        }
    }
}

/// Command shell settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellConfig {
    /// File scraped for `help` output; a leading `~/` is expanded to the home directory
    #[serde(default = "default_commands_file")]
    pub commands_file: String,

    /// Open the GUI terminal window instead of the plain stdin loop
    #[serde(default = "default_prefer_gui")]
    pub prefer_gui: bool,

    /// Maximum number of output lines the GUI terminal keeps (valid range: 50 - 100000)
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            commands_file: default_commands_file(),
            prefer_gui: default_prefer_gui(),
            history_limit: default_history_limit(),
        }
    }
}

/// Font used for every piece of UI text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontConfig {
    /// Font family name (e.g., "Sans", "Monospace", "JetBrains Mono")
    /// Pango substitutes a fallback if the family is not installed
    #[serde(default = "default_font_family")]
    pub family: String,

    /// Font weight (e.g., "normal", "bold", "light", 400, 700)
    #[serde(default = "default_font_weight")]
    pub weight: String,

    /// Font style (e.g., "normal", "italic", "oblique")
    #[serde(default = "default_font_style")]
    pub style: String,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: default_font_family(),
            weight: default_font_weight(),
            style: default_font_style(),
        }
    }
}

/// Performance tuning options.
///
/// These settings control rendering performance and smoothness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceConfig {
    /// Number of shared-memory buffers to allocate (valid range: 2 - 4)
    /// - 2 = double buffering (lower memory)
    /// - 3 = triple buffering (smoother under load)
    #[serde(default = "default_buffer_count")]
    pub buffer_count: u32,

    /// Pace redraws with compositor frame callbacks
    /// When false, windows redraw as soon as events arrive
    #[serde(default = "default_enable_vsync")]
    pub enable_vsync: bool,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            buffer_count: default_buffer_count(),
            enable_vsync: default_enable_vsync(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_selection_radius() -> f64 {
    12.0
}

fn default_delete_tolerance() -> f64 {
    14.0
}

fn default_stroke_thickness() -> i32 {
    2
}

fn default_drag_magnet() -> bool {
    true
}

fn default_editor_width() -> u32 {
    800
}

fn default_editor_height() -> u32 {
    600
}

fn default_terminal_width() -> u32 {
    1000
}

fn default_terminal_height() -> u32 {
    700
}

fn default_commands_file() -> String {
    "~/Atelier_lab/Programs/commands.json".to_string()
}

fn default_prefer_gui() -> bool {
    true
}

fn default_history_limit() -> usize {
    1000
}

fn default_font_family() -> String {
    "Sans".to_string()
}

fn default_font_weight() -> String {
    "normal".to_string()
}

fn default_font_style() -> String {
    "normal".to_string()
}

fn default_buffer_count() -> u32 {
    2
}

fn default_enable_vsync() -> bool {
    true
}
