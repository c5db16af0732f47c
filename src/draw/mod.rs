//! Rendering on a pixel surface (Cairo-backed in the application).
//!
//! This module defines the drawing layer used by every window:
//! - [`Color`]: RGBA color representation, predefined constants and the hue ramp
//! - [`Surface`]: the drawing-surface abstraction, implemented by [`CairoSurface`]
//! - [`primitives`]: thick strokes, circles, rounded panels, gradients, shadows
//! - [`render`]: shapes, layers and the window header
//! - [`Theme`]: the static palette

pub mod color;
pub mod font;
pub mod primitives;
pub mod render;
pub mod surface;
pub mod theme;

// Re-export commonly used types at module level
pub use color::{Color, hue_to_color};
pub use font::{FontDescriptor, FontError, ensure_font_available};
pub use render::{
    HEADER_HEIGHT, HeaderLayout, render_document, render_header, render_placement_marker,
    render_shape, render_shapes,
};
pub use surface::{CairoSurface, Surface};
pub use theme::Theme;
