//! Interactive shape editor.
//!
//! This module turns pointer and keyboard events into edits of a [`Document`]:
//! - Shift+click collects points for a new shape of the selected type
//! - Ctrl+click grabs the nearest vertex, which follows the pointer until release
//! - Ctrl+Shift+click deletes the shape closest to the click
//! - the header's pen button opens a color panel for picking hue and shape type
//!
//! [`EditorState`] holds the state machine; [`hit_test`] and [`layout`] supply
//! the geometry it decides with.
//!
//! [`Document`]: crate::document::Document

pub mod layout;
pub mod state;

// Re-export commonly used types at module level
pub use layout::{ColorPanelLayout, PanelHit};
pub use state::{EditorSettings, EditorState, Interaction};
