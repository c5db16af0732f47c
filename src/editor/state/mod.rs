mod core;
mod keyboard;
mod mouse;
mod render;

pub use core::{EditorSettings, EditorState, Interaction};
