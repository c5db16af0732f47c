//! Backend-neutral input types.
//!
//! The Wayland handlers translate native keysyms, button codes and modifier
//! masks into these types before handing them to the running window.

pub mod events;
pub mod modifiers;

// Re-export commonly used types at module level
pub use events::{Key, MouseButton};
pub use modifiers::{ClickTrigger, Modifiers};
