use anyhow::Result;
use std::time::Instant;

use crate::draw::Surface;
use crate::input::{Key, Modifiers, MouseButton};
use crate::shell::SessionOutcome;

pub mod wayland;

pub use wayland::run_window;

/// A window's application logic, driven by the Wayland event loop.
///
/// The terminal, the editor and the viewer each implement this; the backend
/// owns the protocol objects and buffers and forwards input here.
pub trait WindowApp {
    /// Toplevel title shown by the compositor.
    fn title(&self) -> &str;

    /// Size requested before the compositor's first configure.
    fn initial_size(&self) -> (u32, u32);

    fn on_resize(&mut self, width: u32, height: u32);

    fn on_key_press(&mut self, key: Key);

    fn on_modifiers(&mut self, modifiers: Modifiers);

    fn on_pointer_motion(&mut self, x: i32, y: i32);

    fn on_pointer_press(&mut self, button: MouseButton, x: i32, y: i32);

    fn on_pointer_release(&mut self, button: MouseButton, x: i32, y: i32);

    /// The compositor asked the window to close (title bar button, keybinding).
    fn on_close_requested(&mut self);

    /// Called once per loop iteration with the current time.
    fn tick(&mut self, _now: Instant) {}

    /// Keeps frame callbacks coming even when nothing else changes.
    fn is_animating(&self) -> bool {
        false
    }

    fn needs_redraw(&self) -> bool;

    fn mark_rendered(&mut self);

    fn should_exit(&self) -> bool;

    fn render(&self, surface: &mut dyn Surface);

    /// Runs deferred work outside of event dispatch, such as opening another window.
    fn after_dispatch(&mut self) -> Result<()> {
        Ok(())
    }

    /// Consumes the app once its window is gone.
    fn finish(self: Box<Self>) -> Result<SessionOutcome>;
}
