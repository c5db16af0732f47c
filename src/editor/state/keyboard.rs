use log::info;

use crate::input::{Key, Modifiers};

use super::{EditorState, Interaction};

impl EditorState {
    /// Processes a key press.
    ///
    /// - Escape: cancel a placement or drag; when idle, close the color panel
    /// - Shift+D: ask the shell to quit once this editor closes
    pub fn on_key_press(&mut self, key: Key) {
        match key {
            Key::Escape => {
                if self.interaction != Interaction::Idle {
                    self.cancel();
                } else if self.color_panel_open {
                    self.toggle_color_panel();
                }
            }
            Key::Char('d' | 'D') if self.modifiers.shift && !self.modifiers.ctrl => {
                if !self.exit_shell {
                    info!("Shell exit requested from the editor");
                }
                self.exit_shell = true;
            }
            _ => {}
        }
    }

    pub fn on_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
    }
}
