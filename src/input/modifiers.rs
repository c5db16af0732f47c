//! Keyboard modifier state tracking.

/// What a primary click does, decided by the modifiers held at press time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTrigger {
    /// Ctrl+Shift: delete the shape nearest the click
    Delete,
    /// Shift: add a placement point
    Place,
    /// Ctrl: grab the nearest vertex for dragging
    Drag,
    /// No modifier: UI buttons only
    Plain,
}

/// Keyboard modifier state.
///
/// Tracks which modifier keys (Shift, Ctrl, Alt) are currently pressed.
/// Used to classify editor clicks and handle keyboard shortcuts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift key pressed
    pub shift: bool,
    /// Ctrl key pressed
    pub ctrl: bool,
    /// Alt key pressed
    pub alt: bool,
}

impl Modifiers {
    /// Creates a new Modifiers instance with all keys released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifies a primary click.
    ///
    /// # Trigger Priority
    /// 1. Ctrl+Shift → Delete (wins over placement)
    /// 2. Shift → Place
    /// 3. Ctrl → Drag
    /// 4. None → Plain
    pub fn click_trigger(&self) -> ClickTrigger {
        if self.ctrl && self.shift {
            ClickTrigger::Delete
        } else if self.shift {
            ClickTrigger::Place
        } else if self.ctrl {
            ClickTrigger::Drag
        } else {
            ClickTrigger::Plain
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ctrl_shift_means_delete_not_place() {
        let mods = Modifiers {
            shift: true,
            ctrl: true,
            alt: false,
        };
        assert_eq!(mods.click_trigger(), ClickTrigger::Delete);
    }

    #[test]
    fn single_modifiers_map_to_their_triggers() {
        let mut mods = Modifiers::new();
        assert_eq!(mods.click_trigger(), ClickTrigger::Plain);
        mods.shift = true;
        assert_eq!(mods.click_trigger(), ClickTrigger::Place);
        mods.shift = false;
        mods.ctrl = true;
        assert_eq!(mods.click_trigger(), ClickTrigger::Drag);
    }
}
