// Translates xkb key events into `Key` values and modifier snapshots for the app.
use log::debug;
use smithay_client_toolkit::seat::keyboard::{
    KeyEvent, KeyboardHandler, Keysym, Modifiers as XkbModifiers, RawModifiers,
};
use wayland_client::{
    Connection, QueueHandle,
    protocol::{wl_keyboard, wl_surface},
};

use crate::input::{Key, Modifiers};

use super::super::state::WaylandState;

impl KeyboardHandler for WaylandState {
    fn enter(
        &mut self,
        _: &Connection,
        _: &QueueHandle<Self>,
        _: &wl_keyboard::WlKeyboard,
        _: &wl_surface::WlSurface,
        _: u32,
        _: &[u32],
        _: &[Keysym],
    ) {
    }

    fn leave(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _keyboard: &wl_keyboard::WlKeyboard,
        _surface: &wl_surface::WlSurface,
        _serial: u32,
    ) {
        debug!("Keyboard focus left");
        // Held modifiers are not reported back on re-entry.
        self.app.on_modifiers(Modifiers::new());
    }

    fn press_key(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _keyboard: &wl_keyboard::WlKeyboard,
        _serial: u32,
        event: KeyEvent,
    ) {
        let key = event_to_key(event.keysym, event.utf8.as_deref());
        debug!("Key pressed: {:?}", key);
        self.app.on_key_press(key);
    }

    fn release_key(
        &mut self,
        _: &Connection,
        _: &QueueHandle<Self>,
        _: &wl_keyboard::WlKeyboard,
        _: u32,
        _: KeyEvent,
    ) {
    }

    fn update_modifiers(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _keyboard: &wl_keyboard::WlKeyboard,
        _serial: u32,
        modifiers: XkbModifiers,
        _layout: RawModifiers,
        _group: u32,
    ) {
        debug!(
            "Modifiers: ctrl={} alt={} shift={}",
            modifiers.ctrl, modifiers.alt, modifiers.shift
        );
        self.app.on_modifiers(Modifiers {
            shift: modifiers.shift,
            ctrl: modifiers.ctrl,
            alt: modifiers.alt,
        });
    }

    fn repeat_key(
        &mut self,
        conn: &Connection,
        qh: &QueueHandle<Self>,
        keyboard: &wl_keyboard::WlKeyboard,
        serial: u32,
        event: KeyEvent,
    ) {
        self.press_key(conn, qh, keyboard, serial, event);
    }
}

/// Maps a key event to [`Key`], preferring the composed text for printable keys.
///
/// Only the keys the terminal, editor and viewer react to get a name.
fn event_to_key(keysym: Keysym, utf8: Option<&str>) -> Key {
    match keysym {
        Keysym::Escape => Key::Escape,
        Keysym::Return | Keysym::KP_Enter => Key::Return,
        Keysym::BackSpace => Key::Backspace,
        Keysym::Up => Key::Up,
        Keysym::Down => Key::Down,
        _ => utf8
            .and_then(single_printable)
            .or_else(|| keysym.key_char().filter(|c| !c.is_control()))
            .map_or(Key::Unknown, Key::Char),
    }
}

fn single_printable(text: &str) -> Option<char> {
    let mut chars = text.chars();
    let c = chars.next()?;
    (chars.next().is_none() && !c.is_control()).then_some(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_keys_map_directly() {
        assert_eq!(event_to_key(Keysym::Escape, None), Key::Escape);
        assert_eq!(event_to_key(Keysym::KP_Enter, Some("\r")), Key::Return);
        assert_eq!(event_to_key(Keysym::Up, None), Key::Up);
        // Modifiers arrive through `update_modifiers`, not as keys.
        assert_eq!(event_to_key(Keysym::Shift_R, None), Key::Unknown);
    }

    #[test]
    fn printable_keys_use_the_composed_text() {
        assert_eq!(event_to_key(Keysym::D, Some("D")), Key::Char('D'));
        assert_eq!(event_to_key(Keysym::udiaeresis, Some("ü")), Key::Char('ü'));
        assert_eq!(event_to_key(Keysym::a, None), Key::Char('a'));
    }

    #[test]
    fn control_text_is_not_a_character() {
        assert_eq!(event_to_key(Keysym::F1, None), Key::Unknown);
        assert_eq!(event_to_key(Keysym::Delete, Some("\u{7f}")), Key::Unknown);
    }
}
