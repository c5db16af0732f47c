// Forwards pointer motion and button events to the app in window coordinates.
use log::debug;
use smithay_client_toolkit::seat::pointer::{
    BTN_LEFT, BTN_MIDDLE, BTN_RIGHT, PointerEvent, PointerEventKind, PointerHandler,
};
use wayland_client::{Connection, QueueHandle, protocol::wl_pointer};

use crate::input::MouseButton;

use super::super::state::WaylandState;

impl PointerHandler for WaylandState {
    fn pointer_frame(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _pointer: &wl_pointer::WlPointer,
        events: &[PointerEvent],
    ) {
        for event in events {
            let (x, y) = (event.position.0 as i32, event.position.1 as i32);
            match event.kind {
                PointerEventKind::Enter { .. } => {
                    debug!("Pointer entered at ({}, {})", x, y);
                    self.app.on_pointer_motion(x, y);
                }
                PointerEventKind::Leave { .. } => {
                    debug!("Pointer left window");
                }
                PointerEventKind::Motion { .. } => {
                    self.app.on_pointer_motion(x, y);
                }
                PointerEventKind::Press { button, .. } => {
                    let Some(mb) = map_button(button) else {
                        continue;
                    };
                    debug!("{:?} pressed at ({}, {})", mb, x, y);
                    self.app.on_pointer_press(mb, x, y);
                }
                PointerEventKind::Release { button, .. } => {
                    let Some(mb) = map_button(button) else {
                        continue;
                    };
                    debug!("{:?} released at ({}, {})", mb, x, y);
                    self.app.on_pointer_release(mb, x, y);
                }
                _ => {}
            }
        }
    }
}

fn map_button(button: u32) -> Option<MouseButton> {
    match button {
        BTN_LEFT => Some(MouseButton::Left),
        BTN_MIDDLE => Some(MouseButton::Middle),
        BTN_RIGHT => Some(MouseButton::Right),
        _ => None,
    }
}
