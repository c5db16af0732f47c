use log::debug;

use crate::editor::layout::PanelHit;
use crate::geometry::Point;
use crate::input::{ClickTrigger, MouseButton};

use super::{EditorState, Interaction};

impl EditorState {
    /// Processes a mouse button press event.
    ///
    /// # Arguments
    /// * `button` - Which mouse button was pressed
    /// * `x` - Mouse X coordinate
    /// * `y` - Mouse Y coordinate
    ///
    /// # Behavior
    /// Window controls are checked first (header close and pen buttons, then the
    /// open color panel, which swallows every click inside it). Otherwise the
    /// held modifiers pick the action:
    /// - Ctrl+Shift: delete the nearest shape within tolerance
    /// - Shift: add a placement point
    /// - Ctrl: start dragging the nearest vertex
    pub fn on_mouse_press(&mut self, button: MouseButton, x: i32, y: i32) {
        if button != MouseButton::Left {
            return;
        }

        let header = self.header_layout();
        if header.hits_close(x, y) {
            debug!("Close button clicked");
            self.request_exit();
            return;
        }
        if header.hits_pen(x, y) {
            self.toggle_color_panel();
            return;
        }

        if self.color_panel_open {
            if let Some(hit) = self.panel_layout().hit(x, y) {
                self.on_panel_click(hit);
                return;
            }
        }

        let p = Point::new(x, y);
        match self.modifiers.click_trigger() {
            ClickTrigger::Delete => {
                self.delete_at(p);
            }
            ClickTrigger::Place => self.place_point(p),
            ClickTrigger::Drag => {
                self.begin_drag(p);
            }
            ClickTrigger::Plain => {}
        }
    }

    fn on_panel_click(&mut self, hit: PanelHit) {
        match hit {
            PanelHit::Close => {
                self.color_panel_open = false;
                self.needs_redraw = true;
            }
            PanelHit::Hue(degrees) => self.pick_hue(degrees),
            PanelHit::Shape(kind) => self.select_shape_type(kind),
            PanelHit::Background => {}
        }
    }

    /// Processes pointer motion; only a drag reacts to it.
    pub fn on_mouse_motion(&mut self, x: i32, y: i32) {
        if matches!(self.interaction, Interaction::Dragging { .. }) {
            self.drag_to(Point::new(x, y));
        }
    }

    /// Processes mouse button release events; releasing the left button ends a drag.
    pub fn on_mouse_release(&mut self, button: MouseButton, _x: i32, _y: i32) {
        if button == MouseButton::Left {
            self.end_drag();
        }
    }
}
