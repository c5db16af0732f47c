// Responds to xdg toplevel configure/close events, keeping dimensions in sync with the compositor.
use log::info;
use smithay_client_toolkit::shell::xdg::window::{Window, WindowConfigure, WindowHandler};
use wayland_client::{Connection, QueueHandle};

use super::super::state::WaylandState;

impl WindowHandler for WaylandState {
    fn request_close(&mut self, _conn: &Connection, _qh: &QueueHandle<Self>, _window: &Window) {
        info!("Compositor requested window close");
        self.app.on_close_requested();
    }

    fn configure(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _window: &Window,
        configure: WindowConfigure,
        _serial: u32,
    ) {
        // Unset dimensions leave the size up to us; keep the current one.
        let width = configure
            .new_size
            .0
            .map_or(self.surface.width(), |w| w.get());
        let height = configure
            .new_size
            .1
            .map_or(self.surface.height(), |h| h.get());
        info!("Window configured: {}x{}", width, height);

        if self.surface.update_dimensions(width, height) {
            info!("Window size changed - recreating SlotPool");
        }
        self.app.on_resize(width, height);
        self.surface.set_configured(true);
    }
}
