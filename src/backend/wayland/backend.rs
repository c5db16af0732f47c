// Opens one xdg toplevel on a fresh connection and drives its event loop until the
// app asks to exit, delegating protocol state to `WaylandState` and its handlers.
use anyhow::{Context, Result};
use log::{debug, info, warn};
use smithay_client_toolkit::{
    compositor::CompositorState,
    output::OutputState,
    registry::RegistryState,
    seat::SeatState,
    shell::{
        WaylandSurface,
        xdg::{XdgShell, window::WindowDecorations},
    },
    shm::Shm,
};
use std::time::Instant;
use wayland_client::{Connection, globals::registry_queue_init};

use super::state::WaylandState;
use crate::backend::WindowApp;
use crate::config::PerformanceConfig;
use crate::shell::SessionOutcome;

const APP_ID: &str = "atelier";
const MIN_SIZE: (u32, u32) = (320, 240);
const MAX_RENDER_FAILURES: u32 = 10;

/// Shows `app` in its own window and blocks until it closes.
///
/// Each call makes a new display connection, so a window may open another
/// window from [`WindowApp::after_dispatch`].
pub fn run_window(app: Box<dyn WindowApp>, performance: &PerformanceConfig) -> Result<SessionOutcome> {
    info!("Opening window '{}'", app.title());

    let conn = Connection::connect_to_env().context("Failed to connect to Wayland compositor")?;
    debug!("Connected to Wayland display");

    let (globals, mut event_queue) =
        registry_queue_init(&conn).context("Failed to initialize Wayland registry")?;
    let qh = event_queue.handle();

    let compositor_state =
        CompositorState::bind(&globals, &qh).context("wl_compositor not available")?;
    let xdg_shell = XdgShell::bind(&globals, &qh).context("xdg_wm_base not available")?;
    let shm = Shm::bind(&globals, &qh).context("wl_shm not available")?;
    let output_state = OutputState::new(&globals, &qh);
    let seat_state = SeatState::new(&globals, &qh);
    let registry_state = RegistryState::new(&globals);
    debug!("Bound compositor, xdg shell and shared memory");

    let (width, height) = app.initial_size();
    let title = app.title().to_string();

    let mut state = WaylandState::new(
        registry_state,
        compositor_state,
        xdg_shell,
        shm,
        output_state,
        seat_state,
        performance.clone(),
        app,
    );
    state.surface.update_dimensions(width, height);

    let wl_surface = state.compositor_state.create_surface(&qh);
    let window = state
        .xdg_shell
        .create_window(wl_surface, WindowDecorations::ServerDefault, &qh);
    window.set_title(title);
    window.set_app_id(APP_ID);
    window.set_min_size(Some(MIN_SIZE));
    window.commit();
    state.surface.set_window(window);
    info!("Toplevel created ({}x{} requested)", width, height);

    let mut consecutive_render_failures = 0u32;
    let mut loop_error: Option<anyhow::Error> = None;
    loop {
        if state.app.should_exit() {
            info!("Exit requested, closing window");
            break;
        }

        if let Err(e) = event_queue.blocking_dispatch(&mut state) {
            warn!("Event queue error: {}", e);
            loop_error = Some(anyhow::anyhow!("Wayland event queue error: {}", e));
            break;
        }

        state.app.tick(Instant::now());

        if let Err(e) = state.app.after_dispatch() {
            warn!("Deferred window work failed: {:#}", e);
        }

        if state.app.should_exit() {
            info!("Exit requested after dispatch, closing window");
            break;
        }

        // Animated apps redraw every frame callback; the rest only when dirty.
        let wants_frame = state.app.needs_redraw() || state.app.is_animating();
        let can_render = state.surface.is_configured()
            && wants_frame
            && (!state.surface.frame_callback_pending() || !state.frame_throttled());

        if can_render {
            match state.render(&qh) {
                Ok(()) => {
                    consecutive_render_failures = 0;
                    state.app.mark_rendered();
                    if state.frame_throttled() {
                        state.surface.set_frame_callback_pending(true);
                    }
                }
                Err(e) => {
                    consecutive_render_failures += 1;
                    warn!(
                        "Rendering error (attempt {}/{}): {}",
                        consecutive_render_failures, MAX_RENDER_FAILURES, e
                    );
                    if consecutive_render_failures >= MAX_RENDER_FAILURES {
                        loop_error = Some(anyhow::anyhow!(
                            "Too many consecutive render failures ({}), closing: {}",
                            consecutive_render_failures,
                            e
                        ));
                        break;
                    }
                    state.app.mark_rendered();
                }
            }
        } else if wants_frame && state.surface.frame_callback_pending() {
            debug!("Skipping render - frame callback already pending");
        }
    }

    // Unmap before handing control back so a parent window regains focus.
    let WaylandState { app, surface, .. } = state;
    drop(surface);
    if let Err(e) = conn.flush() {
        debug!("Flush after closing window failed: {}", e);
    }
    info!("Window closed");

    let outcome = app.finish();
    match loop_error {
        Some(e) => {
            if let Err(finish_err) = outcome {
                warn!("Closing session failed as well: {:#}", finish_err);
            }
            Err(e)
        }
        None => outcome,
    }
}
