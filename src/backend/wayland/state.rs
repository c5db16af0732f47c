// Live protocol state shared by the event loop and the handler submodules, plus the
// render path that paints the app into a shared-memory buffer.
use anyhow::{Context, Result};
use log::debug;
use smithay_client_toolkit::{
    compositor::CompositorState, output::OutputState, registry::RegistryState, seat::SeatState,
    shell::{WaylandSurface, xdg::XdgShell},
    shm::Shm,
};
use wayland_client::{QueueHandle, protocol::wl_shm};

use super::surface::SurfaceState;
use crate::backend::WindowApp;
use crate::config::PerformanceConfig;
use crate::draw::CairoSurface;

pub(super) struct WaylandState {
    // Wayland protocol objects
    pub(super) registry_state: RegistryState,
    pub(super) compositor_state: CompositorState,
    pub(super) xdg_shell: XdgShell,
    pub(super) shm: Shm,
    pub(super) output_state: OutputState,
    pub(super) seat_state: SeatState,

    pub(super) surface: SurfaceState,
    pub(super) performance: PerformanceConfig,

    /// Application driven by this window
    pub(super) app: Box<dyn WindowApp>,
}

impl WaylandState {
    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        registry_state: RegistryState,
        compositor_state: CompositorState,
        xdg_shell: XdgShell,
        shm: Shm,
        output_state: OutputState,
        seat_state: SeatState,
        performance: PerformanceConfig,
        app: Box<dyn WindowApp>,
    ) -> Self {
        Self {
            registry_state,
            compositor_state,
            xdg_shell,
            shm,
            output_state,
            seat_state,
            surface: SurfaceState::new(),
            performance,
            app,
        }
    }

    /// Whether renders wait for the compositor's frame callback.
    pub(super) fn frame_throttled(&self) -> bool {
        self.performance.enable_vsync || self.app.is_animating()
    }

    pub(super) fn render(&mut self, qh: &QueueHandle<Self>) -> Result<()> {
        let buffer_count = self.performance.buffer_count as usize;
        let width = self.surface.width();
        let height = self.surface.height();
        debug!("Rendering {}x{} frame", width, height);

        let (buffer, canvas) = {
            let pool = self.surface.ensure_pool(&self.shm, buffer_count)?;
            pool.create_buffer(
                width as i32,
                height as i32,
                (width * 4) as i32,
                wl_shm::Format::Argb8888,
            )
            .context("Failed to create buffer")?
        };

        // SAFETY: `canvas` is the pool slice for this buffer, exactly width * height * 4
        // bytes laid out as ARGB32 rows of `width * 4` bytes. The Cairo surface and context
        // are dropped below, before the buffer is attached and handed to the compositor.
        let cairo_surface = unsafe {
            cairo::ImageSurface::create_for_data_unsafe(
                canvas.as_mut_ptr(),
                cairo::Format::ARgb32,
                width as i32,
                height as i32,
                (width * 4) as i32,
            )
            .context("Failed to create Cairo surface")?
        };

        let ctx = cairo::Context::new(&cairo_surface).context("Failed to create Cairo context")?;
        ctx.set_operator(cairo::Operator::Clear);
        ctx.paint().context("Failed to clear background")?;
        ctx.set_operator(cairo::Operator::Over);

        {
            let mut target = CairoSurface::new(&ctx, width, height);
            self.app.render(&mut target);
        }

        cairo_surface.flush();
        drop(ctx);
        drop(cairo_surface);

        let wl_surface = self
            .surface
            .window()
            .context("Window not created")?
            .wl_surface();
        wl_surface.attach(Some(buffer.wl_buffer()), 0, 0);
        wl_surface.damage_buffer(0, 0, width as i32, height as i32);

        if self.frame_throttled() {
            wl_surface.frame(qh, wl_surface.clone());
        }

        wl_surface.commit();
        Ok(())
    }
}
