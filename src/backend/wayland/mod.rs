//! Wayland toplevel window hosting one [`WindowApp`](super::WindowApp).

mod backend;
mod handlers;
mod state;
mod surface;

pub use backend::run_window;
