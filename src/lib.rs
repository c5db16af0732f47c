//! Atelier: a terminal-styled shell that opens a shape viewer and a shape editor
//! over two persisted layers ("foliage" and "trunks").
//!
//! The binary in `main.rs` only parses flags and wires these modules together;
//! everything below is usable (and tested) without a Wayland display except
//! [`backend`] and the window launcher in [`app`].

pub mod app;
pub mod backend;
pub mod config;
pub mod document;
pub mod draw;
pub mod editor;
pub mod geometry;
pub mod input;
pub mod shell;
pub mod viewer;
pub mod workspace;

pub use config::Config;
pub use document::Document;
