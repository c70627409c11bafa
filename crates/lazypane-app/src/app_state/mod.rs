//! Top-level application state.
//!
//! Implements `winit::application::ApplicationHandler` to drive the main
//! event loop. Coordinates config, the panel controller, and the webview
//! surfaces hosted in the window.

mod commands;
mod controller;
mod core;
mod event_handler;
mod init;
mod notify;
mod polling;
pub(super) mod pty_bridge;
mod shutdown;
mod title;
mod types;
mod webview_bridge;

pub use commands::{startup_commands, HostCommand};
pub use core::LazypaneApp;
