//! Bridges the controller to wry surfaces hosted in the main window.

mod bounds;
mod lifecycle;
mod surface;

pub use bounds::{column_rects, rect_to_wry};
pub use lifecycle::{panel_settings_script, WindowSurfaceHost};
