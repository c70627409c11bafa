//! Core application state struct and constructor.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use lazypane_common::Notification;
use lazypane_config::LazypaneConfig;
use lazypane_webview::WebViewManager;
use winit::window::Window;

use super::commands::HostCommand;
use super::controller::{PanelController, StateStore};
use super::pty_bridge::ToolLauncher;

/// Top-level application state.
pub struct LazypaneApp {
    pub(super) config: LazypaneConfig,
    pub(super) window: Option<Arc<Window>>,
    pub(super) webviews: Option<WebViewManager>,
    pub(super) controller: PanelController,

    /// Commands to run once the window exists.
    pub(super) startup: Vec<HostCommand>,
    pub(super) restore_on_launch: bool,

    /// Notification currently shown in the window title.
    pub(super) banner: Option<Notification>,
    pub(super) last_title: String,
    /// Number of panels at the last layout pass.
    pub(super) laid_out: usize,
    /// At least one panel has been open; closing the last one exits.
    pub(super) had_panels: bool,
    pub(super) should_exit: bool,
    pub(super) shut_down: bool,
    pub(super) last_poll: Instant,
}

impl LazypaneApp {
    pub fn new(config: LazypaneConfig, startup: Vec<HostCommand>, restore_on_launch: bool) -> Self {
        let controller = build_controller(&config);
        Self::with_controller(config, controller, startup, restore_on_launch)
    }

    pub(super) fn with_controller(
        config: LazypaneConfig,
        controller: PanelController,
        startup: Vec<HostCommand>,
        restore_on_launch: bool,
    ) -> Self {
        Self {
            config,
            window: None,
            webviews: None,
            controller,
            startup,
            restore_on_launch,
            banner: None,
            last_title: String::new(),
            laid_out: 0,
            had_panels: false,
            should_exit: false,
            shut_down: false,
            last_poll: Instant::now(),
        }
    }
}

fn build_controller(config: &LazypaneConfig) -> PanelController {
    let launcher = ToolLauncher::new(config.tool.clone(), config.terminal.clone());
    let store = match state_file(config) {
        Some(path) => StateStore::open(path),
        None => {
            tracing::warn!("No data directory; panel state will not persist");
            StateStore::in_memory()
        }
    };
    PanelController::new(
        Box::new(launcher),
        store,
        (config.terminal.default_cols, config.terminal.default_rows),
    )
}

fn state_file(config: &LazypaneConfig) -> Option<PathBuf> {
    match &config.session.state_file {
        Some(path) if !path.trim().is_empty() => Some(PathBuf::from(path)),
        _ => StateStore::default_path(),
    }
}
