//! Window creation and webview setup.

use std::sync::Arc;

use lazypane_config::schema::PanelConfig;
use lazypane_webview::{ContentProvider, WebViewManager};
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowAttributes;

use super::core::LazypaneApp;

impl LazypaneApp {
    /// Create the window and the webview manager.
    /// Returns `false` if initialization failed and the event loop should exit.
    pub(super) fn initialize_window(&mut self, event_loop: &ActiveEventLoop) -> bool {
        let attrs = WindowAttributes::default()
            .with_title(self.config.window.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!("Failed to create window: {e}");
                return false;
            }
        };

        self.webviews = Some(WebViewManager::new(content_provider(&self.config.panel)));
        self.window = Some(window);
        tracing::info!("Window initialized");
        true
    }
}

/// Bundled panel assets, shadowed by `panel.assets_dir` when configured.
fn content_provider(panel: &PanelConfig) -> ContentProvider {
    match panel.assets_dir.as_deref().map(str::trim) {
        Some(dir) if !dir.is_empty() => {
            tracing::info!(dir, "Serving panel assets from disk");
            ContentProvider::bundled().with_base_dir(dir)
        }
        _ => ContentProvider::bundled(),
    }
}
