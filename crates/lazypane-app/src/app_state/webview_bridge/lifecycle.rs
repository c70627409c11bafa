//! Surface creation inside the host window.

use std::path::Path;

use lazypane_common::{LazypaneError, Rect, SurfaceId};
use lazypane_config::schema::PanelConfig;
use lazypane_webview::{WebViewConfig, WebViewManager};
use winit::window::Window;

use crate::app_state::controller::{panel_title, Surface, SurfaceHost};

use super::bounds::rect_to_wry;

/// Script exposing panel settings as `window.lazypane.settings`.
pub fn panel_settings_script(panel: &PanelConfig) -> String {
    let settings = serde_json::json!({
        "fontFamily": panel.font_family,
        "fontSize": panel.font_size,
    });
    format!(
        "window.lazypane = window.lazypane || {{}}; window.lazypane.settings = {settings};"
    )
}

/// Opens surfaces as child webviews of the main window.
///
/// New surfaces start out covering the whole window; the next layout pass
/// moves them into their column.
pub struct WindowSurfaceHost<'a> {
    pub window: &'a Window,
    pub manager: &'a WebViewManager,
    pub panel: &'a PanelConfig,
}

impl WindowSurfaceHost<'_> {
    fn viewport(&self) -> Rect {
        let size = self.window.inner_size().to_logical::<f64>(self.window.scale_factor());
        Rect {
            x: 0.0,
            y: 0.0,
            width: size.width,
            height: size.height,
        }
    }
}

impl SurfaceHost for WindowSurfaceHost<'_> {
    fn open_surface(
        &mut self,
        surface: &SurfaceId,
        cwd: &Path,
    ) -> Result<Box<dyn Surface>, LazypaneError> {
        let mut config = WebViewConfig::default()
            .with_init_script(panel_settings_script(self.panel));
        config.devtools = self.panel.devtools;

        let handle = self
            .manager
            .create(
                surface.clone(),
                self.window,
                rect_to_wry(&self.viewport()),
                config,
            )
            .map_err(|e| LazypaneError::WebView(e.to_string()))?;

        tracing::info!(surface = %surface, title = %panel_title(cwd), "Surface created");
        Ok(Box::new(handle))
    }
}
