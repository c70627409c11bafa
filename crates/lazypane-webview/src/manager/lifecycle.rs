use std::borrow::Cow;
use std::sync::Arc;

use lazypane_common::SurfaceId;
use tracing::{debug, warn};
use wry::http::Response;
use wry::raw_window_handle;
use wry::WebViewBuilder;

use crate::content::ContentProvider;
use crate::ipc::IPC_INIT_SCRIPT;

use super::handle::WebViewHandle;
use super::types::WebViewConfig;
use super::WebViewManager;

impl WebViewManager {
    /// Create a new surface as a child of the given window.
    ///
    /// The `window` must implement `raw_window_handle::HasWindowHandle`.
    /// The WebView is positioned at `bounds` within the parent window.
    pub fn create<W: raw_window_handle::HasWindowHandle>(
        &self,
        surface: SurfaceId,
        window: &W,
        bounds: wry::Rect,
        config: WebViewConfig,
    ) -> Result<WebViewHandle, wry::Error> {
        let mut builder = WebViewBuilder::new()
            .with_bounds(bounds)
            .with_devtools(config.devtools)
            .with_clipboard(config.clipboard)
            .with_focused(true)
            .with_initialization_script(IPC_INIT_SCRIPT);

        for script in &config.init_scripts {
            builder = builder.with_initialization_script(script);
        }

        if let Some(ua) = &config.user_agent {
            builder = builder.with_user_agent(ua);
        }

        builder = Self::attach_ipc_handler(builder, Arc::clone(&self.events), surface.clone());
        builder =
            Self::attach_page_load_handler(builder, Arc::clone(&self.events), surface.clone());
        builder =
            Self::attach_navigation_handler(builder, Arc::clone(&self.events), surface.clone());
        builder = self.attach_custom_protocol(builder);

        let webview = builder.with_url(&config.url).build_as_child(window)?;

        debug!(surface = %surface, url = %config.url, "surface created");

        Ok(WebViewHandle {
            webview,
            surface,
            closed: false,
            events: Arc::clone(&self.events),
        })
    }

    fn attach_custom_protocol<'a>(&self, builder: WebViewBuilder<'a>) -> WebViewBuilder<'a> {
        let cp = Arc::clone(&self.content_provider);
        builder.with_custom_protocol("lazypane".to_string(), move |_wv_id, request| {
            let uri = request.uri().to_string();
            serve(&cp, &uri)
        })
    }
}

/// Build the custom-protocol response for `uri`.
fn serve(provider: &ContentProvider, uri: &str) -> Response<Cow<'static, [u8]>> {
    let path = request_path(uri);
    match provider.resolve(path) {
        Some((mime, data)) => Response::builder()
            .status(200)
            .header("Content-Type", mime.as_ref())
            .header("Access-Control-Allow-Origin", "lazypane://localhost")
            .body(Cow::from(data.into_owned()))
            .unwrap_or_else(|_| Response::new(Cow::from(Vec::new()))),
        None => {
            warn!(path = %path, "custom protocol: asset not found");
            let mut response = Response::new(Cow::from(b"Not Found".to_vec()));
            *response.status_mut() = wry::http::StatusCode::NOT_FOUND;
            response
        }
    }
}

/// Strip the scheme/host from a `lazypane://` URI. WebView2 rewrites the
/// scheme to `http://lazypane.localhost/`.
fn request_path(uri: &str) -> &str {
    let path = uri
        .strip_prefix("lazypane://localhost/")
        .or_else(|| uri.strip_prefix("lazypane://localhost"))
        .or_else(|| uri.strip_prefix("http://lazypane.localhost/"))
        .or_else(|| uri.strip_prefix("lazypane:///"))
        .or_else(|| uri.strip_prefix("lazypane://"))
        .unwrap_or("");
    path.split(['?', '#']).next().unwrap_or("")
}
