/// Configuration for creating a new surface.
#[derive(Debug, Clone)]
pub struct WebViewConfig {
    /// Initial URL to load.
    pub url: String,
    /// Whether to enable dev tools.
    pub devtools: bool,
    /// Custom user agent string.
    pub user_agent: Option<String>,
    /// Whether to enable clipboard access.
    pub clipboard: bool,
    /// Extra scripts run before the page, after the IPC bridge.
    pub init_scripts: Vec<String>,
}

impl Default for WebViewConfig {
    fn default() -> Self {
        Self {
            url: crate::content::PANEL_URL.to_string(),
            devtools: cfg!(debug_assertions),
            user_agent: Some(format!("lazypane/{}", env!("CARGO_PKG_VERSION"))),
            clipboard: true,
            init_scripts: Vec::new(),
        }
    }
}

impl WebViewConfig {
    /// Append an initialization script.
    pub fn with_init_script(mut self, script: impl Into<String>) -> Self {
        self.init_scripts.push(script.into());
        self
    }
}
