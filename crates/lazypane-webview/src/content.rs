//! Panel content served via the `lazypane://` custom protocol.
//!
//! The panel page ships inside the binary. A directory on disk may shadow the
//! bundled files while iterating on the panel.

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// URL every surface loads.
pub const PANEL_URL: &str = "lazypane://localhost/panel/index.html";

const PANEL_INDEX: &str = "panel/index.html";
const PANEL_HTML: &str = include_str!("../assets/panel/index.html");

/// Resolves `lazypane://` request paths to bytes and a MIME type.
///
/// Lookup order: `base_dir` (if set), then the bundled assets.
pub struct ContentProvider {
    base_dir: Option<PathBuf>,
    bundled: HashMap<&'static str, (&'static str, &'static [u8])>,
}

impl ContentProvider {
    /// Provider serving only the assets compiled into the binary.
    pub fn bundled() -> Self {
        let mut bundled = HashMap::new();
        bundled.insert(PANEL_INDEX, ("text/html", PANEL_HTML.as_bytes()));
        Self {
            base_dir: None,
            bundled,
        }
    }

    /// Serve files from `base_dir` ahead of the bundled copies.
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    /// Resolve a request path to content bytes and MIME type.
    pub fn resolve(&self, path: &str) -> Option<(Cow<'_, str>, Cow<'_, [u8]>)> {
        let clean = path.trim_start_matches('/');

        if let Some(found) = self.resolve_from_disk(clean) {
            return Some(found);
        }

        self.bundled
            .get(clean)
            .map(|(mime, data)| (Cow::Borrowed(*mime), Cow::Borrowed(*data)))
    }

    /// The directory shadowing the bundled assets, if any.
    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }

    fn resolve_from_disk(&self, clean: &str) -> Option<(Cow<'_, str>, Cow<'_, [u8]>)> {
        let base_dir = self.base_dir.as_ref()?;
        let file_path = base_dir.join(clean);

        // Canonicalize both sides so `..` and symlinks can't escape the base.
        let canonical_base = std::fs::canonicalize(base_dir).ok()?;
        let canonical_file = std::fs::canonicalize(&file_path).ok()?;
        if !canonical_file.starts_with(&canonical_base) || !canonical_file.is_file() {
            return None;
        }

        let data = std::fs::read(&canonical_file).ok()?;
        let mime = mime_from_extension(&file_path);
        Some((Cow::Borrowed(mime), Cow::Owned(data)))
    }
}

impl Default for ContentProvider {
    fn default() -> Self {
        Self::bundled()
    }
}

/// Guess MIME type from file extension.
fn mime_from_extension(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html" | "htm") => "text/html",
        Some("css") => "text/css",
        Some("js" | "mjs") => "application/javascript",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        _ => "application/octet-stream",
    }
}
