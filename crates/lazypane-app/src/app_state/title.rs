//! Window title: active panel plus any notification banner.

use std::path::Path;

use super::controller::panel_title;
use super::core::LazypaneApp;
use super::notify::banner_text;

impl LazypaneApp {
    pub(super) fn update_window_title(&mut self) {
        let active = self
            .controller
            .active()
            .and_then(|id| self.controller.session(id))
            .map(|session| session.cwd());
        let banner = self.banner.as_ref().map(banner_text);
        let title = compose_title(&self.config.window.title, active, banner.as_deref());

        if title == self.last_title {
            return;
        }
        if let Some(window) = &self.window {
            window.set_title(&title);
        }
        self.last_title = title;
    }
}

fn compose_title(base: &str, active: Option<&Path>, banner: Option<&str>) -> String {
    let mut title = match active {
        Some(cwd) => panel_title(cwd),
        None => base.to_string(),
    };
    if let Some(banner) = banner {
        title.push_str(" | ");
        title.push_str(banner);
    }
    title
}
