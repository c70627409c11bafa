//! Surfacing controller notifications to the user.

use lazypane_common::{Notification, NotificationLevel};

use super::core::LazypaneApp;

impl LazypaneApp {
    /// Log queued notifications and keep the newest as the title banner.
    ///
    /// Errors are also printed to stderr, since the window may be about to
    /// close.
    pub(super) fn show_notifications(&mut self) {
        for notification in self.controller.notifications_mut().drain() {
            report(&notification);
            self.banner = Some(notification);
        }
        if self.banner.as_ref().is_some_and(Notification::is_expired) {
            self.banner = None;
        }
    }
}

fn report(notification: &Notification) {
    let Notification { title, body, .. } = notification;
    match notification.level {
        NotificationLevel::Info => tracing::info!(%title, "{body}"),
        NotificationLevel::Warning => tracing::warn!(%title, "{body}"),
        NotificationLevel::Error => {
            tracing::error!(%title, "{body}");
            eprintln!("{title}: {body}");
        }
    }
}

/// One-line rendering for the window title.
pub(super) fn banner_text(notification: &Notification) -> String {
    let prefix = match notification.level {
        NotificationLevel::Info => "",
        NotificationLevel::Warning => "Warning: ",
        NotificationLevel::Error => "Error: ",
    };
    format!("{prefix}{}", notification.body)
}
