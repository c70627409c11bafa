//! Graceful shutdown: kill tool processes, then drop the webviews.

use super::core::LazypaneApp;

// =============================================================================
// SHUTDOWN
// =============================================================================

impl LazypaneApp {
    /// Shut every subsystem down. Safe to call more than once.
    ///
    /// Processes go first so nothing posts into a surface being torn down.
    /// Restoration records are kept for the next launch.
    pub(super) fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        tracing::info!("Initiating graceful shutdown");

        self.controller.shutdown();
        self.webviews = None;

        tracing::info!("Graceful shutdown complete");
    }
}

// =============================================================================
// TESTS
// =============================================================================
