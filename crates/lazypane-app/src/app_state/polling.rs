//! Periodic polling of surfaces and processes.

use std::time::Instant;

use lazypane_common::Rect;
use winit::event_loop::{ActiveEventLoop, ControlFlow};

use super::core::LazypaneApp;
use super::types::POLL_INTERVAL;

impl LazypaneApp {
    /// Run polling and schedule the next wake-up.
    pub(super) fn poll_and_schedule(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();

        if now.duration_since(self.last_poll) >= POLL_INTERVAL {
            self.last_poll = now;
            self.poll_webview_events();
            self.controller.poll_processes();
            if self.controller.session_count() != self.laid_out {
                self.sync_layout();
            }
            self.show_notifications();
            self.update_window_title();
            self.check_exit();
        }

        if self.should_exit {
            self.shutdown();
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + POLL_INTERVAL));
    }

    /// Hand queued surface events to the controller.
    fn poll_webview_events(&mut self) {
        let events = match &self.webviews {
            Some(manager) => manager.drain_events(),
            None => return,
        };
        for event in events {
            self.controller.handle_event(event);
        }
    }

    /// Exit once the last panel is gone.
    pub(super) fn check_exit(&mut self) {
        if self.controller.session_count() > 0 {
            self.had_panels = true;
        } else if self.had_panels && !self.should_exit {
            tracing::info!("Last panel closed, exiting");
            self.should_exit = true;
        }
    }

    /// Lay panels out across the current window.
    pub(super) fn sync_layout(&mut self) {
        let Some(window) = &self.window else {
            return;
        };
        let size = window.inner_size().to_logical::<f64>(window.scale_factor());
        self.controller.layout(Rect {
            x: 0.0,
            y: 0.0,
            width: size.width,
            height: size.height,
        });
        self.laid_out = self.controller.session_count();
    }
}
