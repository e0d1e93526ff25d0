// src/controller/clear_data.rs
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info};

use crate::api::Backend;
use crate::feedback::{Alerter, BannerStack};
use crate::models::ClearDataResponse;
use crate::task::Task;

pub const CLEAR_FAILED: &str = "Failed to clear data";

/// Confirm-then-POST flow for wiping all server-side records.
#[derive(Debug)]
pub struct ClearDataController {
    modal_open: bool,
    scroll_locked: bool,
    task: Option<Task<ClearDataResponse>>,
    reload_at: Option<Instant>,
    reload_delay: Duration,
}

impl ClearDataController {
    pub fn new(reload_delay: Duration) -> Self {
        Self {
            modal_open: false,
            scroll_locked: false,
            task: None,
            reload_at: None,
            reload_delay,
        }
    }

    pub fn is_open(&self) -> bool {
        self.modal_open
    }

    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    pub fn is_busy(&self) -> bool {
        self.task.is_some()
    }

    pub fn reload_at(&self) -> Option<Instant> {
        self.reload_at
    }

    pub fn open_confirmation(&mut self) {
        self.modal_open = true;
        self.scroll_locked = true;
    }

    pub fn close_confirmation(&mut self) {
        self.modal_open = false;
        self.scroll_locked = false;
    }

    /// Escape closes the modal; returns whether it did anything.
    pub fn handle_escape(&mut self) -> bool {
        self.close_if_idle()
    }

    /// A click outside the modal body closes it.
    pub fn handle_click_outside(&mut self) -> bool {
        self.close_if_idle()
    }

    // The modal stays up until a running clear request has answered.
    fn close_if_idle(&mut self) -> bool {
        if !self.modal_open || self.is_busy() {
            return false;
        }
        self.close_confirmation();
        true
    }

    pub fn confirm_clear(&mut self, backend: &Arc<dyn Backend>, alerter: &mut dyn Alerter) {
        if self.is_busy() {
            return;
        }

        let backend = Arc::clone(backend);
        match Task::spawn("clear-data", move || backend.clear_data()) {
            Ok(task) => self.task = Some(task),
            Err(err) => {
                error!(%err, "could not start clear-data request");
                alerter.alert(CLEAR_FAILED);
                self.close_confirmation();
            }
        }
    }

    /// Applies a finished clear request. The modal is closed whatever the
    /// outcome.
    pub fn poll(&mut self, now: Instant, banners: &mut BannerStack, alerter: &mut dyn Alerter) {
        let Some(result) = self.task.as_ref().and_then(Task::try_take) else {
            return;
        };
        self.task = None;

        match result {
            Ok(response) => {
                info!("all data cleared");
                if let Some(message) = response.message.filter(|m| !m.is_empty()) {
                    banners.push(&message, now);
                }
                self.reload_at = Some(now + self.reload_delay);
            }
            Err(err) => {
                error!(%err, "clear data failed");
                alerter.alert(&err.message_or(CLEAR_FAILED));
            }
        }

        self.close_confirmation();
    }

    /// True once, when the scheduled post-clear reload is due.
    pub fn take_due_reload(&mut self, now: Instant) -> bool {
        match self.reload_at {
            Some(at) if now >= at => {
                self.reload_at = None;
                true
            }
            _ => false,
        }
    }
}
