// src/feedback/notifications.rs
use std::time::{Duration, Instant};
use tracing::debug;
use uuid::Uuid;

use super::Notifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: Uuid,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub created: Instant,
}

/// Toast notifications, newest last. Each one expires after `timeout`.
#[derive(Debug)]
pub struct NotificationCenter {
    items: Vec<Notification>,
    timeout: Duration,
}

impl NotificationCenter {
    pub fn new(timeout: Duration) -> Self {
        Self {
            items: Vec::new(),
            timeout,
        }
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    pub fn last(&self) -> Option<&Notification> {
        self.items.last()
    }

    pub fn dismiss(&mut self, id: Uuid) {
        self.items.retain(|n| n.id != id);
    }

    pub fn prune(&mut self, now: Instant) {
        let timeout = self.timeout;
        self.items.retain(|n| now.saturating_duration_since(n.created) < timeout);
    }

    /// When the oldest live notification expires.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.items.iter().map(|n| n.created + self.timeout).min()
    }
}

impl Notifier for NotificationCenter {
    fn notify(&mut self, kind: NotificationKind, title: &str, message: &str) {
        debug!(?kind, title, message, "notification");
        self.items.push(Notification {
            id: Uuid::new_v4(),
            kind,
            title: title.to_string(),
            message: message.to_string(),
            created: Instant::now(),
        });
    }
}
