// src/feedback/banner.rs
use std::time::{Duration, Instant};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Banner {
    pub id: Uuid,
    pub message: String,
    pub shown_at: Instant,
}

/// Success banners pinned to the top of the main area. A banner stays fully
/// visible for `timeout`, fades out over `fade`, then goes away.
#[derive(Debug)]
pub struct BannerStack {
    banners: Vec<Banner>,
    timeout: Duration,
    fade: Duration,
}

impl BannerStack {
    pub fn new(timeout: Duration, fade: Duration) -> Self {
        Self {
            banners: Vec::new(),
            timeout,
            fade,
        }
    }

    /// Newest banners go first, like an element inserted before the first
    /// child of the content area.
    pub fn push(&mut self, message: &str, now: Instant) -> Uuid {
        let id = Uuid::new_v4();
        self.banners.insert(
            0,
            Banner {
                id,
                message: message.to_string(),
                shown_at: now,
            },
        );
        id
    }

    pub fn dismiss(&mut self, id: Uuid) {
        self.banners.retain(|b| b.id != id);
    }

    pub fn prune(&mut self, now: Instant) {
        let (timeout, fade) = (self.timeout, self.fade);
        self.banners
            .retain(|b| opacity(now.saturating_duration_since(b.shown_at), timeout, fade).is_some());
    }

    pub fn visible(&self, now: Instant) -> Vec<(&Banner, f32)> {
        self.banners
            .iter()
            .filter_map(|b| {
                opacity(now.saturating_duration_since(b.shown_at), self.timeout, self.fade)
                    .map(|alpha| (b, alpha))
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.banners.is_empty()
    }

    pub fn len(&self) -> usize {
        self.banners.len()
    }
}

/// Opacity of a banner `elapsed` after it appeared; `None` once it is gone.
pub fn opacity(elapsed: Duration, timeout: Duration, fade: Duration) -> Option<f32> {
    if elapsed < timeout {
        return Some(1.0);
    }
    let fading = elapsed - timeout;
    if fading >= fade {
        return None;
    }
    Some(1.0 - fading.as_secs_f32() / fade.as_secs_f32())
}
