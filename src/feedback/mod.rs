// src/feedback/mod.rs
//! User-facing feedback capabilities handed to the controllers: toast
//! notifications, the blocking loading indicator, blocking alerts, and the
//! success banners shown at the top of the main area.

pub mod notifications;
pub mod loading;
pub mod alert;
pub mod banner;

pub use notifications::{Notification, NotificationCenter, NotificationKind};
pub use loading::LoadingOverlay;
pub use alert::AlertBox;
pub use banner::{Banner, BannerStack};

pub trait Notifier {
    fn notify(&mut self, kind: NotificationKind, title: &str, message: &str);
}

pub trait Loader {
    fn show_loading(&mut self, message: &str);
    fn hide_loading(&mut self);
}

pub trait Alerter {
    fn alert(&mut self, message: &str);
}
