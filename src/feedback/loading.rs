// src/feedback/loading.rs
use super::Loader;

/// Blocking loading indicator. While active the main area takes no input.
#[derive(Debug, Default)]
pub struct LoadingOverlay {
    message: Option<String>,
}

impl LoadingOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.message.is_some()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl Loader for LoadingOverlay {
    fn show_loading(&mut self, message: &str) {
        self.message = Some(message.to_string());
    }

    fn hide_loading(&mut self) {
        self.message = None;
    }
}
