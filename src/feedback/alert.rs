// src/feedback/alert.rs
use super::Alerter;

/// Blocking alert: a single message that stays until acknowledged.
#[derive(Debug, Default)]
pub struct AlertBox {
    message: Option<String>,
}

impl AlertBox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn acknowledge(&mut self) {
        self.message = None;
    }
}

impl Alerter for AlertBox {
    fn alert(&mut self, message: &str) {
        self.message = Some(message.to_string());
    }
}
