// src/state/mod.rs
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::Backend;
use crate::config::AppConfig;
use crate::controller::upload::{CLEAR_PREVIEW_PROMPT, SEND_EMAILS_PROMPT};
use crate::feedback::{AlertBox, BannerStack, LoadingOverlay, NotificationCenter};

// Screen/tab tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Screen {
    #[default]
    Upload,
    Dashboard,
}

impl Screen {
    pub const ALL: [Screen; 2] = [Screen::Upload, Screen::Dashboard];

    pub fn label(self) -> &'static str {
        match self {
            Screen::Upload => "Upload",
            Screen::Dashboard => "Dashboard",
        }
    }
}

/// Actions that need a yes/no answer before they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    SendEmails,
    ClearPreview,
}

impl ConfirmAction {
    pub fn title(self) -> &'static str {
        match self {
            ConfirmAction::SendEmails => "Send Emails",
            ConfirmAction::ClearPreview => "Clear Data",
        }
    }

    pub fn prompt(self) -> &'static str {
        match self {
            ConfirmAction::SendEmails => SEND_EMAILS_PROMPT,
            ConfirmAction::ClearPreview => CLEAR_PREVIEW_PROMPT,
        }
    }
}

// Core dialog tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogState {
    #[default]
    None,
    Confirm(ConfirmAction),
}

impl DialogState {
    pub fn ask(&mut self, action: ConfirmAction) {
        *self = DialogState::Confirm(action);
    }

    /// Closes the dialog. Returns the action only when it was accepted.
    pub fn answer(&mut self, accepted: bool) -> Option<ConfirmAction> {
        match std::mem::take(self) {
            DialogState::Confirm(action) if accepted => Some(action),
            _ => None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, DialogState::Confirm(_))
    }
}

/// Shared services every controller reports through.
pub struct AppContext {
    pub config: AppConfig,
    pub backend: Arc<dyn Backend>,
    pub notifications: NotificationCenter,
    pub loading: LoadingOverlay,
    pub banners: BannerStack,
    pub alert: AlertBox,
}

impl AppContext {
    pub fn new(config: AppConfig, backend: Arc<dyn Backend>) -> Self {
        Self {
            notifications: NotificationCenter::new(config.notification_timeout()),
            loading: LoadingOverlay::new(),
            banners: BannerStack::new(config.banner_timeout(), config.banner_fade()),
            alert: AlertBox::new(),
            backend,
            config,
        }
    }
}

/// UI preferences persisted between runs through eframe storage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiPrefs {
    pub screen: Screen,
}
