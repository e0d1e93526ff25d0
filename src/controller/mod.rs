// src/controller/mod.rs
//! Request flows behind each screen. Controllers own their in-flight tasks
//! and report through the feedback capabilities they are handed.

use std::sync::Arc;
use tracing::info;

use crate::api::Backend;
use crate::feedback::{Loader, Notifier};

pub mod upload;
pub mod dashboard;
pub mod charts;
pub mod clear_data;
pub mod logs;

pub use upload::UploadController;
pub use dashboard::DashboardController;
pub use charts::{ChartInstance, ChartRenderer, ChartSlot};
pub use clear_data::ClearDataController;
pub use logs::LogExportController;

/// Post-clear reload: both screens go back to a blank state and the
/// dashboard fetches at once.
pub fn reload_screens(
    upload: &mut UploadController,
    dashboard: &mut DashboardController,
    backend: &Arc<dyn Backend>,
    notifier: &mut dyn Notifier,
    loader: &mut dyn Loader,
) {
    info!("reloading application state");
    upload.reset(loader);
    dashboard.reset();
    dashboard.refresh_now(backend, notifier);
}
