// src/controller/logs.rs
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

use crate::api::Backend;
use crate::feedback::{Loader, NotificationKind, Notifier};
use crate::file::logs::{parse_log_csv, LogExportHandler};
use crate::file::FileHandler;
use crate::task::Task;

/// Downloads the server's email log and saves it as CSV.
#[derive(Debug, Default)]
pub struct LogExportController {
    pending: Option<(PathBuf, Task<String>)>,
}

impl LogExportController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn export(
        &mut self,
        backend: &Arc<dyn Backend>,
        target: PathBuf,
        notifier: &mut dyn Notifier,
        loader: &mut dyn Loader,
    ) {
        if self.is_busy() {
            return;
        }

        loader.show_loading("Exporting email logs...");
        let backend = Arc::clone(backend);
        match Task::spawn("export-logs", move || backend.export_logs()) {
            Ok(task) => self.pending = Some((target, task)),
            Err(err) => {
                loader.hide_loading();
                error!(%err, "could not start log export");
                notifier.notify(NotificationKind::Error, "Export Failed", &err.to_string());
            }
        }
    }

    pub fn poll(&mut self, notifier: &mut dyn Notifier, loader: &mut dyn Loader) {
        let Some(result) = self.pending.as_ref().and_then(|(_, task)| task.try_take()) else {
            return;
        };
        let Some((target, _)) = self.pending.take() else {
            return;
        };
        loader.hide_loading();

        match result {
            Ok(body) => match save_export(&body, &target) {
                Ok(count) => {
                    info!(count, path = %target.display(), "email logs exported");
                    notifier.notify(
                        NotificationKind::Success,
                        "Logs Exported",
                        &format!("Saved {} log entries to {}", count, target.display()),
                    );
                }
                Err(err) => {
                    error!(error = %format!("{:#}", err), "log export could not be saved");
                    notifier.notify(NotificationKind::Error, "Export Failed", &format!("{:#}", err));
                }
            },
            Err(err) if err.is_server() => {
                notifier.notify(
                    NotificationKind::Error,
                    "Export Failed",
                    &err.message_or("The server could not export the email logs."),
                );
            }
            Err(err) => {
                error!(%err, "log export request failed");
                notifier.notify(
                    NotificationKind::Error,
                    "Network Error",
                    "Failed to download email logs. Please check your connection.",
                );
            }
        }
    }
}

fn save_export(body: &str, target: &Path) -> Result<usize> {
    let records = parse_log_csv(body)?;
    LogExportHandler::new().save(&records, target)?;
    Ok(records.len())
}
