// src/controller/upload.rs
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::api::{ApiError, Backend};
use crate::config::AppConfig;
use crate::feedback::{Loader, NotificationKind, Notifier};
use crate::models::{SendEmailsResponse, UploadResponse, UploadedFile};
use crate::task::Task;
use crate::utils::format_file_size;
use crate::view::PreviewView;

pub const ALLOWED_EXTENSIONS: [&str; 3] = ["csv", "xlsx", "xls"];

pub const SEND_EMAILS_PROMPT: &str =
    "Are you sure you want to send emails to all students? This action cannot be undone.";
pub const CLEAR_PREVIEW_PROMPT: &str =
    "Are you sure you want to clear all data? This will remove the current preview.";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectError {
    #[error("unsupported file type: {0}")]
    UnsupportedType(String),
    #[error("file is {size} bytes, limit is {limit}")]
    TooLarge { size: u64, limit: u64 },
}

pub fn validate_file(file: &UploadedFile, max_bytes: u64) -> Result<(), SelectError> {
    if !ALLOWED_EXTENSIONS.contains(&file.extension().as_str()) {
        return Err(SelectError::UnsupportedType(file.name.clone()));
    }
    if file.size > max_bytes {
        return Err(SelectError::TooLarge {
            size: file.size,
            limit: max_bytes,
        });
    }
    Ok(())
}

/// Staging, upload and email dispatch for one results spreadsheet.
#[derive(Debug)]
pub struct UploadController {
    batch_size: u32,
    max_upload_bytes: u64,
    staged: Option<UploadedFile>,
    preview: Option<PreviewView>,
    upload_task: Option<Task<UploadResponse>>,
    send_task: Option<Task<SendEmailsResponse>>,
    drop_hover: bool,
}

impl UploadController {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            batch_size: config.email_batch_size,
            max_upload_bytes: config.max_upload_bytes,
            staged: None,
            preview: None,
            upload_task: None,
            send_task: None,
            drop_hover: false,
        }
    }

    pub fn staged(&self) -> Option<&UploadedFile> {
        self.staged.as_ref()
    }

    pub fn staged_size_text(&self) -> Option<String> {
        self.staged.as_ref().map(|f| format_file_size(f.size))
    }

    pub fn preview(&self) -> Option<&PreviewView> {
        self.preview.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.upload_task.is_some() || self.send_task.is_some()
    }

    pub fn upload_enabled(&self) -> bool {
        self.staged.is_some() && !self.is_busy()
    }

    pub fn send_enabled(&self) -> bool {
        self.preview.is_some() && !self.is_busy()
    }

    pub fn drop_hover(&self) -> bool {
        self.drop_hover
    }

    pub fn set_drop_hover(&mut self, hovering: bool) {
        self.drop_hover = hovering;
    }

    /// Stages the first of `files` if it is an accepted spreadsheet. A
    /// rejected file leaves the current staging untouched.
    pub fn select_file(&mut self, files: Vec<UploadedFile>, notifier: &mut dyn Notifier) -> bool {
        let Some(file) = files.into_iter().next() else {
            return false;
        };

        match validate_file(&file, self.max_upload_bytes) {
            Ok(()) => {
                info!(name = %file.name, size = file.size, "file staged");
                self.staged = Some(file);
                true
            }
            Err(SelectError::UnsupportedType(name)) => {
                warn!(%name, "rejected file type");
                notifier.notify(
                    NotificationKind::Error,
                    "Invalid File",
                    "Please upload a CSV or Excel file.",
                );
                false
            }
            Err(SelectError::TooLarge { size, limit }) => {
                warn!(size, limit, "rejected oversized file");
                notifier.notify(
                    NotificationKind::Error,
                    "File Too Large",
                    &format!("Please upload files smaller than {}.", format_file_size(limit)),
                );
                false
            }
        }
    }

    pub fn upload(
        &mut self,
        backend: &Arc<dyn Backend>,
        notifier: &mut dyn Notifier,
        loader: &mut dyn Loader,
    ) {
        if self.is_busy() {
            return;
        }
        let Some(file) = self.staged.clone() else {
            notifier.notify(NotificationKind::Error, "No File", "Please select a file first.");
            return;
        };

        loader.show_loading("Processing your file...");
        let backend = Arc::clone(backend);
        match Task::spawn("upload", move || backend.upload(&file)) {
            Ok(task) => self.upload_task = Some(task),
            Err(err) => {
                loader.hide_loading();
                report_upload_failure(&err, notifier);
            }
        }
    }

    /// Call only after the user confirmed [`SEND_EMAILS_PROMPT`].
    pub fn send_emails(
        &mut self,
        backend: &Arc<dyn Backend>,
        notifier: &mut dyn Notifier,
        loader: &mut dyn Loader,
    ) {
        if self.is_busy() {
            return;
        }

        loader.show_loading("Sending emails... This may take a few minutes.");
        let backend = Arc::clone(backend);
        let batch_size = self.batch_size;
        match Task::spawn("send-emails", move || backend.send_emails(batch_size)) {
            Ok(task) => self.send_task = Some(task),
            Err(err) => {
                loader.hide_loading();
                report_send_failure(&err, notifier);
            }
        }
    }

    /// Applies finished requests. The loading indicator is hidden whatever
    /// the outcome.
    pub fn poll(&mut self, notifier: &mut dyn Notifier, loader: &mut dyn Loader) {
        if let Some(result) = self.upload_task.as_ref().and_then(Task::try_take) {
            self.upload_task = None;
            loader.hide_loading();
            match result {
                Ok(response) => {
                    info!(rows = response.data.len(), "upload parsed");
                    notifier.notify(NotificationKind::Success, "Upload Successful", &response.message);
                    self.preview = Some(PreviewView::build(&response.data, &response.stats));
                }
                Err(err) => report_upload_failure(&err, notifier),
            }
        }

        if let Some(result) = self.send_task.as_ref().and_then(Task::try_take) {
            self.send_task = None;
            loader.hide_loading();
            match result {
                Ok(response) => {
                    notifier.notify(NotificationKind::Success, "Emails Sent", &response.message);
                    if !response.errors.is_empty() {
                        warn!(failed = response.errors.len(), errors = ?response.errors, "some emails failed");
                    }
                }
                Err(err) => report_send_failure(&err, notifier),
            }
        }
    }

    pub fn clear_file(&mut self) {
        self.staged = None;
    }

    /// Call only after the user confirmed [`CLEAR_PREVIEW_PROMPT`].
    pub fn clear_all_data(&mut self, notifier: &mut dyn Notifier) {
        self.clear_file();
        self.preview = None;
        notifier.notify(
            NotificationKind::Info,
            "Data Cleared",
            "All student data has been cleared.",
        );
    }

    /// Back to a blank screen. Replies of abandoned requests are discarded.
    pub fn reset(&mut self, loader: &mut dyn Loader) {
        if self.is_busy() {
            loader.hide_loading();
        }
        self.staged = None;
        self.preview = None;
        self.upload_task = None;
        self.send_task = None;
        self.drop_hover = false;
    }
}

fn report_upload_failure(err: &ApiError, notifier: &mut dyn Notifier) {
    if err.is_server() {
        warn!(%err, "upload rejected");
        notifier.notify(NotificationKind::Error, "Upload Failed", &err.message_or("Upload failed."));
    } else {
        error!(%err, "upload error");
        notifier.notify(
            NotificationKind::Error,
            "Upload Error",
            "Failed to upload file. Please try again.",
        );
    }
}

fn report_send_failure(err: &ApiError, notifier: &mut dyn Notifier) {
    if err.is_server() {
        warn!(%err, "email send rejected");
        notifier.notify(
            NotificationKind::Error,
            "Sending Failed",
            &err.message_or("Failed to send emails."),
        );
    } else {
        error!(%err, "email sending error");
        notifier.notify(
            NotificationKind::Error,
            "Network Error",
            "Failed to send emails. Please check your connection.",
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockBackend;
    use crate::feedback::{LoadingOverlay, NotificationCenter};
    use crate::models::{StudentPreviewRow, UploadStats};
    use crate::task::wait_until;
    use std::time::Duration;

    struct Fixture {
        mock: Arc<MockBackend>,
        backend: Arc<dyn Backend>,
        notes: NotificationCenter,
        loading: LoadingOverlay,
        controller: UploadController,
    }

    fn fixture() -> Fixture {
        let mock = Arc::new(MockBackend::new());
        let backend: Arc<dyn Backend> = mock.clone();
        Fixture {
            mock,
            backend,
            notes: NotificationCenter::new(Duration::from_secs(60)),
            loading: LoadingOverlay::new(),
            controller: UploadController::new(&AppConfig::default()),
        }
    }

    impl Fixture {
        fn settle(&mut self) {
            let Fixture { controller, notes, loading, .. } = self;
            wait_until(|| {
                controller.poll(notes, loading);
                !controller.is_busy()
            });
        }

        fn last_title(&self) -> &str {
            &self.notes.last().unwrap().title
        }
    }

    fn file(name: &str, size: u64) -> UploadedFile {
        UploadedFile::new(format!("/tmp/{}", name), name, size)
    }

    fn upload_reply() -> UploadResponse {
        UploadResponse {
            message: "Parsed 2 students".to_string(),
            data: vec![
                StudentPreviewRow {
                    name: "Ana".to_string(),
                    email: "ana@example.com".to_string(),
                    score: 95.0,
                    subject: None,
                },
                StudentPreviewRow {
                    name: "Bo".to_string(),
                    email: "bo@example.com".to_string(),
                    score: 61.0,
                    subject: Some("Git".to_string()),
                },
            ],
            stats: UploadStats {
                total_students: 2,
                average_score: 78.0,
                highest_score: 95.0,
                subject_count: 2,
            },
        }
    }

    #[test]
    fn accepts_only_spreadsheet_extensions() {
        let limit = 1024;
        for name in ["a.csv", "b.XLSX", "c.Xls", "d.tar.csv", ".csv", "xlsx"] {
            assert!(validate_file(&file(name, 1), limit).is_ok(), "{}", name);
        }
        for name in ["a.txt", "b.csv.bak", "report", "c.", "d.xlsm"] {
            assert!(validate_file(&file(name, 1), limit).is_err(), "{}", name);
        }
    }

    #[test]
    fn rejected_file_is_never_staged() {
        let mut f = fixture();
        assert!(!f.controller.select_file(vec![file("notes.pdf", 10)], &mut f.notes));
        assert!(f.controller.staged().is_none());
        assert!(!f.controller.upload_enabled());
        assert_eq!(f.last_title(), "Invalid File");
    }

    #[test]
    fn oversized_file_is_rejected() {
        let mut f = fixture();
        let too_big = AppConfig::default().max_upload_bytes + 1;
        assert!(!f.controller.select_file(vec![file("big.csv", too_big)], &mut f.notes));
        assert_eq!(f.last_title(), "File Too Large");
        assert_eq!(f.notes.last().unwrap().message, "Please upload files smaller than 16 MB.");
    }

    #[test]
    fn first_accepted_file_is_staged() {
        let mut f = fixture();
        assert!(!f.controller.select_file(Vec::new(), &mut f.notes));
        assert!(f
            .controller
            .select_file(vec![file("scores.csv", 1536), file("other.csv", 1)], &mut f.notes));

        assert_eq!(f.controller.staged().unwrap().name, "scores.csv");
        assert_eq!(f.controller.staged_size_text().as_deref(), Some("1.5 KB"));
        assert!(f.controller.upload_enabled());
        assert!(f.notes.items().is_empty());
    }

    #[test]
    fn upload_without_file_only_notifies() {
        let mut f = fixture();
        f.controller.upload(&f.backend, &mut f.notes, &mut f.loading);

        assert_eq!(f.last_title(), "No File");
        assert!(!f.loading.is_active());
        assert!(f.mock.uploaded.lock().unwrap().is_empty());
    }

    #[test]
    fn successful_upload_builds_preview() {
        let mut f = fixture();
        f.mock.reply_upload(Ok(upload_reply()));
        f.controller.select_file(vec![file("scores.xlsx", 2048)], &mut f.notes);

        f.controller.upload(&f.backend, &mut f.notes, &mut f.loading);
        assert!(f.loading.is_active());
        assert!(!f.controller.upload_enabled());
        f.settle();

        assert!(!f.loading.is_active());
        assert_eq!(f.last_title(), "Upload Successful");
        assert_eq!(*f.mock.uploaded.lock().unwrap(), vec!["scores.xlsx".to_string()]);

        let preview = f.controller.preview().unwrap();
        assert_eq!(preview.rows.len(), 2);
        assert_eq!(preview.rows[0].subject, "General");
        assert_eq!(preview.cards[1].value, "78.0");
        assert!(f.controller.send_enabled());
    }

    #[test]
    fn server_rejection_shows_server_text() {
        let mut f = fixture();
        f.mock.reply_upload(Err(ApiError::Server {
            status: 400,
            message: Some("Missing required columns: email".to_string()),
        }));
        f.controller.select_file(vec![file("scores.csv", 10)], &mut f.notes);

        f.controller.upload(&f.backend, &mut f.notes, &mut f.loading);
        f.settle();

        assert!(!f.loading.is_active());
        assert_eq!(f.last_title(), "Upload Failed");
        assert_eq!(f.notes.last().unwrap().message, "Missing required columns: email");
        assert!(f.controller.preview().is_none());
    }

    #[test]
    fn transport_failure_shows_generic_text() {
        let mut f = fixture();
        f.mock.reply_upload(Err(ApiError::Transport("connection refused".to_string())));
        f.controller.select_file(vec![file("scores.csv", 10)], &mut f.notes);

        f.controller.upload(&f.backend, &mut f.notes, &mut f.loading);
        f.settle();

        assert!(!f.loading.is_active());
        assert_eq!(f.last_title(), "Upload Error");
        assert_eq!(f.notes.last().unwrap().message, "Failed to upload file. Please try again.");
    }

    #[test]
    fn send_emails_posts_configured_batch() {
        let mut f = fixture();
        f.mock.reply_send(Ok(SendEmailsResponse {
            message: "Sent: 1, Failed: 1".to_string(),
            errors: vec!["bo@example.com: mailbox unavailable".to_string()],
        }));

        f.controller.send_emails(&f.backend, &mut f.notes, &mut f.loading);
        assert!(f.loading.is_active());
        f.settle();

        assert!(!f.loading.is_active());
        assert_eq!(*f.mock.send_batches.lock().unwrap(), vec![50]);
        assert_eq!(f.last_title(), "Emails Sent");
        // Partial failures are logged, not shown.
        assert_eq!(f.notes.items().len(), 1);
    }

    #[test]
    fn send_failures_are_split_by_kind() {
        let mut f = fixture();
        f.mock.reply_send(Err(ApiError::Server {
            status: 200,
            message: Some("No student data found. Please upload a file first.".to_string()),
        }));
        f.mock.reply_send(Err(ApiError::Transport("timed out".to_string())));

        f.controller.send_emails(&f.backend, &mut f.notes, &mut f.loading);
        f.settle();
        assert_eq!(f.last_title(), "Sending Failed");

        f.controller.send_emails(&f.backend, &mut f.notes, &mut f.loading);
        f.settle();
        assert_eq!(f.last_title(), "Network Error");
        assert!(!f.loading.is_active());
    }

    #[test]
    fn reset_abandons_pending_upload() {
        let mut f = fixture();
        f.mock.reply_upload(Ok(upload_reply()));
        f.controller.select_file(vec![file("scores.csv", 10)], &mut f.notes);
        f.controller.upload(&f.backend, &mut f.notes, &mut f.loading);
        assert!(f.controller.is_busy());
        assert!(f.loading.is_active());

        f.controller.reset(&mut f.loading);

        assert!(f.controller.staged().is_none());
        assert!(f.controller.preview().is_none());
        assert!(!f.controller.upload_enabled());
        assert!(!f.loading.is_active());
        assert!(!f.controller.is_busy());

        // The abandoned reply never reaches the screen.
        f.controller.poll(&mut f.notes, &mut f.loading);
        assert!(f.controller.preview().is_none());
        assert!(f.notes.items().is_empty());
    }

    #[test]
    fn reset_when_idle_keeps_foreign_loading_overlay() {
        let mut f = fixture();
        f.loading.show_loading("Exporting logs...");

        f.controller.reset(&mut f.loading);

        assert!(f.loading.is_active());
    }

    #[test]
    fn clear_file_keeps_preview_but_clear_all_drops_it() {
        let mut f = fixture();
        f.mock.reply_upload(Ok(upload_reply()));
        f.controller.select_file(vec![file("scores.csv", 10)], &mut f.notes);
        f.controller.upload(&f.backend, &mut f.notes, &mut f.loading);
        f.settle();

        f.controller.clear_file();
        assert!(f.controller.staged().is_none());
        assert!(!f.controller.upload_enabled());
        assert!(f.controller.preview().is_some());

        f.controller.clear_all_data(&mut f.notes);
        assert!(f.controller.preview().is_none());
        assert_eq!(f.last_title(), "Data Cleared");
        assert_eq!(f.notes.last().unwrap().kind, NotificationKind::Info);
    }
}
