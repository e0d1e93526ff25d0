// src/api/mock.rs
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Mutex};

use super::{ApiError, Backend};
use crate::models::{
    ClearDataResponse, DashboardStats, SendEmailsResponse, UploadResponse, UploadedFile,
};

type Script<T> = Mutex<VecDeque<Result<T, ApiError>>>;
type Gate = Mutex<Option<mpsc::Receiver<()>>>;

/// Scripted backend for controller tests. Each endpoint replies from its own
/// queue; an empty queue answers with a transport error.
#[derive(Default)]
pub struct MockBackend {
    upload_replies: Script<UploadResponse>,
    send_replies: Script<SendEmailsResponse>,
    stats_replies: Script<DashboardStats>,
    clear_replies: Script<ClearDataResponse>,
    export_replies: Script<String>,
    stats_gate: Gate,
    clear_gate: Gate,

    pub uploaded: Mutex<Vec<String>>,
    pub send_batches: Mutex<Vec<u32>>,
    pub stats_calls: AtomicUsize,
    pub clear_calls: AtomicUsize,
    pub export_calls: AtomicUsize,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply_upload(&self, reply: Result<UploadResponse, ApiError>) {
        self.upload_replies.lock().unwrap().push_back(reply);
    }

    pub fn reply_send(&self, reply: Result<SendEmailsResponse, ApiError>) {
        self.send_replies.lock().unwrap().push_back(reply);
    }

    pub fn reply_stats(&self, reply: Result<DashboardStats, ApiError>) {
        self.stats_replies.lock().unwrap().push_back(reply);
    }

    pub fn reply_clear(&self, reply: Result<ClearDataResponse, ApiError>) {
        self.clear_replies.lock().unwrap().push_back(reply);
    }

    pub fn reply_export(&self, reply: Result<String, ApiError>) {
        self.export_replies.lock().unwrap().push_back(reply);
    }

    /// Makes the next dashboard fetch wait until the returned sender fires.
    pub fn hold_stats(&self) -> mpsc::Sender<()> {
        Self::hold(&self.stats_gate)
    }

    /// Makes the next clear-data request wait until the returned sender fires.
    pub fn hold_clear(&self) -> mpsc::Sender<()> {
        Self::hold(&self.clear_gate)
    }

    pub fn stats_calls(&self) -> usize {
        self.stats_calls.load(Ordering::SeqCst)
    }

    pub fn clear_calls(&self) -> usize {
        self.clear_calls.load(Ordering::SeqCst)
    }

    pub fn export_calls(&self) -> usize {
        self.export_calls.load(Ordering::SeqCst)
    }

    fn hold(gate: &Gate) -> mpsc::Sender<()> {
        let (tx, rx) = mpsc::channel();
        *gate.lock().unwrap() = Some(rx);
        tx
    }

    fn wait(gate: &Gate) {
        let rx = gate.lock().unwrap().take();
        if let Some(rx) = rx {
            let _ = rx.recv();
        }
    }

    fn next<T>(script: &Script<T>) -> Result<T, ApiError> {
        script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Transport("no scripted reply".to_string())))
    }
}

impl Backend for MockBackend {
    fn upload(&self, file: &UploadedFile) -> Result<UploadResponse, ApiError> {
        self.uploaded.lock().unwrap().push(file.name.clone());
        Self::next(&self.upload_replies)
    }

    fn send_emails(&self, batch_size: u32) -> Result<SendEmailsResponse, ApiError> {
        self.send_batches.lock().unwrap().push(batch_size);
        Self::next(&self.send_replies)
    }

    fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        self.stats_calls.fetch_add(1, Ordering::SeqCst);
        Self::wait(&self.stats_gate);
        Self::next(&self.stats_replies)
    }

    fn clear_data(&self) -> Result<ClearDataResponse, ApiError> {
        self.clear_calls.fetch_add(1, Ordering::SeqCst);
        Self::wait(&self.clear_gate);
        Self::next(&self.clear_replies)
    }

    fn export_logs(&self) -> Result<String, ApiError> {
        self.export_calls.fetch_add(1, Ordering::SeqCst);
        Self::next(&self.export_replies)
    }
}
