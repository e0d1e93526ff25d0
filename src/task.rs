// src/task.rs
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use crate::api::ApiError;

/// A backend call running on its own worker thread.
///
/// The UI thread polls it once per frame with [`Task::try_take`]. A worker
/// that dies without replying surfaces as a transport error.
#[derive(Debug)]
pub struct Task<T> {
    label: &'static str,
    rx: Receiver<Result<T, ApiError>>,
}

impl<T: Send + 'static> Task<T> {
    pub fn spawn<F>(label: &'static str, job: F) -> Result<Self, ApiError>
    where
        F: FnOnce() -> Result<T, ApiError> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name(format!("api-{}", label))
            .spawn(move || {
                // The receiver is gone if the owning controller was reset.
                let _ = tx.send(job());
            })
            .map_err(|e| ApiError::Transport(format!("failed to start {} worker: {}", label, e)))?;

        Ok(Self { label, rx })
    }

    pub fn try_take(&self) -> Option<Result<T, ApiError>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(ApiError::Transport(format!(
                "{} worker exited without a reply",
                self.label
            )))),
        }
    }
}

/// Spins until `done` returns true or two seconds pass.
#[cfg(test)]
pub fn wait_until(mut done: impl FnMut() -> bool) {
    let deadline = std::time::Instant::now() + std::time::Duration::from_secs(2);
    while !done() {
        assert!(std::time::Instant::now() < deadline, "timed out waiting for worker");
        thread::sleep(std::time::Duration::from_millis(2));
    }
}
