// src/api/mod.rs
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::models::{
    ClearDataResponse, DashboardStats, SendEmailsResponse, UploadResponse, UploadedFile,
};

pub mod error;
pub mod http;
#[cfg(test)]
pub mod mock;

pub use error::ApiError;
pub use http::HttpBackend;

pub const UPLOAD_PATH: &str = "/api/upload";
pub const SEND_EMAILS_PATH: &str = "/api/send-emails";
pub const DASHBOARD_STATS_PATH: &str = "/api/dashboard-stats";
pub const CLEAR_DATA_PATH: &str = "/clear-data";
pub const EXPORT_LOGS_PATH: &str = "/export-logs";

// Core trait for backend operations. Calls block; controllers run them on
// worker threads.
pub trait Backend: Send + Sync {
    fn upload(&self, file: &UploadedFile) -> Result<UploadResponse, ApiError>;
    fn send_emails(&self, batch_size: u32) -> Result<SendEmailsResponse, ApiError>;
    fn dashboard_stats(&self) -> Result<DashboardStats, ApiError>;
    fn clear_data(&self) -> Result<ClearDataResponse, ApiError>;
    fn export_logs(&self) -> Result<String, ApiError>;
}

/// Whether a 2xx body must also carry `success: true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessFlag {
    Required,
    Ignored,
}

pub fn decode_response<T: DeserializeOwned>(
    status: u16,
    body: &str,
    flag: SuccessFlag,
) -> Result<T, ApiError> {
    let ok = (200..300).contains(&status);

    // A body that is not JSON (proxy or framework error page) is never a
    // server-reported error, whatever the status.
    let value: Value = serde_json::from_str(body)
        .map_err(|e| ApiError::Decode(format!("status {}: {}", status, e)))?;

    if !ok {
        return Err(ApiError::Server {
            status,
            message: error_text(&value),
        });
    }

    if flag == SuccessFlag::Required && value.get("success").and_then(Value::as_bool) != Some(true) {
        return Err(ApiError::Server {
            status,
            message: error_text(&value),
        });
    }

    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Classifies the body of a non-2xx response from a non-JSON endpoint.
pub fn decode_error(status: u16, body: &str) -> ApiError {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => ApiError::Server {
            status,
            message: error_text(&value),
        },
        Err(e) => ApiError::Decode(format!("status {}: {}", status, e)),
    }
}

// `error` is the documented field; some endpoints only fill `message`.
fn error_text(value: &Value) -> Option<String> {
    value
        .get("error")
        .and_then(Value::as_str)
        .or_else(|| value.get("message").and_then(Value::as_str))
        .map(str::to_string)
}
