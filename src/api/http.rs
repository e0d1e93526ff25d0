// src/api/http.rs
use reqwest::blocking::{multipart, Client, Response};
use serde::Serialize;
use tracing::debug;

use super::{
    decode_error, decode_response, ApiError, Backend, SuccessFlag, CLEAR_DATA_PATH,
    DASHBOARD_STATS_PATH, EXPORT_LOGS_PATH, SEND_EMAILS_PATH, UPLOAD_PATH,
};
use crate::config::AppConfig;
use crate::models::{
    ClearDataResponse, DashboardStats, SendEmailsResponse, UploadResponse, UploadedFile,
};

#[derive(Debug, Serialize)]
struct SendEmailsRequest {
    batch_size: u32,
}

#[derive(Debug, Serialize)]
struct EmptyBody {}

/// Blocking HTTP client for the results backend.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.server_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn read(response: Response) -> Result<(u16, String), ApiError> {
        let status = response.status().as_u16();
        let body = response.text()?;
        debug!(status, bytes = body.len(), "backend response");
        Ok((status, body))
    }
}

impl Backend for HttpBackend {
    fn upload(&self, file: &UploadedFile) -> Result<UploadResponse, ApiError> {
        let form = multipart::Form::new()
            .file("file", &file.path)
            .map_err(|e| ApiError::Transport(format!("failed to read {}: {}", file.path.display(), e)))?;

        let response = self.client.post(self.url(UPLOAD_PATH)).multipart(form).send()?;
        let (status, body) = Self::read(response)?;
        decode_response(status, &body, SuccessFlag::Required)
    }

    fn send_emails(&self, batch_size: u32) -> Result<SendEmailsResponse, ApiError> {
        let response = self
            .client
            .post(self.url(SEND_EMAILS_PATH))
            .json(&SendEmailsRequest { batch_size })
            .send()?;
        let (status, body) = Self::read(response)?;
        decode_response(status, &body, SuccessFlag::Required)
    }

    fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        let response = self.client.get(self.url(DASHBOARD_STATS_PATH)).send()?;
        let (status, body) = Self::read(response)?;
        decode_response(status, &body, SuccessFlag::Required)
    }

    fn clear_data(&self) -> Result<ClearDataResponse, ApiError> {
        let response = self
            .client
            .post(self.url(CLEAR_DATA_PATH))
            .json(&EmptyBody {})
            .send()?;
        let (status, body) = Self::read(response)?;
        decode_response(status, &body, SuccessFlag::Ignored)
    }

    fn export_logs(&self) -> Result<String, ApiError> {
        let response = self.client.get(self.url(EXPORT_LOGS_PATH)).send()?;
        let (status, body) = Self::read(response)?;
        if !(200..300).contains(&status) {
            return Err(decode_error(status, &body));
        }
        Ok(body)
    }
}
