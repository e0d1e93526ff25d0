// src/file/logs.rs
use super::FileHandler;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// One row of the server's email log export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailLogRecord {
    #[serde(rename = "Student ID")]
    pub student_id: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Error Message", default)]
    pub error_message: String,
    #[serde(rename = "Sent At")]
    pub sent_at: String,
    #[serde(rename = "Batch ID")]
    pub batch_id: String,
}

pub const LOG_HEADERS: [&str; 6] = [
    "Student ID",
    "Email",
    "Status",
    "Error Message",
    "Sent At",
    "Batch ID",
];

/// Parses the `/export-logs` body. Every expected column must be present,
/// even when the log has no rows yet.
pub fn parse_log_csv(text: &str) -> Result<Vec<EmailLogRecord>> {
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let headers = reader.headers().context("Log export has no header row")?.clone();
    if let Some(missing) = LOG_HEADERS.iter().find(|h| !headers.iter().any(|x| x == **h)) {
        anyhow::bail!("Log export is missing the \"{}\" column", missing);
    }

    reader
        .deserialize::<EmailLogRecord>()
        .enumerate()
        .map(|(i, row)| row.with_context(|| format!("Malformed log row {}", i + 1)))
        .collect()
}

#[derive(Debug)]
pub struct LogExportHandler;

impl LogExportHandler {
    pub fn new() -> Self {
        Self
    }
}

impl FileHandler<Vec<EmailLogRecord>> for LogExportHandler {
    fn load(&self, path: &Path) -> Result<Vec<EmailLogRecord>> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        let mut reader = csv::Reader::from_reader(file);
        reader
            .deserialize::<EmailLogRecord>()
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to parse log file")
    }

    fn save(&self, data: &Vec<EmailLogRecord>, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        for record in data {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    }
}
