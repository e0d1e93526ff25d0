// src/models/student.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_SUBJECT: &str = "General";

/// A spreadsheet picked or dropped by the user, not yet sent anywhere.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
}

impl UploadedFile {
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>, size: u64) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            size,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let metadata = fs::metadata(path)
            .with_context(|| format!("Failed to read file metadata: {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self::new(path, name, metadata.len()))
    }

    /// Lowercased text after the last `.` of the file name, or the whole
    /// name when it has no dot.
    pub fn extension(&self) -> String {
        self.name
            .rsplit('.')
            .next()
            .unwrap_or_default()
            .to_lowercase()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentPreviewRow {
    pub name: String,
    pub email: String,
    pub score: f64,
    #[serde(default)]
    pub subject: Option<String>,
}

impl StudentPreviewRow {
    pub fn subject_or_default(&self) -> &str {
        match self.subject.as_deref() {
            Some(subject) if !subject.is_empty() => subject,
            _ => DEFAULT_SUBJECT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UploadStats {
    pub total_students: u64,
    pub average_score: f64,
    pub highest_score: f64,
    pub subject_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Vec<StudentPreviewRow>,
    #[serde(default)]
    pub stats: UploadStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendEmailsResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClearDataResponse {
    #[serde(default)]
    pub message: Option<String>,
}
