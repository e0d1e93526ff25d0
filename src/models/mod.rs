// src/models/mod.rs
pub mod student;
pub mod dashboard;

// Re-export commonly used types
pub use student::{
    ClearDataResponse, SendEmailsResponse, StudentPreviewRow, UploadResponse, UploadStats,
    UploadedFile, DEFAULT_SUBJECT,
};
pub use dashboard::{
    ActivityEntry, ActivityStatus, DailyCount, DashboardStats, StatsSummary, SubjectStat,
};
