// src/models/dashboard.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Payload of `/api/dashboard-stats`, replaced wholesale on every poll.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub stats: StatsSummary,
    #[serde(default)]
    pub recent_activity: Vec<ActivityEntry>,
    #[serde(default)]
    pub subject_stats: Vec<SubjectStat>,
    #[serde(default)]
    pub daily_stats: Vec<DailyCount>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StatsSummary {
    #[serde(default)]
    pub total_students: u64,
    #[serde(default)]
    pub sent_emails: u64,
    #[serde(default)]
    pub unsent_emails: u64,
    #[serde(default)]
    pub completion_rate: f64,
    #[serde(default)]
    pub grade_distribution: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityStatus {
    Sent,
    Failed,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub student_name: String,
    pub student_email: String,
    pub status: ActivityStatus,
    #[serde(default)]
    pub sent_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectStat {
    pub subject: String,
    pub count: u64,
    pub avg_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: String,
    pub count: u64,
}
