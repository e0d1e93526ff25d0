// src/view/upload.rs
use super::{StatCard, Tone};
use crate::analysis::Grade;
use crate::models::{StudentPreviewRow, UploadStats};
use crate::utils::{format_count, format_number, format_one_decimal};

#[derive(Debug, Clone, PartialEq)]
pub struct PreviewRowView {
    pub name: String,
    pub email: String,
    pub score: String,
    pub subject: String,
    pub grade: Grade,
    pub shaded: bool,
}

/// Preview table plus the summary cards shown above it.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewView {
    pub cards: Vec<StatCard>,
    pub rows: Vec<PreviewRowView>,
}

impl PreviewView {
    pub fn build(rows: &[StudentPreviewRow], stats: &UploadStats) -> Self {
        Self {
            cards: stat_cards(stats),
            rows: rows
                .iter()
                .enumerate()
                .map(|(i, row)| PreviewRowView {
                    name: row.name.clone(),
                    email: row.email.clone(),
                    score: format_number(row.score),
                    subject: row.subject_or_default().to_string(),
                    grade: Grade::from_score(row.score),
                    shaded: i % 2 == 1,
                })
                .collect(),
        }
    }
}

fn stat_cards(stats: &UploadStats) -> Vec<StatCard> {
    vec![
        StatCard::new("Total Students", format_count(stats.total_students), Tone::Blue),
        StatCard::new("Average Score", format_one_decimal(stats.average_score), Tone::Green),
        StatCard::new("Highest Score", format_number(stats.highest_score), Tone::Purple),
        StatCard::new("Subjects", format_count(stats.subject_count), Tone::Yellow),
    ]
}
