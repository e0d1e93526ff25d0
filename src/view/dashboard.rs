// src/view/dashboard.rs
use super::{StatCard, Tone};
use crate::models::{ActivityEntry, ActivityStatus, DashboardStats, SubjectStat};
use crate::utils::{format_count, format_one_decimal, format_timestamp};

pub const NO_ACTIVITY: &str = "No recent activity";
pub const NO_SUBJECTS: &str = "No subject data available";

#[derive(Debug, Clone, PartialEq)]
pub enum ListView<T> {
    Empty(&'static str),
    Rows(Vec<T>),
}

impl<T> ListView<T> {
    fn from_rows(rows: Vec<T>, empty: &'static str) -> Self {
        if rows.is_empty() {
            ListView::Empty(empty)
        } else {
            ListView::Rows(rows)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusBadge {
    pub icon: &'static str,
    pub text: &'static str,
    pub tone: Tone,
}

impl StatusBadge {
    pub fn for_status(status: ActivityStatus) -> Self {
        match status {
            ActivityStatus::Sent => Self { icon: "✔", text: "Sent", tone: Tone::Green },
            ActivityStatus::Failed => Self { icon: "✖", text: "Failed", tone: Tone::Red },
            ActivityStatus::Unknown => Self { icon: "•", text: "Unknown", tone: Tone::Gray },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityRowView {
    pub name: String,
    pub email: String,
    pub badge: StatusBadge,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubjectRowView {
    pub subject: String,
    pub count: String,
    pub average: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub cards: Vec<StatCard>,
    pub activity: ListView<ActivityRowView>,
    pub subjects: ListView<SubjectRowView>,
}

impl DashboardView {
    pub fn build(stats: &DashboardStats) -> Self {
        let summary = &stats.stats;
        Self {
            cards: vec![
                StatCard::new("Total Students", format_count(summary.total_students), Tone::Blue),
                StatCard::new("Emails Sent", format_count(summary.sent_emails), Tone::Green),
                StatCard::new("Pending Emails", format_count(summary.unsent_emails), Tone::Yellow),
                StatCard::new(
                    "Completion Rate",
                    format!("{}%", format_one_decimal(summary.completion_rate)),
                    Tone::Purple,
                ),
            ],
            activity: ListView::from_rows(
                stats.recent_activity.iter().map(activity_row).collect(),
                NO_ACTIVITY,
            ),
            subjects: ListView::from_rows(
                stats.subject_stats.iter().map(subject_row).collect(),
                NO_SUBJECTS,
            ),
        }
    }
}

fn activity_row(entry: &ActivityEntry) -> ActivityRowView {
    ActivityRowView {
        name: entry.student_name.clone(),
        email: entry.student_email.clone(),
        badge: StatusBadge::for_status(entry.status),
        timestamp: entry
            .sent_at
            .as_deref()
            .map(format_timestamp)
            .unwrap_or_default(),
    }
}

fn subject_row(stat: &SubjectStat) -> SubjectRowView {
    SubjectRowView {
        subject: stat.subject.clone(),
        count: format_count(stat.count),
        average: format_one_decimal(stat.avg_score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StatsSummary;

    #[test]
    fn empty_lists_show_placeholders() {
        let view = DashboardView::build(&DashboardStats::default());
        assert_eq!(view.activity, ListView::Empty(NO_ACTIVITY));
        assert_eq!(view.subjects, ListView::Empty(NO_SUBJECTS));
        assert_eq!(view.cards[3].value, "0.0%");
    }

    #[test]
    fn cards_and_rows_are_formatted() {
        let stats = DashboardStats {
            stats: StatsSummary {
                total_students: 12345,
                sent_emails: 1000,
                unsent_emails: 11345,
                completion_rate: 8.1004,
                ..StatsSummary::default()
            },
            recent_activity: vec![ActivityEntry {
                student_name: "Ana".to_string(),
                student_email: "ana@example.com".to_string(),
                status: ActivityStatus::Failed,
                sent_at: Some("2024-01-05T09:30:00".to_string()),
            }],
            subject_stats: vec![SubjectStat {
                subject: "Algorithm".to_string(),
                count: 40,
                avg_score: 71.26,
            }],
            daily_stats: Vec::new(),
        };

        let view = DashboardView::build(&stats);
        let values: Vec<_> = view.cards.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(values, ["12,345", "1,000", "11,345", "8.1%"]);

        let ListView::Rows(activity) = &view.activity else {
            panic!("expected activity rows");
        };
        assert_eq!(activity[0].badge.text, "Failed");
        assert_eq!(activity[0].badge.tone, Tone::Red);
        assert_eq!(activity[0].timestamp, "2024-01-05 09:30");

        let ListView::Rows(subjects) = &view.subjects else {
            panic!("expected subject rows");
        };
        assert_eq!(subjects[0].average, "71.3");
    }

    #[test]
    fn halfway_rates_and_averages_round_up() {
        let stats = DashboardStats {
            stats: StatsSummary {
                completion_rate: 12.25,
                ..StatsSummary::default()
            },
            subject_stats: vec![SubjectStat {
                subject: "Physics".to_string(),
                count: 4,
                avg_score: 71.25,
            }],
            ..DashboardStats::default()
        };

        let view = DashboardView::build(&stats);
        assert_eq!(view.cards[3].value, "12.3%");
        let ListView::Rows(subjects) = &view.subjects else {
            panic!("expected subject rows");
        };
        assert_eq!(subjects[0].average, "71.3");
    }
}
