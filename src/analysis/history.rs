// src/analysis/history.rs
use crate::models::DailyCount;
use crate::utils::format_day_label;

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryPoint {
    pub label: String,
    pub count: u64,
}

/// Emails sent per day, in server order, labelled "Jan 5" style.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HistoryChart {
    pub points: Vec<HistoryPoint>,
}

impl HistoryChart {
    pub fn from_daily(daily: &[DailyCount]) -> Self {
        Self {
            points: daily
                .iter()
                .map(|day| HistoryPoint {
                    label: format_day_label(&day.date),
                    count: day.count,
                })
                .collect(),
        }
    }

    pub fn line_points(&self) -> Vec<[f64; 2]> {
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| [i as f64, p.count as f64])
            .collect()
    }

    /// Axis label for a plot x coordinate; only whole indices have one.
    pub fn label_at(&self, x: f64) -> Option<&str> {
        if x < 0.0 || x.fract().abs() > 1e-6 {
            return None;
        }
        self.points.get(x.round() as usize).map(|p| p.label.as_str())
    }

    pub fn max_count(&self) -> u64 {
        self.points.iter().map(|p| p.count).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_day_label_and_value() {
        let chart = HistoryChart::from_daily(&[DailyCount {
            date: "2024-01-05".to_string(),
            count: 3,
        }]);

        assert_eq!(chart.points[0].label, "Jan 5");
        assert_eq!(chart.line_points(), vec![[0.0, 3.0]]);
        assert_eq!(chart.label_at(0.0), Some("Jan 5"));
        assert_eq!(chart.label_at(0.5), None);
        assert_eq!(chart.label_at(1.0), None);
    }

    #[test]
    fn keeps_server_order() {
        let chart = HistoryChart::from_daily(&[
            DailyCount { date: "2024-02-29".to_string(), count: 7 },
            DailyCount { date: "2024-03-01".to_string(), count: 0 },
        ]);
        let labels: Vec<_> = chart.points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, ["Feb 29", "Mar 1"]);
        assert_eq!(chart.max_count(), 7);
    }
}
