// src/controller/charts.rs
use tracing::trace;

use crate::analysis::{GradeChart, HistoryChart};
use crate::models::DashboardStats;

/// A chart as currently shown. `fresh` is set until the first frame draws it,
/// so that frame can reset any zoom/pan the previous instance left behind.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartInstance<C> {
    pub chart: C,
    fresh: bool,
}

impl<C> ChartInstance<C> {
    fn new(chart: C) -> Self {
        Self { chart, fresh: true }
    }

    pub fn take_fresh(&mut self) -> bool {
        std::mem::replace(&mut self.fresh, false)
    }
}

/// Holds at most one live chart. Installing a new one always disposes the
/// old one first.
#[derive(Debug)]
pub struct ChartSlot<C> {
    name: &'static str,
    live: Option<ChartInstance<C>>,
    created: u64,
    disposed: u64,
}

impl<C> ChartSlot<C> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            live: None,
            created: 0,
            disposed: 0,
        }
    }

    pub fn replace(&mut self, chart: C) {
        self.dispose();
        self.live = Some(ChartInstance::new(chart));
        self.created += 1;
        trace!(slot = self.name, generation = self.created, "chart created");
    }

    pub fn dispose(&mut self) {
        if self.live.take().is_some() {
            self.disposed += 1;
            trace!(slot = self.name, "chart disposed");
        }
    }

    pub fn live(&self) -> Option<&ChartInstance<C>> {
        self.live.as_ref()
    }

    pub fn live_mut(&mut self) -> Option<&mut ChartInstance<C>> {
        self.live.as_mut()
    }

    pub fn created(&self) -> u64 {
        self.created
    }

    pub fn disposed(&self) -> u64 {
        self.disposed
    }

    pub fn live_count(&self) -> u64 {
        self.created - self.disposed
    }
}

#[derive(Debug)]
pub struct ChartRenderer {
    pub grades: ChartSlot<GradeChart>,
    pub history: ChartSlot<HistoryChart>,
}

impl ChartRenderer {
    pub fn new() -> Self {
        Self {
            grades: ChartSlot::new("grade_distribution"),
            history: ChartSlot::new("email_history"),
        }
    }

    pub fn render(&mut self, stats: &DashboardStats) {
        self.grades
            .replace(GradeChart::from_distribution(&stats.stats.grade_distribution));
        self.history.replace(HistoryChart::from_daily(&stats.daily_stats));
    }

    pub fn clear(&mut self) {
        self.grades.dispose();
        self.history.dispose();
    }
}

impl Default for ChartRenderer {
    fn default() -> Self {
        Self::new()
    }
}
