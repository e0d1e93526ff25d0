// src/controller/dashboard.rs
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, warn};

use super::charts::ChartRenderer;
use crate::api::{ApiError, Backend};
use crate::feedback::{NotificationKind, Notifier};
use crate::models::DashboardStats;
use crate::task::Task;
use crate::view::DashboardView;

/// Periodic dashboard statistics. The first fetch happens on `start`, then
/// one per `interval`. A tick that lands while a fetch is still running is
/// skipped rather than stacked.
#[derive(Debug)]
pub struct DashboardController {
    interval: Duration,
    next_poll: Option<Instant>,
    in_flight: Option<Task<DashboardStats>>,
    stats: Option<DashboardStats>,
    view: Option<DashboardView>,
    charts: ChartRenderer,
    skipped_polls: u64,
}

impl DashboardController {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_poll: None,
            in_flight: None,
            stats: None,
            view: None,
            charts: ChartRenderer::new(),
            skipped_polls: 0,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn stats(&self) -> Option<&DashboardStats> {
        self.stats.as_ref()
    }

    pub fn view(&self) -> Option<&DashboardView> {
        self.view.as_ref()
    }

    pub fn charts(&self) -> &ChartRenderer {
        &self.charts
    }

    pub fn charts_mut(&mut self) -> &mut ChartRenderer {
        &mut self.charts
    }

    pub fn next_poll(&self) -> Option<Instant> {
        self.next_poll
    }

    pub fn skipped_polls(&self) -> u64 {
        self.skipped_polls
    }

    /// Makes the next `tick` fetch immediately. Does nothing once started.
    pub fn start(&mut self, now: Instant) {
        if self.next_poll.is_none() {
            self.next_poll = Some(now);
        }
    }

    pub fn tick(&mut self, now: Instant, backend: &Arc<dyn Backend>, notifier: &mut dyn Notifier) {
        self.collect(notifier);

        let Some(due) = self.next_poll else {
            return;
        };
        if now < due {
            return;
        }

        // Missed ticks (suspended machine, long frame) collapse into one.
        let mut next = due + self.interval;
        while next <= now {
            next += self.interval;
        }
        self.next_poll = Some(next);

        self.fetch(backend, notifier);
    }

    /// Fetch outside the schedule; the periodic ticks are not shifted.
    pub fn refresh_now(&mut self, backend: &Arc<dyn Backend>, notifier: &mut dyn Notifier) -> bool {
        self.fetch(backend, notifier)
    }

    /// Applies a finished fetch, if any.
    pub fn collect(&mut self, notifier: &mut dyn Notifier) {
        let Some(result) = self.in_flight.as_ref().and_then(Task::try_take) else {
            return;
        };
        self.in_flight = None;

        match result {
            Ok(stats) => self.apply(stats),
            Err(err) => report_failure(&err, notifier),
        }
    }

    /// Forgets everything shown so far. The schedule keeps running.
    pub fn reset(&mut self) {
        self.stats = None;
        self.view = None;
        self.in_flight = None;
        self.charts.clear();
    }

    fn fetch(&mut self, backend: &Arc<dyn Backend>, notifier: &mut dyn Notifier) -> bool {
        if self.in_flight.is_some() {
            self.skipped_polls += 1;
            debug!(skipped = self.skipped_polls, "dashboard fetch still running, skipping tick");
            return false;
        }

        let backend = Arc::clone(backend);
        match Task::spawn("dashboard-stats", move || backend.dashboard_stats()) {
            Ok(task) => {
                self.in_flight = Some(task);
                true
            }
            Err(err) => {
                report_failure(&err, notifier);
                false
            }
        }
    }

    fn apply(&mut self, stats: DashboardStats) {
        debug!(
            students = stats.stats.total_students,
            activity = stats.recent_activity.len(),
            "dashboard stats refreshed"
        );
        self.view = Some(DashboardView::build(&stats));
        self.charts.render(&stats);
        self.stats = Some(stats);
    }
}

fn report_failure(err: &ApiError, notifier: &mut dyn Notifier) {
    if err.is_server() {
        warn!(%err, "dashboard stats rejected");
        notifier.notify(
            NotificationKind::Error,
            "Dashboard Error",
            &err.message_or("Failed to load dashboard statistics."),
        );
    } else {
        error!(%err, "dashboard stats request failed");
        notifier.notify(
            NotificationKind::Error,
            "Dashboard Error",
            "Failed to load dashboard data. Please check your connection.",
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockBackend;
    use crate::feedback::NotificationCenter;
    use crate::models::StatsSummary;
    use crate::task::wait_until;

    const INTERVAL: Duration = Duration::from_secs(30);

    fn backend() -> (Arc<MockBackend>, Arc<dyn Backend>) {
        let mock = Arc::new(MockBackend::new());
        let backend: Arc<dyn Backend> = mock.clone();
        (mock, backend)
    }

    fn stats(total: u64) -> DashboardStats {
        DashboardStats {
            stats: StatsSummary {
                total_students: total,
                ..StatsSummary::default()
            },
            ..DashboardStats::default()
        }
    }

    fn settle(controller: &mut DashboardController, notes: &mut NotificationCenter) {
        wait_until(|| {
            controller.collect(notes);
            !controller.is_loading()
        });
    }

    #[test]
    fn fetches_on_start_then_every_interval() {
        let (mock, backend) = backend();
        mock.reply_stats(Ok(stats(1)));
        mock.reply_stats(Ok(stats(2)));
        let mut notes = NotificationCenter::new(Duration::from_secs(60));
        let mut dashboard = DashboardController::new(INTERVAL);
        let t0 = Instant::now();

        dashboard.tick(t0, &backend, &mut notes);
        assert_eq!(mock.stats_calls(), 0);

        dashboard.start(t0);
        dashboard.tick(t0, &backend, &mut notes);
        settle(&mut dashboard, &mut notes);
        assert_eq!(mock.stats_calls(), 1);
        assert_eq!(dashboard.next_poll(), Some(t0 + INTERVAL));
        assert_eq!(dashboard.view().unwrap().cards[0].value, "1");

        dashboard.tick(t0 + Duration::from_secs(29), &backend, &mut notes);
        assert_eq!(mock.stats_calls(), 1);

        dashboard.tick(t0 + INTERVAL, &backend, &mut notes);
        settle(&mut dashboard, &mut notes);
        assert_eq!(mock.stats_calls(), 2);
        assert_eq!(dashboard.view().unwrap().cards[0].value, "2");
        assert_eq!(dashboard.charts().grades.live_count(), 1);
        assert_eq!(dashboard.charts().grades.disposed(), 1);
    }

    #[test]
    fn failed_fetch_keeps_view_and_schedule() {
        let (mock, backend) = backend();
        mock.reply_stats(Ok(stats(7)));
        mock.reply_stats(Err(ApiError::Transport("connection reset".to_string())));
        mock.reply_stats(Ok(stats(8)));
        let mut notes = NotificationCenter::new(Duration::from_secs(60));
        let mut dashboard = DashboardController::new(INTERVAL);
        let t0 = Instant::now();

        dashboard.start(t0);
        dashboard.tick(t0, &backend, &mut notes);
        settle(&mut dashboard, &mut notes);
        let before = dashboard.view().cloned();

        dashboard.tick(t0 + INTERVAL, &backend, &mut notes);
        settle(&mut dashboard, &mut notes);
        assert_eq!(dashboard.view().cloned(), before);
        assert_eq!(notes.last().unwrap().title, "Dashboard Error");
        assert_eq!(dashboard.next_poll(), Some(t0 + INTERVAL * 2));

        dashboard.tick(t0 + INTERVAL * 2, &backend, &mut notes);
        settle(&mut dashboard, &mut notes);
        assert_eq!(mock.stats_calls(), 3);
        assert_eq!(dashboard.view().unwrap().cards[0].value, "8");
    }

    #[test]
    fn server_rejection_shows_server_text() {
        let (mock, backend) = backend();
        mock.reply_stats(Err(ApiError::Server {
            status: 500,
            message: Some("database is locked".to_string()),
        }));
        let mut notes = NotificationCenter::new(Duration::from_secs(60));
        let mut dashboard = DashboardController::new(INTERVAL);

        dashboard.refresh_now(&backend, &mut notes);
        settle(&mut dashboard, &mut notes);

        assert_eq!(notes.last().unwrap().message, "database is locked");
        assert!(dashboard.view().is_none());
    }

    #[test]
    fn tick_during_slow_fetch_is_skipped() {
        let (mock, backend) = backend();
        let release = mock.hold_stats();
        mock.reply_stats(Ok(stats(3)));
        let mut notes = NotificationCenter::new(Duration::from_secs(60));
        let mut dashboard = DashboardController::new(INTERVAL);
        let t0 = Instant::now();

        dashboard.start(t0);
        dashboard.tick(t0, &backend, &mut notes);
        dashboard.tick(t0 + INTERVAL, &backend, &mut notes);
        assert!(!dashboard.refresh_now(&backend, &mut notes));
        assert_eq!(dashboard.skipped_polls(), 2);
        assert_eq!(dashboard.next_poll(), Some(t0 + INTERVAL * 2));

        release.send(()).unwrap();
        settle(&mut dashboard, &mut notes);
        assert_eq!(mock.stats_calls(), 1);
        assert_eq!(dashboard.view().unwrap().cards[0].value, "3");
    }

    #[test]
    fn missed_ticks_collapse() {
        let (mock, backend) = backend();
        mock.reply_stats(Ok(stats(1)));
        let mut notes = NotificationCenter::new(Duration::from_secs(60));
        let mut dashboard = DashboardController::new(INTERVAL);
        let t0 = Instant::now();

        dashboard.start(t0);
        dashboard.tick(t0 + Duration::from_secs(95), &backend, &mut notes);
        settle(&mut dashboard, &mut notes);

        assert_eq!(mock.stats_calls(), 1);
        assert_eq!(dashboard.next_poll(), Some(t0 + INTERVAL * 4));
    }

    #[test]
    fn reset_clears_view_and_charts() {
        let (mock, backend) = backend();
        mock.reply_stats(Ok(stats(5)));
        let mut notes = NotificationCenter::new(Duration::from_secs(60));
        let mut dashboard = DashboardController::new(INTERVAL);

        dashboard.refresh_now(&backend, &mut notes);
        settle(&mut dashboard, &mut notes);
        dashboard.reset();

        assert!(dashboard.view().is_none());
        assert!(dashboard.stats().is_none());
        assert_eq!(dashboard.charts().history.live_count(), 0);
    }
}
