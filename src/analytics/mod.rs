//! The analytics aggregation engine.
//!
//! Pure, synchronous computation over in-memory snapshots. Every metric and
//! chart series the dashboard shows is derived here, in one pass, with no
//! state carried between invocations. The rolling-window reference date is
//! an explicit parameter; nothing in this module reads the system clock.

pub mod cadence;
pub mod distribution;
pub mod duration;
pub mod estimation;
pub mod rates;

pub use cadence::CadenceWindow;
pub use estimation::EstimateReconciliation;

use chrono::NaiveDate;

use crate::models::{AnalyticsResult, Project, Task};

/// Knobs for a single engine invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyticsOptions {
    /// Month-bucket layout for the cadence and volume series.
    pub window: CadenceWindow,
    /// "Now" for the rolling window, supplied by the caller so runs are
    /// reproducible and independently testable.
    pub reference: NaiveDate,
}

impl AnalyticsOptions {
    /// Default full-calendar layout anchored at the given date.
    pub fn new(reference: NaiveDate) -> Self {
        Self {
            window: CadenceWindow::FullYear,
            reference,
        }
    }

    pub fn with_window(mut self, window: CadenceWindow) -> Self {
        self.window = window;
        self
    }
}

/// Derive every metric and series from a snapshot of the records.
///
/// Total over its input domain: empty collections are fine, and every rate
/// and average degrades to 0 (estimation accuracy to 100) rather than
/// dividing by zero.
pub fn compute_analytics(
    projects: &[Project],
    tasks: &[Task],
    opts: &AnalyticsOptions,
) -> AnalyticsResult {
    let reconciliation = EstimateReconciliation::from_tasks(tasks);

    AnalyticsResult {
        completion_rate: rates::completion_rate(projects),
        drop_rate: rates::drop_rate(projects),
        status_counts: rates::status_counts(projects),
        avg_build_time: duration::avg_build_time(projects),
        longest_running: duration::longest_running(projects),
        avg_task_time: estimation::avg_task_time(tasks),
        total_hours_logged: estimation::total_hours_logged(tasks),
        est_accuracy_percent: reconciliation.accuracy_percent(),
        est_gap: reconciliation.gap(),
        est_gap_label: reconciliation.gap_label(),
        difficulty_time_series: duration::difficulty_time_series(projects),
        project_difficulty_distribution: distribution::project_difficulty_distribution(projects),
        task_difficulty_distribution: distribution::task_difficulty_distribution(tasks),
        monthly_cadence: cadence::shipping_cadence(projects, opts.window, opts.reference),
        execution_volume: cadence::execution_volume(tasks, opts.window, opts.reference),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Difficulty, Priority, ProjectStatus, TaskStatus};
    use chrono::{TimeZone, Utc};

    fn opts() -> AnalyticsOptions {
        AnalyticsOptions::new(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
    }

    fn make_project(
        status: ProjectStatus,
        difficulty: Difficulty,
        actual_days: Option<f64>,
    ) -> Project {
        Project {
            id: "p1".to_string(),
            name: "Test Project".to_string(),
            category: "Web".to_string(),
            difficulty,
            status,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            start_date: None,
            due_date: None,
            expected_days: None,
            actual_days,
        }
    }

    fn make_task(status: TaskStatus, actual: Option<f64>, estimated: Option<f64>) -> Task {
        Task {
            id: "t1".to_string(),
            project_id: Some("missing-project".to_string()),
            title: "Test Task".to_string(),
            difficulty: Difficulty::Medium,
            priority: Priority::High,
            status,
            due_date: None,
            estimated_hours: estimated,
            actual_hours: actual,
            completion_type: None,
            completed_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_empty_input_degrades_to_zero() {
        let result = compute_analytics(&[], &[], &opts());
        assert_eq!(result.completion_rate, 0);
        assert_eq!(result.drop_rate, 0);
        assert_eq!(result.avg_build_time, 0);
        assert_eq!(result.longest_running, 0);
        assert_eq!(result.avg_task_time, 0.0);
        assert_eq!(result.total_hours_logged, 0.0);
        // Nothing to compare: treated as perfectly on estimate.
        assert_eq!(result.est_accuracy_percent, 100);
        assert_eq!(result.est_gap, 0.0);
        assert_eq!(result.difficulty_time_series.len(), 3);
        assert_eq!(result.project_difficulty_distribution.len(), 3);
        assert_eq!(result.task_difficulty_distribution.len(), 3);
        assert_eq!(result.monthly_cadence.len(), 12);
        assert_eq!(result.execution_volume.len(), 12);
    }

    #[test]
    fn test_rolling_window_series_have_six_entries() {
        let options = opts().with_window(CadenceWindow::RollingSixMonths);
        let result = compute_analytics(&[], &[], &options);
        assert_eq!(result.monthly_cadence.len(), 6);
        assert_eq!(result.execution_volume.len(), 6);
        // Last bucket is the reference month.
        assert_eq!(result.monthly_cadence[5].label, "Jun");
    }

    #[test]
    fn test_known_scenario_end_to_end() {
        let projects = vec![
            make_project(ProjectStatus::Completed, Difficulty::Easy, Some(10.0)),
            make_project(ProjectStatus::Completed, Difficulty::Easy, Some(20.0)),
            make_project(ProjectStatus::Dropped, Difficulty::Hard, None),
        ];
        let tasks = vec![
            make_task(TaskStatus::Completed, Some(5.0), Some(4.0)),
            make_task(TaskStatus::Completed, Some(3.0), Some(3.0)),
        ];

        let result = compute_analytics(&projects, &tasks, &opts());
        assert_eq!(result.completion_rate, 67);
        assert_eq!(result.drop_rate, 33);
        assert_eq!(result.avg_build_time, 15);
        assert_eq!(result.difficulty_time_series[0].days, 15);
        assert_eq!(result.est_accuracy_percent, 114);
        assert_eq!(result.est_gap, 1.0);
        assert_eq!(result.est_gap_label, "+1h (Over)");
        assert_eq!(result.avg_task_time, 4.0);
        assert_eq!(result.total_hours_logged, 8.0);
    }

    #[test]
    fn test_dangling_project_reference_still_counts() {
        let tasks = vec![make_task(TaskStatus::Completed, Some(2.0), None)];
        let result = compute_analytics(&[], &tasks, &opts());
        assert_eq!(result.total_hours_logged, 2.0);
        assert_eq!(result.task_difficulty_distribution[1].count, 1);
    }

    #[test]
    fn test_idempotence_on_identical_input() {
        let projects = vec![
            make_project(ProjectStatus::Completed, Difficulty::Medium, Some(7.0)),
            make_project(ProjectStatus::InProgress, Difficulty::Hard, None),
        ];
        let tasks = vec![make_task(TaskStatus::Completed, Some(3.5), Some(4.0))];

        let first = compute_analytics(&projects, &tasks, &opts());
        let second = compute_analytics(&projects, &tasks, &opts());
        assert_eq!(first, second);
    }
}
