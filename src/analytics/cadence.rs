//! Calendar-month bucketing for trend charts.
//!
//! One generic bucketer backs both the project shipping-cadence chart
//! (count per month) and the task execution-volume chart (hours per month).

use chrono::{Datelike, NaiveDate};

use crate::models::{MonthBucket, Project, ProjectStatus, Task, TaskStatus};

/// Month names in calendar order, used as bucket labels.
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Which set of month buckets a series is built over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CadenceWindow {
    /// 12 buckets, Jan..Dec of no particular year. Records from different
    /// years that share a month merge into one bucket; that denormalization
    /// is the point of the "cadence across project history" view.
    FullYear,
    /// 6 buckets: the calendar months ending at the reference month,
    /// inclusive. Records outside the window are dropped, never wrapped.
    RollingSixMonths,
}

impl CadenceWindow {
    /// Human-readable name, used in report metadata.
    pub fn label(&self) -> &'static str {
        match self {
            CadenceWindow::FullYear => "full-year",
            CadenceWindow::RollingSixMonths => "rolling-6-months",
        }
    }
}

/// Bucket records into calendar months.
///
/// `date_of` picks the event date for each record (a record yielding `None`
/// contributes nothing) and `weight_of` the amount accumulated into its
/// bucket — 1 for counting modes, a field value for sum modes. Placement
/// goes by month-of-year only; the year component is discarded.
pub fn month_buckets<T>(
    records: &[T],
    window: CadenceWindow,
    reference: NaiveDate,
    date_of: impl Fn(&T) -> Option<NaiveDate>,
    weight_of: impl Fn(&T) -> f64,
) -> Vec<MonthBucket> {
    let months: Vec<u32> = match window {
        CadenceWindow::FullYear => (0..12).collect(),
        CadenceWindow::RollingSixMonths => {
            let last = reference.month0();
            (0..6).map(|i| (last + 7 + i) % 12).collect()
        }
    };

    let mut buckets: Vec<MonthBucket> = months
        .iter()
        .map(|&m| MonthBucket {
            label: MONTH_LABELS[m as usize].to_string(),
            value: 0.0,
        })
        .collect();

    for record in records {
        let Some(date) = date_of(record) else { continue };
        if let Some(idx) = months.iter().position(|&m| m == date.month0()) {
            buckets[idx].value += weight_of(record);
        }
    }

    buckets
}

/// Completed projects per month, bucketed by shipping date.
pub fn shipping_cadence(
    projects: &[Project],
    window: CadenceWindow,
    reference: NaiveDate,
) -> Vec<MonthBucket> {
    let shipped: Vec<&Project> = projects
        .iter()
        .filter(|p| p.status == ProjectStatus::Completed && p.due_date.is_some())
        .collect();
    month_buckets(&shipped, window, reference, |p| p.ship_date(), |_| 1.0)
}

/// Logged hours per month over completed tasks.
pub fn execution_volume(
    tasks: &[Task],
    window: CadenceWindow,
    reference: NaiveDate,
) -> Vec<MonthBucket> {
    let logged: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Completed && t.actual_hours.is_some())
        .collect();
    month_buckets(
        &logged,
        window,
        reference,
        |t| t.event_date(),
        |t| t.actual_hours.unwrap_or(0.0),
    )
}
