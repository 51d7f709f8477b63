//! Task-level effort metrics: logged time and estimate-vs-actual
//! reconciliation.

use crate::models::Task;

/// Average logged hours per completed task, to one decimal place.
pub fn avg_task_time(tasks: &[Task]) -> f64 {
    let hours: Vec<f64> = tasks.iter().filter_map(Task::completed_hours).collect();
    if hours.is_empty() {
        return 0.0;
    }
    let mean = hours.iter().sum::<f64>() / hours.len() as f64;
    (mean * 10.0).round() / 10.0
}

/// Total logged hours across completed tasks, unrounded.
pub fn total_hours_logged(tasks: &[Task]) -> f64 {
    tasks.iter().filter_map(Task::completed_hours).sum()
}

/// Summed actual and estimated hours over completed tasks carrying both.
///
/// The two sides are summed independently rather than averaging per-task
/// ratios: that weights the comparison by magnitude and sidesteps per-task
/// division by zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EstimateReconciliation {
    pub total_actual: f64,
    pub total_estimated: f64,
}

impl EstimateReconciliation {
    /// Build the reconciliation from a task collection.
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let mut summary = Self::default();
        for task in tasks {
            if let (Some(actual), Some(estimated)) = (task.completed_hours(), task.estimated_hours)
            {
                summary.total_actual += actual;
                summary.total_estimated += estimated;
            }
        }
        summary
    }

    /// Actual-to-estimated ratio as a rounded percentage.
    ///
    /// Defined as 100 when there is nothing to compare against.
    pub fn accuracy_percent(&self) -> u32 {
        if self.total_estimated == 0.0 {
            return 100;
        }
        (self.total_actual / self.total_estimated * 100.0).round() as u32
    }

    /// Signed gap in hours. Positive means under-estimated (the work took
    /// longer than planned); negative means over-estimated.
    pub fn gap(&self) -> f64 {
        self.total_actual - self.total_estimated
    }

    /// Display form of the gap: `+5h (Over)` or `-3h (Under)`.
    ///
    /// A negative gap already carries its sign, so only the Over branch
    /// prepends one. Zero lands in the Under branch.
    pub fn gap_label(&self) -> String {
        let gap = self.gap();
        if gap > 0.0 {
            format!("+{}h (Over)", gap)
        } else {
            format!("{}h (Under)", gap)
        }
    }
}
