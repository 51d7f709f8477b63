//! Status counts and rate metrics over the project collection.

use crate::models::{Project, ProjectStatus, StatusCounts};

/// Tally projects by status with exact matching.
pub fn status_counts(projects: &[Project]) -> StatusCounts {
    let mut counts = StatusCounts {
        started: projects.len(),
        ..StatusCounts::default()
    };

    for project in projects {
        match project.status {
            ProjectStatus::Completed => counts.completed += 1,
            ProjectStatus::InProgress => counts.active += 1,
            ProjectStatus::Dropped => counts.dropped += 1,
            ProjectStatus::NotStarted => counts.not_started += 1,
        }
    }

    counts
}

/// Percentage of all projects whose status is Completed.
pub fn completion_rate(projects: &[Project]) -> u32 {
    let completed = projects
        .iter()
        .filter(|p| p.status == ProjectStatus::Completed)
        .count();
    percentage(completed, projects.len())
}

/// Percentage of all projects whose status is Dropped.
pub fn drop_rate(projects: &[Project]) -> u32 {
    let dropped = projects
        .iter()
        .filter(|p| p.status == ProjectStatus::Dropped)
        .count();
    percentage(dropped, projects.len())
}

/// Rounded percentage, 0 when the denominator is 0.
pub(crate) fn percentage(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as u32
}
