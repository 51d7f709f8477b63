//! Duration metrics from completed projects.

use crate::models::{Difficulty, DifficultyDays, Project};

/// Average days to ship, over completed projects that recorded a duration.
///
/// Completed projects missing `actual_days` are excluded from both sides of
/// the average, not counted as zero.
pub fn avg_build_time(projects: &[Project]) -> u32 {
    let durations: Vec<f64> = projects.iter().filter_map(Project::completed_days).collect();
    rounded_mean(&durations)
}

/// Largest `actual_days` value across the whole collection.
///
/// Deliberately scans all projects rather than just completed ones: a stray
/// duration on an in-flight or dropped project still counts, matching the
/// tracker's most complete dashboard variant.
pub fn longest_running(projects: &[Project]) -> u32 {
    projects
        .iter()
        .map(|p| p.actual_days.unwrap_or(0.0))
        .fold(0.0, f64::max)
        .round() as u32
}

/// Average ship time per difficulty level.
///
/// Always 3 entries in Easy → Medium → Hard order, never reordered by value;
/// a level with no qualifying projects reports 0 days.
pub fn difficulty_time_series(projects: &[Project]) -> Vec<DifficultyDays> {
    Difficulty::ALL
        .iter()
        .map(|&level| {
            let durations: Vec<f64> = projects
                .iter()
                .filter(|p| p.difficulty == level)
                .filter_map(Project::completed_days)
                .collect();
            DifficultyDays {
                label: level.to_string(),
                days: rounded_mean(&durations),
            }
        })
        .collect()
}

fn rounded_mean(values: &[f64]) -> u32 {
    if values.is_empty() {
        return 0;
    }
    (values.iter().sum::<f64>() / values.len() as f64).round() as u32
}
