//! Difficulty distributions for donut/pie rendering.

use crate::models::{Difficulty, DifficultyCount, Project, Task};

/// Tally items by difficulty level.
///
/// The output always has 3 entries in Easy → Medium → Hard order; a level
/// with no items keeps its slot with a count of 0.
pub fn difficulty_distribution<T>(
    items: &[T],
    difficulty_of: impl Fn(&T) -> Difficulty,
) -> Vec<DifficultyCount> {
    Difficulty::ALL
        .iter()
        .map(|&level| DifficultyCount {
            label: level.to_string(),
            count: items.iter().filter(|i| difficulty_of(*i) == level).count(),
        })
        .collect()
}

/// Project counts by difficulty, fixed order.
pub fn project_difficulty_distribution(projects: &[Project]) -> Vec<DifficultyCount> {
    difficulty_distribution(projects, |p| p.difficulty)
}

/// Task counts by difficulty, fixed order.
pub fn task_difficulty_distribution(tasks: &[Task]) -> Vec<DifficultyCount> {
    difficulty_distribution(tasks, |t| t.difficulty)
}
