//! Data models for the analytics engine.
//!
//! This module contains the input record types (projects and tasks, as
//! exported by the tracker) and the output types that make up an
//! [`AnalyticsResult`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Difficulty level of a project or task.
///
/// The ordering is total (Easy < Medium < Hard) and is the single source of
/// truth for every difficulty-keyed series and distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// Quick wins, small scope
    Easy,
    /// Standard scope
    Medium,
    /// Large or uncertain scope
    Hard,
}

impl Difficulty {
    /// All levels in their fixed display order.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

/// Lifecycle status of a project.
///
/// Not a state machine: any status may be set directly, and matching is
/// exact string equality on the serialized labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectStatus {
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Dropped,
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectStatus::NotStarted => write!(f, "Not Started"),
            ProjectStatus::InProgress => write!(f, "In Progress"),
            ProjectStatus::Completed => write!(f, "Completed"),
            ProjectStatus::Dropped => write!(f, "Dropped"),
        }
    }
}

/// Board status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    Review,
    Completed,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::NotStarted => write!(f, "Not Started"),
            TaskStatus::InProgress => write!(f, "In Progress"),
            TaskStatus::Review => write!(f, "Review"),
            TaskStatus::Completed => write!(f, "Completed"),
        }
    }
}

/// Priority of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// How a task was closed out when it was marked Completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionType {
    /// Fully executed as planned
    Full,
    /// Marked done before all the work was finished
    Partial,
}

/// A tracked project, as stored by the tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Opaque unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-form category label (Web, App, AI, College, Client, ...).
    #[serde(default)]
    pub category: String,
    pub difficulty: Difficulty,
    pub status: ProjectStatus,
    /// Set at creation, immutable thereafter.
    pub created_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub due_date: Option<NaiveDate>,
    /// Duration estimate supplied at creation/edit, in days.
    #[serde(default)]
    pub expected_days: Option<f64>,
    /// Realized duration in days; only meaningful when status is Completed.
    #[serde(default)]
    pub actual_days: Option<f64>,
}

impl Project {
    /// Realized duration, present only for completed projects.
    ///
    /// A Completed project missing `actual_days` yields `None` so it drops
    /// out of duration averages rather than pulling them toward zero.
    pub fn completed_days(&self) -> Option<f64> {
        if self.status == ProjectStatus::Completed {
            self.actual_days
        } else {
            None
        }
    }

    /// The date a shipped project is bucketed under for cadence charts.
    ///
    /// Projects carry no completion or update timestamp, so the due date
    /// stands in as the shipping date.
    pub fn ship_date(&self) -> Option<NaiveDate> {
        self.due_date
    }
}

/// A task on the board, as stored by the tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Opaque unique identifier.
    pub id: String,
    /// Owning project. May reference a project that no longer exists;
    /// such tasks still count in every task-level aggregate.
    #[serde(default)]
    pub project_id: Option<String>,
    /// Display title.
    pub title: String,
    pub difficulty: Difficulty,
    pub priority: Priority,
    pub status: TaskStatus,
    #[serde(default, deserialize_with = "lenient_date")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub estimated_hours: Option<f64>,
    #[serde(default)]
    pub actual_hours: Option<f64>,
    /// Set when the task is marked Completed.
    #[serde(default)]
    pub completion_type: Option<CompletionType>,
    /// Set on completion, cleared when the task leaves Completed. A save
    /// that keeps the task Completed preserves the original timestamp.
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Last modification timestamp written by the tracker.
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Logged hours, present only for completed tasks.
    pub fn completed_hours(&self) -> Option<f64> {
        if self.status == TaskStatus::Completed {
            self.actual_hours
        } else {
            None
        }
    }

    /// The date this task is bucketed under for monthly series.
    ///
    /// Priority order: completion timestamp, then last-updated timestamp,
    /// then due date. A task with none of the three is left out of the
    /// series entirely.
    pub fn event_date(&self) -> Option<NaiveDate> {
        self.completed_at
            .map(|ts| ts.date_naive())
            .or_else(|| self.updated_at.map(|ts| ts.date_naive()))
            .or(self.due_date)
    }
}

/// Deserialize an optional date, treating anything unparseable as absent.
///
/// Exported rows occasionally carry a full timestamp in a date column, so
/// RFC 3339 is accepted alongside plain `YYYY-MM-DD`.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_date))
}

/// Deserialize an optional timestamp, treating anything unparseable as absent.
fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .as_deref()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc)))
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
}

/// Exact-match tallies over the project status field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    /// All projects ever started (the full collection).
    pub started: usize,
    pub completed: usize,
    /// Projects currently In Progress.
    pub active: usize,
    pub dropped: usize,
    pub not_started: usize,
}

/// One bar of the difficulty-vs-days efficiency chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyDays {
    pub label: String,
    pub days: u32,
}

/// One slice of a difficulty donut chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyCount {
    pub label: String,
    pub count: usize,
}

/// One bar of a monthly cadence/volume chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthBucket {
    pub label: String,
    pub value: f64,
}

/// Every derived metric and chart series, computed in one pass.
///
/// Serializes with camelCase keys, matching what the dashboard consumes.
/// The presentation layer reads these fields directly and performs no
/// recomputation of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResult {
    /// Percentage of all projects whose status is Completed.
    pub completion_rate: u32,
    /// Percentage of all projects whose status is Dropped.
    pub drop_rate: u32,
    pub status_counts: StatusCounts,
    /// Average days to ship a completed project, rounded.
    pub avg_build_time: u32,
    /// Largest `actual_days` across all projects, missing treated as 0.
    pub longest_running: u32,
    /// Average logged hours per completed task, one decimal place.
    pub avg_task_time: f64,
    /// Total logged hours across completed tasks, unrounded.
    pub total_hours_logged: f64,
    /// Summed actual vs summed estimated hours, as a percentage.
    pub est_accuracy_percent: u32,
    /// Signed hours: positive means work took longer than estimated.
    pub est_gap: f64,
    /// Display form of the gap, e.g. `+5h (Over)` or `-3h (Under)`.
    pub est_gap_label: String,
    /// Avg days by difficulty, always 3 entries, Easy → Medium → Hard.
    pub difficulty_time_series: Vec<DifficultyDays>,
    /// Always 3 entries, Easy → Medium → Hard.
    pub project_difficulty_distribution: Vec<DifficultyCount>,
    /// Always 3 entries, Easy → Medium → Hard.
    pub task_difficulty_distribution: Vec<DifficultyCount>,
    /// Completed projects per month; 12 entries in full-calendar mode,
    /// 6 in rolling mode.
    pub monthly_cadence: Vec<MonthBucket>,
    /// Logged hours per month over completed tasks; same bucket layout
    /// as `monthly_cadence`.
    pub execution_volume: Vec<MonthBucket>,
}

/// Metadata about a generated report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Reference date the rolling window (if any) was anchored to.
    pub reference_date: NaiveDate,
    /// Cadence window used for the monthly series.
    pub cadence_window: String,
    /// Number of project records in the snapshot.
    pub projects_total: usize,
    /// Number of task records in the snapshot.
    pub tasks_total: usize,
}

/// The complete analytics report: metadata plus the computed metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub metrics: AnalyticsResult,
}
