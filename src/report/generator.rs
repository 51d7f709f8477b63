//! Markdown report generation.
//!
//! This module renders the computed metrics into a Markdown report (or raw
//! JSON). It consumes `AnalyticsResult` fields directly and recomputes
//! nothing itself.

use anyhow::{Context, Result};
use std::collections::HashMap;

use crate::config::ReportConfig;
use crate::models::{MonthBucket, Report, ReportMetadata, TaskStatus};
use crate::snapshot::Snapshot;

/// Generate a complete Markdown report.
pub fn generate_markdown_report(
    report: &Report,
    snapshot: &Snapshot,
    config: &ReportConfig,
) -> String {
    let mut output = String::new();

    // Title
    output.push_str("# Shipstats Report\n\n");

    // Metadata section
    output.push_str(&generate_metadata_section(&report.metadata));

    // Performance snapshot
    output.push_str(&generate_snapshot_section(report));

    if config.include_status_counts {
        output.push_str(&generate_status_section(report));
    }

    // Project efficiency
    output.push_str(&generate_efficiency_section(report));

    if config.include_distributions {
        output.push_str(&generate_distribution_section(report));
    }

    if config.include_cadence {
        output.push_str(&generate_cadence_section(report));
    }

    // Time & effort
    output.push_str(&generate_effort_section(report));

    if config.include_task_rollup {
        output.push_str(&generate_task_rollup_section(snapshot));
    }

    // Footer
    output.push_str(&generate_footer());

    output
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize report to JSON")
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!(
        "- **Reference Date:** {}\n",
        metadata.reference_date
    ));
    section.push_str(&format!(
        "- **Cadence Window:** {}\n",
        metadata.cadence_window
    ));
    section.push_str(&format!("- **Projects:** {}\n", metadata.projects_total));
    section.push_str(&format!("- **Tasks:** {}\n", metadata.tasks_total));
    section.push('\n');

    section
}

/// Generate the performance snapshot section.
fn generate_snapshot_section(report: &Report) -> String {
    let metrics = &report.metrics;
    let mut section = String::new();

    section.push_str("## Performance Snapshot\n\n");
    section.push_str("| Completion Rate | Drop Rate | Avg Days to Ship | Longest Running |\n");
    section.push_str("|:---:|:---:|:---:|:---:|\n");
    section.push_str(&format!(
        "| {}% | {}% | {}d | {}d |\n\n",
        metrics.completion_rate, metrics.drop_rate, metrics.avg_build_time, metrics.longest_running
    ));

    section
}

/// Generate the status-count table.
fn generate_status_section(report: &Report) -> String {
    let counts = &report.metrics.status_counts;
    let mut section = String::new();

    section.push_str("### Projects by Status\n\n");
    section.push_str("| Started | Not Started | In Progress | Completed | Dropped |\n");
    section.push_str("|:---:|:---:|:---:|:---:|:---:|\n");
    section.push_str(&format!(
        "| {} | {} | {} | {} | {} |\n\n",
        counts.started, counts.not_started, counts.active, counts.completed, counts.dropped
    ));

    section
}

/// Generate the difficulty-vs-days efficiency table.
fn generate_efficiency_section(report: &Report) -> String {
    let mut section = String::new();

    section.push_str("## Project Efficiency\n\n");
    section.push_str("How long you take to ship, by difficulty.\n\n");
    section.push_str("| Difficulty | Avg Days |\n");
    section.push_str("|:---|:---:|\n");

    for entry in &report.metrics.difficulty_time_series {
        section.push_str(&format!("| {} | {} |\n", entry.label, entry.days));
    }
    section.push('\n');

    section
}

/// Generate the difficulty distribution tables.
fn generate_distribution_section(report: &Report) -> String {
    let mut section = String::new();

    section.push_str("## Difficulty Split\n\n");
    section.push_str("| Difficulty | Projects | Tasks |\n");
    section.push_str("|:---|:---:|:---:|\n");

    let projects = &report.metrics.project_difficulty_distribution;
    let tasks = &report.metrics.task_difficulty_distribution;
    for (project_slice, task_slice) in projects.iter().zip(tasks.iter()) {
        section.push_str(&format!(
            "| {} | {} | {} |\n",
            project_slice.label, project_slice.count, task_slice.count
        ));
    }
    section.push('\n');

    section
}

/// Generate the monthly cadence and volume tables.
fn generate_cadence_section(report: &Report) -> String {
    let mut section = String::new();

    section.push_str("## Shipping Cadence\n\n");
    section.push_str("Projects completed per month.\n\n");
    section.push_str(&month_table(&report.metrics.monthly_cadence));

    section.push_str("## Execution Volume\n\n");
    section.push_str("Logged hours per month, completed tasks.\n\n");
    section.push_str(&month_table(&report.metrics.execution_volume));

    section
}

fn month_table(buckets: &[MonthBucket]) -> String {
    let mut table = String::new();

    table.push('|');
    for bucket in buckets {
        table.push_str(&format!(" {} |", bucket.label));
    }
    table.push('\n');

    table.push('|');
    for _ in buckets {
        table.push_str(":---:|");
    }
    table.push('\n');

    table.push('|');
    for bucket in buckets {
        table.push_str(&format!(" {} |", bucket.value));
    }
    table.push_str("\n\n");

    table
}

/// Generate the task time and estimation section.
fn generate_effort_section(report: &Report) -> String {
    let metrics = &report.metrics;
    let mut section = String::new();

    section.push_str("## Time & Effort\n\n");
    section.push_str(&format!(
        "- **Avg Task Time:** {}h per completed task\n",
        metrics.avg_task_time
    ));
    section.push_str(&format!(
        "- **Total Hours Logged:** {}h\n",
        metrics.total_hours_logged
    ));
    section.push_str(&format!(
        "- **Estimation Accuracy:** {}%\n",
        metrics.est_accuracy_percent
    ));
    section.push_str(&format!("- **Estimation Gap:** {}\n", metrics.est_gap_label));
    section.push('\n');

    section
}

/// Generate the per-project task rollup.
///
/// Tasks whose project no longer exists are listed under "Unknown Project"
/// rather than dropped.
fn generate_task_rollup_section(snapshot: &Snapshot) -> String {
    if snapshot.tasks.is_empty() {
        return String::new();
    }

    let mut totals: HashMap<&str, (usize, usize)> = HashMap::new();
    for task in &snapshot.tasks {
        let entry = totals.entry(snapshot.project_name(task)).or_default();
        entry.0 += 1;
        if task.status == TaskStatus::Completed {
            entry.1 += 1;
        }
    }

    let mut rows: Vec<(&str, (usize, usize))> = totals.into_iter().collect();
    rows.sort_by_key(|(name, (total, _))| (std::cmp::Reverse(*total), name.to_string()));

    let mut section = String::new();
    section.push_str("## Task Load by Project\n\n");
    section.push_str("| Project | Tasks | Completed |\n");
    section.push_str("|:---|:---:|:---:|\n");
    for (name, (total, completed)) in rows {
        section.push_str(&format!("| {} | {} | {} |\n", name, total, completed));
    }
    section.push('\n');

    section
}

/// Generate the report footer.
fn generate_footer() -> String {
    format!(
        "---\n\n*Generated by shipstats v{}*\n",
        env!("CARGO_PKG_VERSION")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::{compute_analytics, AnalyticsOptions};
    use crate::models::{Difficulty, Priority, Project, ProjectStatus, Task};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn make_snapshot() -> Snapshot {
        let project = Project {
            id: "p1".to_string(),
            name: "Portfolio".to_string(),
            category: "Web".to_string(),
            difficulty: Difficulty::Easy,
            status: ProjectStatus::Completed,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            start_date: None,
            due_date: NaiveDate::from_ymd_opt(2024, 3, 1),
            expected_days: None,
            actual_days: Some(12.0),
        };
        let owned_task = Task {
            id: "t1".to_string(),
            project_id: Some("p1".to_string()),
            title: "Landing page".to_string(),
            difficulty: Difficulty::Easy,
            priority: Priority::High,
            status: TaskStatus::Completed,
            due_date: None,
            estimated_hours: Some(3.0),
            actual_hours: Some(4.0),
            completion_type: None,
            completed_at: Some(Utc.with_ymd_and_hms(2024, 3, 2, 9, 0, 0).unwrap()),
            updated_at: None,
        };
        let orphan_task = Task {
            id: "t2".to_string(),
            project_id: Some("ghost".to_string()),
            title: "Orphaned".to_string(),
            difficulty: Difficulty::Hard,
            priority: Priority::Low,
            status: TaskStatus::NotStarted,
            due_date: None,
            estimated_hours: None,
            actual_hours: None,
            completion_type: None,
            completed_at: None,
            updated_at: None,
        };
        Snapshot {
            projects: vec![project],
            tasks: vec![owned_task, orphan_task],
        }
    }

    fn make_report(snapshot: &Snapshot) -> Report {
        let reference = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let opts = AnalyticsOptions::new(reference);
        let metrics = compute_analytics(&snapshot.projects, &snapshot.tasks, &opts);
        Report {
            metadata: ReportMetadata {
                generated_at: Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap(),
                reference_date: reference,
                cadence_window: "full-year".to_string(),
                projects_total: snapshot.projects.len(),
                tasks_total: snapshot.tasks.len(),
            },
            metrics,
        }
    }

    #[test]
    fn test_markdown_report_has_all_sections() {
        let snapshot = make_snapshot();
        let report = make_report(&snapshot);
        let markdown = generate_markdown_report(&report, &snapshot, &ReportConfig::default());

        assert!(markdown.contains("# Shipstats Report"));
        assert!(markdown.contains("## Metadata"));
        assert!(markdown.contains("## Performance Snapshot"));
        assert!(markdown.contains("## Project Efficiency"));
        assert!(markdown.contains("## Difficulty Split"));
        assert!(markdown.contains("## Shipping Cadence"));
        assert!(markdown.contains("## Execution Volume"));
        assert!(markdown.contains("## Time & Effort"));
        assert!(markdown.contains("## Task Load by Project"));
    }

    #[test]
    fn test_section_toggles_respected() {
        let snapshot = make_snapshot();
        let report = make_report(&snapshot);
        let config = ReportConfig {
            include_status_counts: false,
            include_distributions: false,
            include_cadence: false,
            include_task_rollup: false,
        };
        let markdown = generate_markdown_report(&report, &snapshot, &config);

        assert!(!markdown.contains("Projects by Status"));
        assert!(!markdown.contains("Difficulty Split"));
        assert!(!markdown.contains("Shipping Cadence"));
        assert!(!markdown.contains("Task Load by Project"));
        // Core sections are always present.
        assert!(markdown.contains("## Performance Snapshot"));
        assert!(markdown.contains("## Time & Effort"));
    }

    #[test]
    fn test_orphan_tasks_roll_up_under_sentinel() {
        let snapshot = make_snapshot();
        let report = make_report(&snapshot);
        let markdown = generate_markdown_report(&report, &snapshot, &ReportConfig::default());

        assert!(markdown.contains("| Unknown Project | 1 | 0 |"));
        assert!(markdown.contains("| Portfolio | 1 | 1 |"));
    }

    #[test]
    fn test_json_report_round_trips() {
        let snapshot = make_snapshot();
        let report = make_report(&snapshot);
        let json = generate_json_report(&report).unwrap();

        let parsed: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.metrics, report.metrics);
        // camelCase contract for the dashboard consumer.
        assert!(json.contains("\"completionRate\""));
        assert!(json.contains("\"monthlyCadence\""));
    }

    #[test]
    fn test_month_table_shape() {
        let buckets = vec![
            MonthBucket {
                label: "Jan".to_string(),
                value: 2.0,
            },
            MonthBucket {
                label: "Feb".to_string(),
                value: 0.0,
            },
        ];
        let table = month_table(&buckets);
        assert!(table.contains("| Jan | Feb |"));
        assert!(table.contains("| 2 | 0 |"));
    }
}
