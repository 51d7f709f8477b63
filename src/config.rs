//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.shipstats.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::analytics::CadenceWindow;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Snapshot input settings.
    #[serde(default)]
    pub data: DataConfig,

    /// Analytics engine settings.
    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default output file path.
    #[serde(default = "default_output")]
    pub output: String,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            verbose: false,
        }
    }
}

fn default_output() -> String {
    "shipstats_report.md".to_string()
}

/// Where the exported record files live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path to the projects export.
    #[serde(default = "default_projects_path")]
    pub projects: String,

    /// Path to the tasks export.
    #[serde(default = "default_tasks_path")]
    pub tasks: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            projects: default_projects_path(),
            tasks: default_tasks_path(),
        }
    }
}

fn default_projects_path() -> String {
    "projects.json".to_string()
}

fn default_tasks_path() -> String {
    "tasks.json".to_string()
}

/// Month-bucket layout selection for the cadence series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CadenceSetting {
    /// 12 fixed buckets, Jan..Dec across all years.
    #[default]
    FullYear,
    /// The 6 calendar months ending at the reference date.
    Rolling,
}

impl From<CadenceSetting> for CadenceWindow {
    fn from(setting: CadenceSetting) -> Self {
        match setting {
            CadenceSetting::FullYear => CadenceWindow::FullYear,
            CadenceSetting::Rolling => CadenceWindow::RollingSixMonths,
        }
    }
}

/// Analytics engine settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Cadence window for the monthly series.
    #[serde(default)]
    pub cadence: CadenceSetting,
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Include the status-count table.
    #[serde(default = "default_true")]
    pub include_status_counts: bool,

    /// Include the difficulty distribution tables.
    #[serde(default = "default_true")]
    pub include_distributions: bool,

    /// Include the monthly cadence and volume tables.
    #[serde(default = "default_true")]
    pub include_cadence: bool,

    /// Include the per-project task rollup.
    #[serde(default = "default_true")]
    pub include_task_rollup: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            include_status_counts: true,
            include_distributions: true,
            include_cadence: true,
            include_task_rollup: true,
        }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but
    /// can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".shipstats.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings. Optional
    /// arguments only override when explicitly provided.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref projects) = args.projects {
            self.data.projects = projects.display().to_string();
        }
        if let Some(ref tasks) = args.tasks {
            self.data.tasks = tasks.display().to_string();
        }
        if let Some(ref output) = args.output {
            self.general.output = output.display().to_string();
        }
        if let Some(cadence) = args.cadence {
            self.analytics.cadence = cadence.into();
        }
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.output, "shipstats_report.md");
        assert_eq!(config.data.projects, "projects.json");
        assert_eq!(config.analytics.cadence, CadenceSetting::FullYear);
        assert!(config.report.include_cadence);
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
output = "weekly.md"
verbose = true

[data]
projects = "exports/projects.json"
tasks = "exports/tasks.json"

[analytics]
cadence = "rolling"

[report]
include_cadence = false
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.general.output, "weekly.md");
        assert!(config.general.verbose);
        assert_eq!(config.data.projects, "exports/projects.json");
        assert_eq!(config.analytics.cadence, CadenceSetting::Rolling);
        assert!(!config.report.include_cadence);
        assert!(config.report.include_distributions);
    }

    #[test]
    fn test_cadence_setting_maps_to_window() {
        assert_eq!(
            CadenceWindow::from(CadenceSetting::FullYear),
            CadenceWindow::FullYear
        );
        assert_eq!(
            CadenceWindow::from(CadenceSetting::Rolling),
            CadenceWindow::RollingSixMonths
        );
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[data]"));
        assert!(toml_str.contains("[analytics]"));
        assert!(toml_str.contains("[report]"));
    }
}
