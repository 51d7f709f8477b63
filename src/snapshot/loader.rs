//! JSON snapshot loader for project and task exports.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::models::{Project, Task};

/// Errors raised while materializing a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A records file is either a bare array or the `{"data": [...]}` wrapper
/// that API responses and dashboard exports use.
#[derive(Deserialize)]
#[serde(untagged)]
enum RecordsFile<T> {
    Plain(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> RecordsFile<T> {
    fn into_records(self) -> Vec<T> {
        match self {
            RecordsFile::Plain(records) => records,
            RecordsFile::Wrapped { data } => data,
        }
    }
}

/// The full, unfiltered record collections the engine computes over.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub projects: Vec<Project>,
    pub tasks: Vec<Task>,
}

impl Snapshot {
    /// Load both collections from their export files.
    pub fn load(projects_path: &Path, tasks_path: &Path) -> Result<Self, SnapshotError> {
        let projects: Vec<Project> = load_records(projects_path)?;
        let tasks: Vec<Task> = load_records(tasks_path)?;

        info!(
            "Loaded snapshot: {} projects, {} tasks",
            projects.len(),
            tasks.len()
        );

        Ok(Self { projects, tasks })
    }

    /// Display name for the project a task belongs to.
    ///
    /// Tasks referencing a project that no longer exists (or none at all)
    /// map to a sentinel so they still show up in per-project rollups.
    pub fn project_name(&self, task: &Task) -> &str {
        task.project_id
            .as_deref()
            .and_then(|id| self.projects.iter().find(|p| p.id == id))
            .map(|p| p.name.as_str())
            .unwrap_or("Unknown Project")
    }
}

fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, SnapshotError> {
    debug!("Reading records from {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let file: RecordsFile<T> =
        serde_json::from_str(&content).map_err(|source| SnapshotError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(file.into_records())
}
