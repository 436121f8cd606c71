//! Build scheduling.
//!
//! Scheduling is fire-and-forget: the scheduler enqueues and returns. No
//! outcome is awaited or inspected.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::actions::{BuildAction, BuildCause};
use crate::error::Result;
use crate::registry::Project;

/// Capability to enqueue builds.
pub trait BuildScheduler {
    fn schedule_build(
        &self,
        project: &Project,
        delay_secs: u64,
        cause: &BuildCause,
        actions: Vec<BuildAction>,
    ) -> Result<()>;
}

/// One queued build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueItem {
    pub project: String,
    pub delay_secs: u64,
    pub cause: BuildCause,
    pub actions: Vec<BuildAction>,
    pub queued_at: DateTime<Utc>,
}

impl QueueItem {
    pub fn has_action(&self, action: &BuildAction) -> bool {
        self.actions.contains(action)
    }
}

/// Append-only JSON-lines queue file.
#[derive(Debug, Clone)]
pub struct FileQueue {
    path: PathBuf,
}

impl FileQueue {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Every queued build, oldest first.
    pub fn items(&self) -> Result<Vec<QueueItem>> {
        if !self.path.is_file() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| Ok(serde_json::from_str(line)?))
            .collect()
    }
}

impl BuildScheduler for FileQueue {
    fn schedule_build(
        &self,
        project: &Project,
        delay_secs: u64,
        cause: &BuildCause,
        actions: Vec<BuildAction>,
    ) -> Result<()> {
        let item = QueueItem {
            project: project.name.clone(),
            delay_secs,
            cause: cause.clone(),
            actions,
            queued_at: Utc::now(),
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", serde_json::to_string(&item)?)?;
        debug!(
            "Queued build of {} ({}): {}",
            item.project,
            item.cause,
            item.actions
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProjectConfig;

    #[test]
    fn test_schedule_appends_items() {
        let temp = tempfile::tempdir().unwrap();
        let queue = FileQueue::new(temp.path().join("state").join("queue.jsonl"));
        assert!(queue.items().unwrap().is_empty());

        let project = Project::new("core", ProjectConfig::default());
        let cause = BuildCause::User {
            name: "admin".to_string(),
        };
        queue
            .schedule_build(&project, 0, &cause, vec![BuildAction::LayoutLogic])
            .unwrap();
        queue
            .schedule_build(&project, 5, &cause, vec![BuildAction::CheckoutSkip])
            .unwrap();

        let items = queue.items().unwrap();
        assert_eq!(items.len(), 2);
        assert!(items[0].has_action(&BuildAction::LayoutLogic));
        assert_eq!(items[1].delay_secs, 5);
        assert_eq!(items[1].cause, cause);
    }
}
