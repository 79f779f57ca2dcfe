// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Detached process identification

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A background process started by a launch phase
///
/// This is identification only. The sequencer gives up ownership at spawn
/// time and never waits on, signals or cleans up the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetachedProcess {
    /// Name of the phase that started it
    pub name: String,
    pub pid: u32,
    pub started_at: DateTime<Utc>,
    /// Where its stdout and stderr are written
    pub log_path: PathBuf,
    /// Last observed liveness
    #[serde(default)]
    pub status: ProcessStatus,
}

/// Whether a detached process was still alive when last checked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessStatus {
    /// Spawned, not checked since
    #[default]
    Launched,
    Running,
    Exited,
}

impl fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProcessStatus::Launched => "launched",
            ProcessStatus::Running => "running",
            ProcessStatus::Exited => "exited",
        })
    }
}

impl fmt::Display for DetachedProcess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (pid {}, {}, log {})",
            self.name,
            self.pid,
            self.status,
            self.log_path.display()
        )
    }
}
