// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command, phase and run results

use crate::phase::Criticality;
use crate::process::DetachedProcess;
use crate::run_state::RunState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Outcome of one external command. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResult {
    pub command: String,
    /// `None` when the process was killed by a signal or timed out
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    #[serde(with = "humantime_serde")]
    pub duration: Duration,
    pub timed_out: bool,
}

impl CommandResult {
    pub fn completed(
        command: impl Into<String>,
        exit_code: Option<i32>,
        stdout: impl Into<String>,
        stderr: impl Into<String>,
        duration: Duration,
    ) -> Self {
        Self {
            command: command.into(),
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
            duration,
            timed_out: false,
        }
    }

    /// A command that exceeded its timeout; its output is not available
    pub fn timed_out(command: impl Into<String>, duration: Duration) -> Self {
        Self {
            command: command.into(),
            exit_code: None,
            stdout: String::new(),
            stderr: String::new(),
            duration,
            timed_out: true,
        }
    }

    pub fn success(&self) -> bool {
        !self.timed_out && self.exit_code == Some(0)
    }

    /// Last `max_chars` characters of stderr, trimmed
    pub fn stderr_tail(&self, max_chars: usize) -> &str {
        let trimmed = self.stderr.trim();
        let skip = trimmed.chars().count().saturating_sub(max_chars);
        match trimmed.char_indices().nth(skip) {
            Some((idx, _)) => &trimmed[idx..],
            None => trimmed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseStatus {
    Succeeded,
    Failed,
}

impl fmt::Display for PhaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhaseStatus::Succeeded => write!(f, "succeeded"),
            PhaseStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Outcome of one phase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseResult {
    pub phase: String,
    pub status: PhaseStatus,
    pub criticality: Criticality,
    /// Every command run, across all attempts
    pub commands: Vec<CommandResult>,
    pub attempts: u32,
    /// Set when a launch phase spawned its process
    pub detached: Option<DetachedProcess>,
    /// Readiness poll result for launch phases with a readiness check
    pub ready: Option<bool>,
    pub error: Option<String>,
    #[serde(with = "humantime_serde")]
    pub duration: Duration,
}

impl PhaseResult {
    pub fn succeeded(&self) -> bool {
        self.status == PhaseStatus::Succeeded
    }

    /// Failed and critical, so the run must stop
    pub fn is_fatal(&self) -> bool {
        self.status == PhaseStatus::Failed && self.criticality.is_critical()
    }
}

/// Result of a whole sequencer run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetupOutcome {
    pub state: RunState,
    pub completed: bool,
    pub failed_phase: Option<String>,
    /// One entry per phase that ran, in declared order
    pub phase_results: Vec<PhaseResult>,
    /// Background processes left running
    pub detached: Vec<DetachedProcess>,
    pub started_at: DateTime<Utc>,
    #[serde(with = "humantime_serde")]
    pub elapsed: Duration,
}

impl SetupOutcome {
    pub fn result(&self, phase: &str) -> Option<&PhaseResult> {
        self.phase_results.iter().find(|r| r.phase == phase)
    }

    pub fn is_interrupted(&self) -> bool {
        matches!(self.state, RunState::Interrupted { .. })
    }

    /// Names of phases that ran, in result order
    pub fn phase_names(&self) -> Vec<&str> {
        self.phase_results.iter().map(|r| r.phase.as_str()).collect()
    }
}

#[cfg(test)]
#[path = "result_tests.rs"]
mod tests;
