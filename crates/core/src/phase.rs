// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Phase definitions
//!
//! A phase is one step of the provisioning pipeline. It either runs a list of
//! shell commands to completion or launches a detached background process and
//! optionally waits for it to look ready.

use crate::retry::{PollPolicy, RetryPolicy};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Timeout applied to each command when a phase does not set one
pub const DEFAULT_PHASE_TIMEOUT: Duration = Duration::from_secs(300);

/// What happens to the run when a phase fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Criticality {
    /// Failure halts every later phase
    Critical,
    /// Failure is logged and the run continues
    Optional,
}

impl Criticality {
    pub fn is_critical(self) -> bool {
        matches!(self, Criticality::Critical)
    }
}

/// How to decide that a launched process has started
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessCheck {
    /// A TCP connection to `addr` succeeds
    TcpPort { addr: String },
    /// Some running process has a command line matching `pattern`
    ProcessMatches { pattern: String },
    /// An HTTP GET of `url` returns a 2xx status
    HttpOk { url: String },
}

impl ReadinessCheck {
    /// Short label for logs
    pub fn kind(&self) -> &'static str {
        match self {
            ReadinessCheck::TcpPort { .. } => "tcp",
            ReadinessCheck::ProcessMatches { .. } => "process",
            ReadinessCheck::HttpOk { .. } => "http",
        }
    }

    /// The address, pattern or URL being checked
    pub fn target(&self) -> &str {
        match self {
            ReadinessCheck::TcpPort { addr } => addr,
            ReadinessCheck::ProcessMatches { pattern } => pattern,
            ReadinessCheck::HttpOk { url } => url,
        }
    }
}

/// What a launch phase does when readiness is never confirmed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadinessTimeoutPolicy {
    /// Assume the process started and carry on
    #[default]
    Proceed,
    /// Treat the phase as failed
    Fail,
}

/// Readiness check attached to a launch phase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessSpec {
    pub check: ReadinessCheck,
    pub policy: PollPolicy,
    #[serde(default)]
    pub on_timeout: ReadinessTimeoutPolicy,
}

/// The work a phase performs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseAction {
    /// Run shell commands in order; the first failure fails the phase
    Commands(Vec<String>),
    /// Start a background process that outlives the run
    Launch {
        command: String,
        log_path: PathBuf,
        readiness: Option<ReadinessSpec>,
    },
}

impl PhaseAction {
    pub fn is_launch(&self) -> bool {
        matches!(self, PhaseAction::Launch { .. })
    }

    /// Command strings this action will execute, in order
    pub fn commands(&self) -> Vec<&str> {
        match self {
            PhaseAction::Commands(cmds) => cmds.iter().map(String::as_str).collect(),
            PhaseAction::Launch { command, .. } => vec![command.as_str()],
        }
    }
}

/// A single step of the provisioning pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseSpec {
    pub name: String,
    pub action: PhaseAction,
    /// Per-command timeout
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    /// May run concurrently with adjacent parallel phases
    pub parallel: bool,
    pub criticality: Criticality,
    /// Retry policy for idempotent command phases
    pub retry: RetryPolicy,
    /// Extra environment for every process the phase starts
    pub env: Vec<(String, String)>,
}

impl PhaseSpec {
    /// A critical, sequential phase running the given commands
    pub fn commands<I, S>(name: impl Into<String>, commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_action(
            name,
            PhaseAction::Commands(commands.into_iter().map(Into::into).collect()),
        )
    }

    /// A critical, sequential phase launching a detached process
    pub fn launch(
        name: impl Into<String>,
        command: impl Into<String>,
        log_path: impl Into<PathBuf>,
    ) -> Self {
        Self::with_action(
            name,
            PhaseAction::Launch {
                command: command.into(),
                log_path: log_path.into(),
                readiness: None,
            },
        )
    }

    fn with_action(name: impl Into<String>, action: PhaseAction) -> Self {
        Self {
            name: name.into(),
            action,
            timeout: DEFAULT_PHASE_TIMEOUT,
            parallel: false,
            criticality: Criticality::Critical,
            retry: RetryPolicy::none(),
            env: Vec::new(),
        }
    }

    pub fn optional(mut self) -> Self {
        self.criticality = Criticality::Optional;
        self
    }

    pub fn parallel(mut self) -> Self {
        self.parallel = true;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Attach a readiness check. Has no effect on command phases.
    pub fn with_readiness(mut self, spec: ReadinessSpec) -> Self {
        if let PhaseAction::Launch { readiness, .. } = &mut self.action {
            *readiness = Some(spec);
        }
        self
    }

    pub fn is_critical(&self) -> bool {
        self.criticality.is_critical()
    }
}

#[cfg(test)]
#[path = "phase_tests.rs"]
mod tests;
