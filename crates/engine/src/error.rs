// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for phase execution

use ow_adapters::{CommandError, LaunchError};
use std::time::Duration;
use thiserror::Error;

/// Why a phase attempt failed
#[derive(Debug, Error)]
pub enum PhaseError {
    #[error("`{command}` exited with {}{}", describe_exit(.exit_code), describe_stderr(.stderr))]
    CommandFailed {
        command: String,
        exit_code: Option<i32>,
        stderr: String,
    },
    #[error("`{command}` timed out after {}s", .timeout.as_secs())]
    TimedOut { command: String, timeout: Duration },
    #[error(transparent)]
    Spawn(#[from] CommandError),
    #[error(transparent)]
    Launch(#[from] LaunchError),
    #[error("{check} readiness not confirmed after {attempts} checks")]
    NotReady { check: String, attempts: u32 },
}

/// A parallel phase whose task panicked or was aborted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("worker task ended without a result")]
pub struct WorkerLost;

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (killed by signal)".to_string(),
    }
}

fn describe_stderr(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}
