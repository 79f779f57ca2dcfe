// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shell command execution adapters

mod shell;

pub use shell::ShellRunner;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{CommandCall, FakeCommandRunner, FakeOutcome};

use async_trait::async_trait;
use ow_core::CommandResult;
use std::time::Duration;
use thiserror::Error;

/// Errors starting or waiting on a command
///
/// A non-zero exit or a timeout is not an error; both are reported in the
/// `CommandResult`. Messages never include the command line.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to start shell: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("failed waiting for command: {0}")]
    Wait(#[source] std::io::Error),
}

/// Runs a shell command to completion
#[async_trait]
pub trait CommandRunner: Clone + Send + Sync + 'static {
    /// Run `command` under `sh -c`, bounded by `timeout`
    ///
    /// On timeout the command's whole process group is killed.
    async fn run(
        &self,
        command: &str,
        timeout: Duration,
        env: &[(String, String)],
    ) -> Result<CommandResult, CommandError>;
}
