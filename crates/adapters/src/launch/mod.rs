// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Detached process launch adapters

mod shell;

pub use shell::ShellLauncher;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeLauncher, LaunchCall};

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from launching a background process
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("cannot open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to start process: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("process exited before its pid could be read")]
    NoPid,
}

/// Starts processes that outlive the caller's control
#[async_trait]
pub trait ProcessLauncher: Clone + Send + Sync + 'static {
    /// Start `command` under `sh -c` with output appended to `log_path`
    ///
    /// Returns the pid. The process is not waited on, signalled or cleaned up.
    async fn launch(
        &self,
        command: &str,
        log_path: &Path,
        env: &[(String, String)],
    ) -> Result<u32, LaunchError>;

    /// Whether a previously launched process is still alive
    async fn is_running(&self, pid: u32) -> bool;
}
