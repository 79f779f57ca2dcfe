// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability
//!
//! Command lines are logged with every registered secret replaced by `***`.

use crate::command::{CommandError, CommandRunner};
use crate::launch::{LaunchError, ProcessLauncher};
use async_trait::async_trait;
use ow_core::{redact_secrets, CommandResult};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::Instrument;

/// Wrapper that adds tracing to any CommandRunner
#[derive(Clone)]
pub struct TracedCommandRunner<R> {
    inner: R,
    secrets: Arc<Vec<String>>,
}

impl<R> TracedCommandRunner<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            secrets: Arc::new(Vec::new()),
        }
    }

    /// Values that must never appear in logs
    pub fn with_secrets(mut self, secrets: Vec<String>) -> Self {
        self.secrets = Arc::new(secrets);
        self
    }
}

#[async_trait]
impl<R: CommandRunner> CommandRunner for TracedCommandRunner<R> {
    async fn run(
        &self,
        command: &str,
        timeout: Duration,
        env: &[(String, String)],
    ) -> Result<CommandResult, CommandError> {
        let shown = redact_secrets(command, self.secrets.as_slice());
        let span = tracing::info_span!("command.run", command = %shown);

        async move {
            tracing::debug!(
                timeout_ms = timeout.as_millis() as u64,
                env_count = env.len(),
                "starting"
            );

            let result = self.inner.run(command, timeout, env).await;

            match &result {
                Ok(r) if r.timed_out => tracing::warn!(
                    elapsed_ms = r.duration.as_millis() as u64,
                    "timed out, process group killed"
                ),
                Ok(r) if r.success() => tracing::info!(
                    elapsed_ms = r.duration.as_millis() as u64,
                    "completed"
                ),
                Ok(r) => tracing::warn!(
                    exit_code = ?r.exit_code,
                    elapsed_ms = r.duration.as_millis() as u64,
                    stderr = %redact_secrets(r.stderr_tail(500), self.secrets.as_slice()),
                    "exited with failure"
                ),
                Err(e) => tracing::error!(error = %e, "could not run"),
            }

            result
        }
        .instrument(span)
        .await
    }
}

/// Wrapper that adds tracing to any ProcessLauncher
#[derive(Clone)]
pub struct TracedLauncher<L> {
    inner: L,
    secrets: Arc<Vec<String>>,
}

impl<L> TracedLauncher<L> {
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            secrets: Arc::new(Vec::new()),
        }
    }

    /// Values that must never appear in logs
    pub fn with_secrets(mut self, secrets: Vec<String>) -> Self {
        self.secrets = Arc::new(secrets);
        self
    }
}

#[async_trait]
impl<L: ProcessLauncher> ProcessLauncher for TracedLauncher<L> {
    async fn launch(
        &self,
        command: &str,
        log_path: &Path,
        env: &[(String, String)],
    ) -> Result<u32, LaunchError> {
        let shown = redact_secrets(command, self.secrets.as_slice());
        let span = tracing::info_span!(
            "process.launch",
            command = %shown,
            log = %log_path.display()
        );

        async move {
            let start = Instant::now();
            let result = self.inner.launch(command, log_path, env).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(pid) => tracing::info!(
                    pid,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "detached process started"
                ),
                Err(e) => tracing::error!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "launch failed"
                ),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn is_running(&self, pid: u32) -> bool {
        let running = self.inner.is_running(pid).await;
        tracing::debug!(pid, running, "checked detached process");
        running
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
