// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single-phase execution

use crate::{poll_ready, PhaseError};
use ow_adapters::{CommandRunner, ProcessLauncher, ReadinessProbe};
use ow_core::{
    redact_secrets, Clock, CommandResult, DetachedProcess, PhaseAction, PhaseResult, PhaseSpec,
    PhaseStatus, ProcessStatus, ProgressSink, ProgressState, ReadinessSpec, ReadinessTimeoutPolicy,
    TracedPhase,
};
use std::path::Path;
use std::sync::Arc;
use tracing::Instrument;

/// Runs one phase through the adapters and reports its result
///
/// Never returns an error: every failure is folded into the `PhaseResult`.
/// Error text is masked with the configured secrets before it is logged or
/// stored.
#[derive(Clone)]
pub struct PhaseExecutor<R, L, P, C> {
    runner: R,
    launcher: L,
    probe: P,
    clock: C,
    secrets: Arc<Vec<String>>,
}

/// What an execution produced before it is stamped into a `PhaseResult`
#[derive(Default)]
struct Attempts {
    commands: Vec<CommandResult>,
    count: u32,
    detached: Option<DetachedProcess>,
    ready: Option<bool>,
}

impl<R, L, P, C> PhaseExecutor<R, L, P, C>
where
    R: CommandRunner,
    L: ProcessLauncher,
    P: ReadinessProbe,
    C: Clock,
{
    pub fn new(runner: R, launcher: L, probe: P, clock: C) -> Self {
        Self {
            runner,
            launcher,
            probe,
            clock,
            secrets: Arc::new(Vec::new()),
        }
    }

    /// Values masked in logged and reported errors
    pub fn with_secrets(mut self, secrets: Vec<String>) -> Self {
        self.secrets = Arc::new(secrets);
        self
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Execute a phase, including any retries and readiness polling
    pub async fn execute(&self, phase: &PhaseSpec, progress: &dyn ProgressSink) -> PhaseResult {
        let span = tracing::info_span!("phase", name = %phase.name, kind = phase.kind());
        self.execute_inner(phase, progress).instrument(span).await
    }

    async fn execute_inner(&self, phase: &PhaseSpec, progress: &dyn ProgressSink) -> PhaseResult {
        tracing::info!(fields = ?phase.fields(), "starting");
        progress.update(&ProgressState::new(&phase.name, 0, 1, "starting"));

        let start = self.clock.now();
        let mut attempts = Attempts::default();

        let outcome = match &phase.action {
            PhaseAction::Commands(commands) => {
                self.run_commands(phase, commands, progress, &mut attempts)
                    .await
            }
            PhaseAction::Launch {
                command,
                log_path,
                readiness,
            } => {
                attempts.count = 1;
                self.launch(phase, command, log_path, readiness.as_ref(), &mut attempts)
                    .await
            }
        };
        let duration = self.clock.now().saturating_duration_since(start);

        let (status, error) = match outcome {
            Ok(()) => {
                tracing::info!(elapsed_ms = duration.as_millis() as u64, "succeeded");
                (PhaseStatus::Succeeded, None)
            }
            Err(e) => {
                let error = self.redact(&e);
                if phase.is_critical() {
                    tracing::error!(error = %error, "failed");
                } else {
                    tracing::warn!(error = %error, "optional phase failed, continuing");
                }
                (PhaseStatus::Failed, Some(error))
            }
        };
        progress.update(&ProgressState::new(&phase.name, 1, 1, status.to_string()));

        PhaseResult {
            phase: phase.name.clone(),
            status,
            criticality: phase.criticality,
            commands: attempts.commands,
            attempts: attempts.count,
            detached: attempts.detached,
            ready: attempts.ready,
            error,
            duration,
        }
    }

    async fn run_commands(
        &self,
        phase: &PhaseSpec,
        commands: &[String],
        progress: &dyn ProgressSink,
        attempts: &mut Attempts,
    ) -> Result<(), PhaseError> {
        loop {
            attempts.count += 1;
            let attempt = attempts.count;
            match self
                .attempt_commands(phase, commands, progress, &mut attempts.commands)
                .await
            {
                Ok(()) => return Ok(()),
                Err(e) if phase.retry.should_retry(attempt) => {
                    let delay = phase.retry.delay_after(attempt);
                    tracing::warn!(
                        attempt,
                        max_attempts = phase.retry.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %self.redact(&e),
                        "attempt failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn attempt_commands(
        &self,
        phase: &PhaseSpec,
        commands: &[String],
        progress: &dyn ProgressSink,
        results: &mut Vec<CommandResult>,
    ) -> Result<(), PhaseError> {
        let total = commands.len() as u32;
        for (index, command) in commands.iter().enumerate() {
            progress.update(&ProgressState::new(
                &phase.name,
                index as u32,
                total,
                "running",
            ));

            let result = self.runner.run(command, phase.timeout, &phase.env).await?;
            results.push(result.clone());

            if result.timed_out {
                return Err(PhaseError::TimedOut {
                    command: result.command,
                    timeout: phase.timeout,
                });
            }
            if !result.success() {
                return Err(PhaseError::CommandFailed {
                    stderr: result.stderr_tail(500).to_string(),
                    command: result.command,
                    exit_code: result.exit_code,
                });
            }
        }
        Ok(())
    }

    async fn launch(
        &self,
        phase: &PhaseSpec,
        command: &str,
        log_path: &Path,
        readiness: Option<&ReadinessSpec>,
        attempts: &mut Attempts,
    ) -> Result<(), PhaseError> {
        let pid = self.launcher.launch(command, log_path, &phase.env).await?;
        attempts.detached = Some(DetachedProcess {
            name: phase.name.clone(),
            pid,
            started_at: self.clock.wall_now(),
            log_path: log_path.to_path_buf(),
            status: ProcessStatus::Launched,
        });

        let Some(spec) = readiness else {
            return Ok(());
        };

        let ready = poll_ready(|| self.probe.check(&spec.check), &spec.policy).await;
        attempts.ready = Some(ready);
        let target = redact_secrets(spec.check.target(), self.secrets.as_slice());
        if ready {
            tracing::info!(check = spec.check.kind(), target = %target, "ready");
            return Ok(());
        }

        tracing::warn!(
            check = spec.check.kind(),
            target = %target,
            attempts = spec.policy.max_attempts,
            "readiness not confirmed"
        );
        match spec.on_timeout {
            ReadinessTimeoutPolicy::Proceed => Ok(()),
            ReadinessTimeoutPolicy::Fail => Err(PhaseError::NotReady {
                check: spec.check.kind().to_string(),
                attempts: spec.policy.max_attempts,
            }),
        }
    }

    /// Re-check whether a detached process is still alive
    pub async fn refresh_status(&self, process: &mut DetachedProcess) {
        process.status = if self.launcher.is_running(process.pid).await {
            ProcessStatus::Running
        } else {
            tracing::warn!(
                name = %process.name,
                pid = process.pid,
                log = %process.log_path.display(),
                "background process has exited"
            );
            ProcessStatus::Exited
        };
    }

    fn redact(&self, error: &PhaseError) -> String {
        redact_secrets(&error.to_string(), self.secrets.as_slice())
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
