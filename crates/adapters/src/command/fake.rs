// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake command runner for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{CommandError, CommandRunner};
use async_trait::async_trait;
use ow_core::CommandResult;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Recorded command invocation
#[derive(Debug, Clone)]
pub struct CommandCall {
    pub command: String,
    pub timeout: Duration,
    pub env: Vec<(String, String)>,
}

/// Scripted result for matching commands
#[derive(Debug, Clone)]
pub enum FakeOutcome {
    Exit {
        code: i32,
        stdout: String,
        stderr: String,
    },
    TimedOut,
    SpawnError(String),
}

impl FakeOutcome {
    pub fn exit(code: i32) -> Self {
        FakeOutcome::Exit {
            code,
            stdout: String::new(),
            stderr: String::new(),
        }
    }

    pub fn fail_with(code: i32, stderr: impl Into<String>) -> Self {
        FakeOutcome::Exit {
            code,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

#[derive(Debug)]
struct Rule {
    pattern: String,
    outcome: FakeOutcome,
    /// Remaining matches before the rule stops applying; `None` is unlimited
    remaining: Option<u32>,
}

#[derive(Debug, Default)]
struct FakeState {
    rules: Vec<Rule>,
    delays: Vec<(String, Duration)>,
    calls: Vec<CommandCall>,
    finished: Vec<String>,
    in_flight: usize,
    max_in_flight: usize,
}

/// Fake command runner for testing
///
/// Commands succeed with exit code 0 unless a rule matches. Rules match when
/// their pattern is a substring of the command, first registered first.
#[derive(Clone, Default)]
pub struct FakeCommandRunner {
    state: Arc<Mutex<FakeState>>,
}

impl FakeCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every command containing `pattern` produces `outcome`
    pub fn on(&self, pattern: &str, outcome: FakeOutcome) -> &Self {
        self.push_rule(pattern, outcome, None);
        self
    }

    /// The next `times` commands containing `pattern` produce `outcome`
    pub fn on_times(&self, pattern: &str, times: u32, outcome: FakeOutcome) -> &Self {
        self.push_rule(pattern, outcome, Some(times));
        self
    }

    /// Commands containing `pattern` take `delay` before completing
    pub fn delay(&self, pattern: &str, delay: Duration) -> &Self {
        self.lock().delays.push((pattern.to_string(), delay));
        self
    }

    /// Get all recorded calls, in start order
    pub fn calls(&self) -> Vec<CommandCall> {
        self.lock().calls.clone()
    }

    /// Commands that were started, in start order
    pub fn commands(&self) -> Vec<String> {
        self.lock().calls.iter().map(|c| c.command.clone()).collect()
    }

    /// Commands that completed, in completion order
    pub fn finished(&self) -> Vec<String> {
        self.lock().finished.clone()
    }

    /// Highest number of commands that were running at once
    pub fn max_in_flight(&self) -> usize {
        self.lock().max_in_flight
    }

    fn push_rule(&self, pattern: &str, outcome: FakeOutcome, remaining: Option<u32>) {
        self.lock().rules.push(Rule {
            pattern: pattern.to_string(),
            outcome,
            remaining,
        });
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn take_outcome(&self, command: &str) -> Option<FakeOutcome> {
        let mut state = self.lock();
        let rule = state.rules.iter_mut().find(|r| {
            command.contains(&r.pattern) && r.remaining.map(|n| n > 0).unwrap_or(true)
        })?;
        if let Some(n) = rule.remaining.as_mut() {
            *n -= 1;
        }
        Some(rule.outcome.clone())
    }
}

#[async_trait]
impl CommandRunner for FakeCommandRunner {
    async fn run(
        &self,
        command: &str,
        timeout: Duration,
        env: &[(String, String)],
    ) -> Result<CommandResult, CommandError> {
        let delay = {
            let mut state = self.lock();
            state.calls.push(CommandCall {
                command: command.to_string(),
                timeout,
                env: env.to_vec(),
            });
            state.in_flight += 1;
            state.max_in_flight = state.max_in_flight.max(state.in_flight);
            state
                .delays
                .iter()
                .find(|(pattern, _)| command.contains(pattern.as_str()))
                .map(|(_, d)| *d)
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let outcome = self.take_outcome(command);
        {
            let mut state = self.lock();
            state.in_flight -= 1;
            state.finished.push(command.to_string());
        }

        let elapsed = delay.unwrap_or_default();
        match outcome {
            None => Ok(CommandResult::completed(command, Some(0), "", "", elapsed)),
            Some(FakeOutcome::Exit {
                code,
                stdout,
                stderr,
            }) => Ok(CommandResult::completed(
                command,
                Some(code),
                stdout,
                stderr,
                elapsed,
            )),
            Some(FakeOutcome::TimedOut) => Ok(CommandResult::timed_out(command, timeout)),
            Some(FakeOutcome::SpawnError(message)) => Err(CommandError::Spawn(
                std::io::Error::new(std::io::ErrorKind::NotFound, message),
            )),
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
