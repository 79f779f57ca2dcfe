// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `sh -c` command runner

use super::{CommandError, CommandRunner};
use async_trait::async_trait;
use nix::sys::signal::{killpg, Signal};
use nix::unistd::Pid;
use ow_core::CommandResult;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;

/// Runs commands through `sh -c`, each in its own process group
#[derive(Clone)]
pub struct ShellRunner {
    base_env: Vec<(String, String)>,
}

impl ShellRunner {
    /// Runner with package managers forced into non-interactive mode
    pub fn new() -> Self {
        Self {
            base_env: vec![("DEBIAN_FRONTEND".to_string(), "noninteractive".to_string())],
        }
    }
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandRunner for ShellRunner {
    async fn run(
        &self,
        command: &str,
        timeout: Duration,
        env: &[(String, String)],
    ) -> Result<CommandResult, CommandError> {
        let start = Instant::now();

        let child = Command::new("sh")
            .arg("-c")
            .arg(command)
            .envs(self.base_env.iter().map(|(k, v)| (k, v)))
            .envs(env.iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .process_group(0)
            .kill_on_drop(true)
            .spawn()
            .map_err(CommandError::Spawn)?;

        // The group id equals the leader's pid
        let pgid = child.id();

        match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => Ok(CommandResult::completed(
                command,
                output.status.code(),
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr),
                start.elapsed(),
            )),
            Ok(Err(e)) => Err(CommandError::Wait(e)),
            Err(_) => {
                // The shell itself was killed when its future was dropped;
                // take down anything it started as well.
                if let Some(pgid) = pgid {
                    kill_group(pgid);
                }
                Ok(CommandResult::timed_out(command, start.elapsed()))
            }
        }
    }
}

fn kill_group(pgid: u32) {
    let Ok(raw) = i32::try_from(pgid) else {
        return;
    };
    match killpg(Pid::from_raw(raw), Signal::SIGKILL) {
        Ok(()) => tracing::debug!(pgid, "killed timed-out process group"),
        // ESRCH: every member already exited
        Err(nix::errno::Errno::ESRCH) => {}
        Err(e) => tracing::warn!(pgid, error = %e, "failed to kill process group"),
    }
}

#[cfg(test)]
#[path = "shell_tests.rs"]
mod tests;
