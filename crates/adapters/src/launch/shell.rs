// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Background process launcher, the equivalent of `nohup cmd > log 2>&1 &`

use super::{LaunchError, ProcessLauncher};
use async_trait::async_trait;
use nix::errno::Errno;
use nix::sys::signal::kill;
use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
use nix::unistd::Pid;
use std::fs::OpenOptions;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

/// Launches `sh -c` processes in their own process group
///
/// A separate group keeps terminal interrupts aimed at the wizard from
/// reaching the daemon and tunnel.
#[derive(Clone, Default)]
pub struct ShellLauncher;

impl ShellLauncher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProcessLauncher for ShellLauncher {
    async fn launch(
        &self,
        command: &str,
        log_path: &Path,
        env: &[(String, String)],
    ) -> Result<u32, LaunchError> {
        let log_error = |source| LaunchError::LogFile {
            path: log_path.to_path_buf(),
            source,
        };

        if let Some(parent) = log_path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(log_error)?;
        }
        let stdout = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)
            .map_err(log_error)?;
        let stderr = stdout.try_clone().map_err(log_error)?;

        let child = Command::new("sh")
            .arg("-c")
            .arg(command)
            .envs(env.iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(stderr)
            .process_group(0)
            .spawn()
            .map_err(LaunchError::Spawn)?;

        // Dropping the handle does not kill the child; tokio reaps it if it exits.
        child.id().ok_or(LaunchError::NoPid)
    }

    async fn is_running(&self, pid: u32) -> bool {
        let Ok(raw) = i32::try_from(pid) else {
            return false;
        };
        let pid = Pid::from_raw(raw);
        // An exited child stays a zombie until reaped, so try reaping first
        match waitpid(pid, Some(WaitPidFlag::WNOHANG)) {
            Ok(WaitStatus::Exited(..) | WaitStatus::Signaled(..)) => false,
            Ok(_) => true,
            // Already reaped elsewhere or not our child: probe with signal 0
            Err(_) => !matches!(kill(pid, None), Err(Errno::ESRCH)),
        }
    }
}
