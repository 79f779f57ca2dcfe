// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake launcher for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{LaunchError, ProcessLauncher};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Recorded launch
#[derive(Debug, Clone)]
pub struct LaunchCall {
    pub command: String,
    pub log_path: PathBuf,
    pub env: Vec<(String, String)>,
    pub pid: Option<u32>,
}

#[derive(Default)]
struct FakeLauncherState {
    calls: Vec<LaunchCall>,
    next_pid: u32,
    failing: Vec<String>,
    exited: Vec<u32>,
}

/// Fake launcher handing out sequential pids starting at 1000
#[derive(Clone, Default)]
pub struct FakeLauncher {
    state: Arc<Mutex<FakeLauncherState>>,
}

impl FakeLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Launches of commands containing `pattern` fail
    pub fn fail_on(&self, pattern: &str) {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .failing
            .push(pattern.to_string());
    }

    /// Report `pid` as exited from now on
    pub fn exit(&self, pid: u32) {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .exited
            .push(pid);
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<LaunchCall> {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .clone()
    }
}

#[async_trait]
impl ProcessLauncher for FakeLauncher {
    async fn launch(
        &self,
        command: &str,
        log_path: &Path,
        env: &[(String, String)],
    ) -> Result<u32, LaunchError> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let fails = state.failing.iter().any(|p| command.contains(p.as_str()));
        let pid = if fails {
            None
        } else {
            state.next_pid += 1;
            Some(999 + state.next_pid)
        };

        state.calls.push(LaunchCall {
            command: command.to_string(),
            log_path: log_path.to_path_buf(),
            env: env.to_vec(),
            pid,
        });

        pid.ok_or_else(|| {
            LaunchError::Spawn(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "command not found",
            ))
        })
    }

    async fn is_running(&self, pid: u32) -> bool {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let launched = state.calls.iter().any(|c| c.pid == Some(pid));
        launched && !state.exited.contains(&pid)
    }
}
