// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test utilities for CLI integration tests.

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables the wizard reads; cleared so the host cannot leak in
const OW_VARS: &[&str] = &[
    "OW_TUNNEL_TOKEN",
    "OW_MODEL",
    "OW_OLLAMA_HOST",
    "OW_OLLAMA_ORIGINS",
    "OW_LOG_DIR",
    "OW_MAX_WORKERS",
    "RUST_LOG",
];

/// A scratch directory holding runbooks, logs and marker files
pub struct TestEnv {
    pub dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn log_dir(&self) -> PathBuf {
        self.path().join("logs")
    }

    /// Write a runbook and return its path
    pub fn runbook(&self, content: &str) -> PathBuf {
        let path = self.path().join("runbook.toml");
        fs::write(&path, content).expect("Failed to write runbook");
        path
    }

    /// Path of a marker file phases can touch
    pub fn marker(&self, name: &str) -> PathBuf {
        self.path().join(name)
    }

    /// `ow` with a clean environment pointing its logs into this directory
    pub fn ow(&self) -> Command {
        Command::from_std(self.ow_process())
    }

    /// Same as [`TestEnv::ow`] for tests that need to spawn and signal it
    #[allow(deprecated)]
    pub fn ow_process(&self) -> std::process::Command {
        let mut cmd = std::process::Command::new(assert_cmd::cargo::cargo_bin("ow"));
        for var in OW_VARS {
            cmd.env_remove(var);
        }
        cmd.env("OW_LOG_DIR", self.log_dir())
            .current_dir(self.path());
        cmd
    }
}
