//! Shared helpers for the behavioral specs.

#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub use similar_asserts::assert_eq;

/// A token that looks real enough to exercise redaction
pub const FAKE_TOKEN: &str = "eyJhIjoiZmFrZS10b2tlbiJ9";

/// Smallest useful runbook
pub const MINIMAL_RUNBOOK: &str = r#"
[[phase]]
name = "only"
run = "true"
"#;

/// Variables cleared from every invocation so the host environment cannot leak in
const OW_VARS: &[&str] = &[
    "OW_TUNNEL_TOKEN",
    "OW_MODEL",
    "OW_OLLAMA_HOST",
    "OW_OLLAMA_ORIGINS",
    "OW_LOG_DIR",
    "OW_MAX_WORKERS",
    "RUST_LOG",
];

/// A scratch directory the CLI runs in
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn log_dir(&self) -> PathBuf {
        self.path().join("logs")
    }

    /// Write a file relative to the project root
    pub fn file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn ow(&self) -> CliBuilder {
        CliBuilder {
            cwd: self.path().to_path_buf(),
            log_dir: self.log_dir(),
            args: Vec::new(),
            envs: Vec::new(),
        }
    }
}

pub struct CliBuilder {
    cwd: PathBuf,
    log_dir: PathBuf,
    args: Vec<String>,
    envs: Vec<(String, String)>,
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|a| a.to_string()));
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.envs.push((key.to_string(), value.to_string()));
        self
    }

    #[allow(deprecated)]
    fn run(self) -> RunAssert {
        let mut cmd = Command::cargo_bin("ow").unwrap();
        for var in OW_VARS {
            cmd.env_remove(var);
        }
        cmd.env("OW_LOG_DIR", &self.log_dir);
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }
        let output = cmd
            .current_dir(&self.cwd)
            .args(&self.args)
            .output()
            .unwrap();
        RunAssert { output }
    }

    /// Run and require exit status 0
    pub fn passes(self) -> RunAssert {
        let run = self.run();
        assert!(
            run.output.status.success(),
            "expected success, got {:?}\nstdout:\n{}\nstderr:\n{}",
            run.output.status.code(),
            run.stdout(),
            run.stderr()
        );
        run
    }

    /// Run and require a non-zero exit status
    pub fn fails(self) -> RunAssert {
        let run = self.run();
        assert!(
            !run.output.status.success(),
            "expected failure\nstdout:\n{}",
            run.stdout()
        );
        run
    }

    /// Run and require a specific exit code
    pub fn exits(self, code: i32) -> RunAssert {
        let run = self.run();
        assert_eq!(
            run.output.status.code(),
            Some(code),
            "stdout:\n{}\nstderr:\n{}",
            run.stdout(),
            run.stderr()
        );
        run
    }
}

pub struct RunAssert {
    output: std::process::Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn stdout_has(self, expected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            stdout.contains(expected),
            "stdout missing {:?}:\n{}",
            expected,
            stdout
        );
        self
    }

    pub fn stdout_lacks(self, unexpected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            !stdout.contains(unexpected),
            "stdout unexpectedly has {:?}:\n{}",
            unexpected,
            stdout
        );
        self
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        let stderr = self.stderr();
        assert!(
            stderr.contains(expected),
            "stderr missing {:?}:\n{}",
            expected,
            stderr
        );
        self
    }

    pub fn stderr_lacks(self, unexpected: &str) -> Self {
        let stderr = self.stderr();
        assert!(
            !stderr.contains(unexpected),
            "stderr unexpectedly has {:?}:\n{}",
            unexpected,
            stderr
        );
        self
    }

    /// Compare the whole of stdout
    pub fn stdout_eq(self, expected: &str) -> Self {
        assert_eq!(self.stdout(), expected);
        self
    }
}
