// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Raw runbook shapes as they appear in TOML

use ow_core::ReadinessTimeoutPolicy;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;

/// A runbook before validation and interpolation
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawRunbook {
    /// Default values for `{var}` placeholders
    #[serde(default)]
    pub vars: BTreeMap<String, String>,
    /// Phases in execution order
    #[serde(default)]
    pub phase: Vec<RawPhase>,
}

/// `run` accepts a single command or a list
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawRun {
    One(String),
    Many(Vec<String>),
}

impl RawRun {
    pub fn commands(&self) -> Vec<&str> {
        match self {
            RawRun::One(cmd) => vec![cmd.as_str()],
            RawRun::Many(cmds) => cmds.iter().map(String::as_str).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawPhase {
    #[serde(default)]
    pub name: String,
    pub run: Option<RawRun>,
    pub launch: Option<String>,
    /// Log file for a launched process; defaults to `{log_dir}/<name>.log`
    pub log: Option<String>,
    #[serde(default, with = "humantime_serde")]
    pub timeout: Option<Duration>,
    #[serde(default = "default_critical")]
    pub critical: bool,
    #[serde(default)]
    pub parallel: bool,
    /// Extra attempts after the first failure
    #[serde(default)]
    pub retries: u32,
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    pub ready: Option<RawReady>,
}

fn default_critical() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawReady {
    pub tcp: Option<String>,
    pub process: Option<String>,
    pub http: Option<String>,
    #[serde(default = "default_attempts")]
    pub attempts: u32,
    #[serde(default = "default_interval", with = "humantime_serde")]
    pub interval: Duration,
    #[serde(default, with = "humantime_serde")]
    pub jitter: Duration,
    /// `proceed` or `fail`; anything else is a parse error
    pub on_timeout: Option<ReadinessTimeoutPolicy>,
}

fn default_attempts() -> u32 {
    20
}

fn default_interval() -> Duration {
    Duration::from_millis(500)
}
