// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration from the environment

use ow_core::{ServerConfig, TunnelToken};
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

pub const TOKEN_VAR: &str = "OW_TUNNEL_TOKEN";
pub const MODEL_VAR: &str = "OW_MODEL";
pub const HOST_VAR: &str = "OW_OLLAMA_HOST";
pub const ORIGINS_VAR: &str = "OW_OLLAMA_ORIGINS";
pub const LOG_DIR_VAR: &str = "OW_LOG_DIR";
pub const WORKERS_VAR: &str = "OW_MAX_WORKERS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got '{value}'")]
    InvalidNumber { var: &'static str, value: String },
    #[error("model '{value}' may only contain letters, digits and . _ : / -")]
    InvalidModel { value: String },
}

/// Model ids are pasted into a shell command, so only registry characters pass
fn is_model_id(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | ':' | '/' | '-'))
}

/// Everything the wizard reads from its environment
#[derive(Debug, Clone)]
pub struct WizardConfig {
    /// Model to pull; `None` leaves the runbook's default in place
    pub model: Option<String>,
    pub tunnel_token: Option<TunnelToken>,
    pub server: ServerConfig,
    /// Where `ow.log` and launched process logs go
    pub log_dir: PathBuf,
    /// Scratch space for downloaded installers
    pub work_dir: PathBuf,
    pub max_workers: usize,
}

impl WizardConfig {
    /// Load from the process environment; `model` overrides `OW_MODEL`
    pub fn from_env(model: Option<String>) -> Result<Self, ConfigError> {
        Self::from_lookup(model, |key| std::env::var(key).ok())
    }

    pub fn from_lookup(
        model: Option<String>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let defaults = ServerConfig::default();
        let server = ServerConfig {
            host: non_empty(HOST_VAR).unwrap_or(defaults.host),
            origins: non_empty(ORIGINS_VAR).unwrap_or(defaults.origins),
        };

        let log_dir = non_empty(LOG_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join("ow"));

        let max_workers = match non_empty(WORKERS_VAR) {
            Some(value) => match value.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidNumber {
                        var: WORKERS_VAR,
                        value,
                    })
                }
            },
            None => ow_engine::default_workers(),
        };

        let model = model
            .filter(|m| !m.trim().is_empty())
            .or_else(|| non_empty(MODEL_VAR));
        if let Some(value) = model.as_ref().filter(|m| !is_model_id(m)) {
            return Err(ConfigError::InvalidModel {
                value: value.clone(),
            });
        }

        Ok(Self {
            model,
            tunnel_token: lookup(TOKEN_VAR).and_then(TunnelToken::new),
            server,
            work_dir: log_dir.join("work"),
            log_dir,
            max_workers,
        })
    }

    /// Variables made available to runbook templates
    pub fn template_vars(&self) -> HashMap<String, String> {
        let mut vars = HashMap::from([
            ("ollama_host".to_string(), self.server.host.clone()),
            ("ollama_origins".to_string(), self.server.origins.clone()),
            ("log_dir".to_string(), self.log_dir.display().to_string()),
            ("work_dir".to_string(), self.work_dir.display().to_string()),
        ]);
        if let Some(model) = &self.model {
            vars.insert("model".to_string(), model.clone());
        }
        if let Some(token) = &self.tunnel_token {
            vars.insert("tunnel_token".to_string(), token.expose().to_string());
        }
        vars
    }

    /// Values that must be masked in every log line and summary
    pub fn secrets(&self) -> Vec<String> {
        self.tunnel_token
            .iter()
            .map(|t| t.expose().to_string())
            .collect()
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
