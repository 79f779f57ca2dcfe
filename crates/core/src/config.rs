// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Server bind settings and the tunnel credential

use serde::{Deserialize, Serialize};
use std::fmt;

/// Bind settings for the model server
///
/// Exposed to runbooks as the `ollama_host` and `ollama_origins` variables,
/// which the built-in runbook places in the server phase's environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub origins: String,
}

impl Default for ServerConfig {
    /// Listen on every interface and accept any origin
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            origins: "*".to_string(),
        }
    }
}

/// Opaque tunnel authentication token
///
/// `Debug` and `Display` never print the value.
#[derive(Clone, PartialEq, Eq)]
pub struct TunnelToken(String);

impl TunnelToken {
    /// Returns `None` for an empty or whitespace-only token
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into().trim().to_string();
        if token.is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    /// The raw token, for building the tunnel command line only
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TunnelToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TunnelToken(***)")
    }
}

impl fmt::Display for TunnelToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

/// Replace every occurrence of each secret in `text` with `***`
pub fn redact_secrets<S: AsRef<str>>(text: &str, secrets: &[S]) -> String {
    secrets
        .iter()
        .map(AsRef::as_ref)
        .filter(|s| !s.is_empty())
        .fold(text.to_string(), |acc, secret| acc.replace(secret, "***"))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
