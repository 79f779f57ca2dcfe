// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Probes against the local network and process table

use super::ReadinessProbe;
use async_trait::async_trait;
use ow_core::ReadinessCheck;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::process::Command;

/// Probe using TCP connects, `pgrep -f` and HTTP GETs
#[derive(Clone)]
pub struct SystemProbe {
    /// Bound on a single probe attempt
    attempt_timeout: Duration,
}

impl SystemProbe {
    pub fn new() -> Self {
        Self {
            attempt_timeout: Duration::from_secs(1),
        }
    }

    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = timeout;
        self
    }

    async fn tcp(&self, addr: &str) -> bool {
        matches!(
            tokio::time::timeout(self.attempt_timeout, TcpStream::connect(addr)).await,
            Ok(Ok(_))
        )
    }

    async fn process(&self, pattern: &str) -> bool {
        let output = Command::new("pgrep")
            .args(["-f", pattern])
            .kill_on_drop(true)
            .output();
        match tokio::time::timeout(self.attempt_timeout, output).await {
            Ok(Ok(output)) => output.status.success(),
            Ok(Err(e)) => {
                tracing::debug!(error = %e, "pgrep unavailable");
                false
            }
            Err(_) => false,
        }
    }

    async fn http(&self, url: &str) -> bool {
        let url = url.to_string();
        let timeout = self.attempt_timeout;
        let request = tokio::task::spawn_blocking(move || {
            let config = ureq::Agent::config_builder()
                .timeout_global(Some(timeout))
                .build();
            let agent: ureq::Agent = config.into();
            // Non-2xx statuses come back as errors
            agent.get(&url).call().is_ok()
        });
        request.await.unwrap_or(false)
    }
}

impl Default for SystemProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReadinessProbe for SystemProbe {
    async fn check(&self, check: &ReadinessCheck) -> bool {
        match check {
            ReadinessCheck::TcpPort { addr } => self.tcp(addr).await,
            ReadinessCheck::ProcessMatches { pattern } => self.process(pattern).await,
            ReadinessCheck::HttpOk { url } => self.http(url).await,
        }
    }
}
