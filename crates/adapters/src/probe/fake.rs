// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake readiness probe for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::ReadinessProbe;
use async_trait::async_trait;
use ow_core::ReadinessCheck;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct FakeProbeState {
    ready_on: Option<u32>,
    checks: Vec<ReadinessCheck>,
}

/// Probe that turns ready on a chosen check
#[derive(Clone, Default)]
pub struct FakeProbe {
    state: Arc<Mutex<FakeProbeState>>,
}

impl FakeProbe {
    /// Never ready
    pub fn never() -> Self {
        Self::default()
    }

    /// Ready from the `n`th check (1-based) onwards
    pub fn ready_on(n: u32) -> Self {
        let probe = Self::default();
        probe.state.lock().unwrap_or_else(|e| e.into_inner()).ready_on = Some(n);
        probe
    }

    /// Number of checks performed
    pub fn check_count(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .checks
            .len()
    }

    /// Checks performed, in order
    pub fn checks(&self) -> Vec<ReadinessCheck> {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .checks
            .clone()
    }
}

#[async_trait]
impl ReadinessProbe for FakeProbe {
    async fn check(&self, check: &ReadinessCheck) -> bool {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.checks.push(check.clone());
        let count = state.checks.len() as u32;
        state.ready_on.map(|n| count >= n).unwrap_or(false)
    }
}
