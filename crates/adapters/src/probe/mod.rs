// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Readiness probes for launched processes

mod system;

pub use system::SystemProbe;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeProbe;

use async_trait::async_trait;
use ow_core::ReadinessCheck;

/// Answers one readiness question
///
/// Probe failures of any kind (refused connection, missing `pgrep`, HTTP
/// error) mean "not ready yet"; they are never errors.
#[async_trait]
pub trait ReadinessProbe: Clone + Send + Sync + 'static {
    async fn check(&self, check: &ReadinessCheck) -> bool;
}
