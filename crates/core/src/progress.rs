// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Observational progress reporting
//!
//! Progress is write-only from the sequencer's point of view. Nothing in the
//! control path reads it back, so `NoOpProgress` is always a valid sink.

use serde::Serialize;

/// Progress of the currently active phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressState {
    pub phase: String,
    pub current: u32,
    pub total: u32,
    pub status: String,
}

impl ProgressState {
    pub fn new(
        phase: impl Into<String>,
        current: u32,
        total: u32,
        status: impl Into<String>,
    ) -> Self {
        let total = total.max(1);
        Self {
            phase: phase.into(),
            current: current.min(total),
            total,
            status: status.into(),
        }
    }

    /// Completion in whole percent, 0..=100
    pub fn percent(&self) -> u8 {
        ((u64::from(self.current) * 100) / u64::from(self.total)) as u8
    }

    pub fn is_complete(&self) -> bool {
        self.current >= self.total
    }
}

/// Receives progress updates
pub trait ProgressSink: Send + Sync {
    fn update(&self, state: &ProgressState);
}

/// Sink that discards every update
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpProgress;

impl ProgressSink for NoOpProgress {
    fn update(&self, _state: &ProgressState) {}
}
