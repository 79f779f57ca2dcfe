// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run state machine
//!
//! ```text
//! NotStarted -> Running(i) -> Completed
//!                          -> Aborted(i)
//!                          -> Interrupted
//! ```
//!
//! Cancellation before the first phase goes straight to `Interrupted`.
//! Terminal states accept no further events.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RunState {
    #[default]
    NotStarted,
    Running { phase_index: usize },
    Completed,
    Aborted { phase_index: usize, phase: String },
    /// Cancelled externally; `next_phase_index` is the first phase not started
    Interrupted { next_phase_index: usize },
}

/// Events that drive the run state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    Start,
    PhaseStarted { index: usize },
    PhaseFailed { index: usize, phase: String },
    Finished,
    Cancelled { next_index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunStateError {
    #[error("invalid run transition from {from} on {event}")]
    InvalidTransition { from: String, event: String },
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RunState::Completed | RunState::Aborted { .. } | RunState::Interrupted { .. }
        )
    }

    /// Apply an event, returning the next state
    pub fn transition(&self, event: RunEvent) -> Result<RunState, RunStateError> {
        let next = match (self, &event) {
            (RunState::NotStarted, RunEvent::Start) => RunState::Running { phase_index: 0 },
            (RunState::NotStarted, RunEvent::Cancelled { .. }) => {
                RunState::Interrupted { next_phase_index: 0 }
            }
            (RunState::Running { phase_index }, RunEvent::PhaseStarted { index })
                if index >= phase_index =>
            {
                RunState::Running { phase_index: *index }
            }
            (RunState::Running { .. }, RunEvent::PhaseFailed { index, phase }) => {
                RunState::Aborted {
                    phase_index: *index,
                    phase: phase.clone(),
                }
            }
            (RunState::Running { .. }, RunEvent::Finished) => RunState::Completed,
            (RunState::Running { .. }, RunEvent::Cancelled { next_index }) => {
                RunState::Interrupted {
                    next_phase_index: *next_index,
                }
            }
            _ => {
                return Err(RunStateError::InvalidTransition {
                    from: self.to_string(),
                    event: format!("{:?}", event),
                })
            }
        };
        Ok(next)
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::NotStarted => write!(f, "not started"),
            RunState::Running { phase_index } => write!(f, "running phase {}", phase_index + 1),
            RunState::Completed => write!(f, "completed"),
            RunState::Aborted { phase, .. } => write!(f, "aborted at {}", phase),
            RunState::Interrupted { .. } => write!(f, "interrupted"),
        }
    }
}

#[cfg(test)]
#[path = "run_state_tests.rs"]
mod tests;
