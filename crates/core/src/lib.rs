// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ow-core: data model for the Ollama Wizard provisioning sequencer
//!
//! This crate provides:
//! - Phase definitions (commands, launches, readiness checks)
//! - Command, phase and run results
//! - The run state machine
//! - Retry and polling policies
//! - Server and tunnel configuration values
//!
//! Nothing in here performs I/O.

pub mod clock;
pub mod config;
pub mod phase;
pub mod process;
pub mod progress;
pub mod result;
pub mod retry;
pub mod run_state;
pub mod traced;

pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{redact_secrets, ServerConfig, TunnelToken};
pub use phase::{
    Criticality, PhaseAction, PhaseSpec, ReadinessCheck, ReadinessSpec, ReadinessTimeoutPolicy,
    DEFAULT_PHASE_TIMEOUT,
};
pub use process::{DetachedProcess, ProcessStatus};
pub use progress::{NoOpProgress, ProgressSink, ProgressState};
pub use result::{CommandResult, PhaseResult, PhaseStatus, SetupOutcome};
pub use retry::{PollPolicy, RetryPolicy};
pub use run_state::{RunEvent, RunState, RunStateError};
pub use traced::TracedPhase;
