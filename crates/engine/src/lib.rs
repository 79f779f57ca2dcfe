// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Provisioning engine: runs phases in order, in parallel batches where allowed

mod batch;
mod error;
mod executor;
mod poll;
mod pool;
mod sequencer;

pub use batch::plan_batches;
pub use error::{PhaseError, WorkerLost};
pub use executor::PhaseExecutor;
pub use poll::poll_ready;
pub use pool::{default_workers, WorkerPool};
pub use sequencer::Sequencer;
pub use tokio_util::sync::CancellationToken;
