// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for external I/O: shell commands, detached processes, readiness probes

pub mod command;
pub mod launch;
pub mod probe;
pub mod traced;

pub use command::{CommandError, CommandRunner, ShellRunner};
pub use launch::{LaunchError, ProcessLauncher, ShellLauncher};
pub use probe::{ReadinessProbe, SystemProbe};
pub use traced::{TracedCommandRunner, TracedLauncher};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use command::{CommandCall, FakeCommandRunner, FakeOutcome};
#[cfg(any(test, feature = "test-support"))]
pub use launch::{FakeLauncher, LaunchCall};
#[cfg(any(test, feature = "test-support"))]
pub use probe::FakeProbe;
