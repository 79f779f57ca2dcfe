// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Runbook parsing, validation and loading
//!
//! A runbook is a TOML file listing `[[phase]]` tables in execution order.
//! Loading turns it into `ow_core::PhaseSpec`s with every `{var}` resolved.

mod builtin;
mod loader;
mod parser;
mod template;
mod types;
mod validator;

pub use builtin::{builtin_runbook, BUILTIN_RUNBOOK};
pub use loader::{load_runbook, LoadError};
pub use parser::{parse_runbook, parse_runbook_file, ParseError};
pub use template::{interpolate, unresolved_vars};
pub use types::{RawPhase, RawReady, RawRun, RawRunbook};
pub use validator::{validate_runbook, ValidationError, ValidationErrors};
