// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Structural checks on a parsed runbook

use crate::{RawPhase, RawReady, RawRunbook};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// A single problem found in a runbook
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("phase #{index} has no name")]
    EmptyName { index: usize },
    #[error("phase name '{0}' is used more than once")]
    DuplicateName(String),
    #[error("phase '{0}' must set exactly one of 'run' or 'launch'")]
    ActionCount(String),
    #[error("phase '{0}' has an empty command")]
    EmptyCommand(String),
    #[error("phase '{0}' sets '{1}' but is not a launch phase")]
    LaunchOnly(String, &'static str),
    #[error("phase '{0}' launches a process and cannot retry")]
    RetriesOnLaunch(String),
    #[error("phase '{0}' readiness must name exactly one of tcp, process or http")]
    ReadyCheckCount(String),
    #[error("phase '{0}' readiness needs at least one attempt")]
    ZeroAttempts(String),
    #[error("phase '{0}' has a zero timeout")]
    ZeroTimeout(String),
}

/// Every problem found in a runbook, in phase order
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "invalid runbook: {}", messages.join("; "))
    }
}

/// Check a runbook for structural problems, reporting all of them at once
pub fn validate_runbook(runbook: &RawRunbook) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for (index, phase) in runbook.phase.iter().enumerate() {
        if phase.name.trim().is_empty() {
            errors.push(ValidationError::EmptyName { index });
        } else if !seen.insert(phase.name.as_str()) {
            errors.push(ValidationError::DuplicateName(phase.name.clone()));
        }
        validate_phase(phase, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errors))
    }
}

fn validate_phase(phase: &RawPhase, errors: &mut Vec<ValidationError>) {
    let name = &phase.name;

    match (&phase.run, &phase.launch) {
        (Some(run), None) => {
            let commands = run.commands();
            if commands.is_empty() || commands.iter().any(|c| c.trim().is_empty()) {
                errors.push(ValidationError::EmptyCommand(name.clone()));
            }
            if phase.ready.is_some() {
                errors.push(ValidationError::LaunchOnly(name.clone(), "ready"));
            }
            if phase.log.is_some() {
                errors.push(ValidationError::LaunchOnly(name.clone(), "log"));
            }
        }
        (None, Some(launch)) => {
            if launch.trim().is_empty() {
                errors.push(ValidationError::EmptyCommand(name.clone()));
            }
            if phase.retries > 0 {
                errors.push(ValidationError::RetriesOnLaunch(name.clone()));
            }
            if let Some(ready) = &phase.ready {
                validate_ready(name, ready, errors);
            }
        }
        _ => errors.push(ValidationError::ActionCount(name.clone())),
    }

    if phase.timeout.is_some_and(|t| t.is_zero()) {
        errors.push(ValidationError::ZeroTimeout(name.clone()));
    }
}

fn validate_ready(name: &str, ready: &RawReady, errors: &mut Vec<ValidationError>) {
    let checks = [&ready.tcp, &ready.process, &ready.http]
        .iter()
        .filter(|c| c.is_some())
        .count();
    if checks != 1 {
        errors.push(ValidationError::ReadyCheckCount(name.to_string()));
    }
    if ready.attempts == 0 {
        errors.push(ValidationError::ZeroAttempts(name.to_string()));
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
