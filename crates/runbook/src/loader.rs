// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Turn a validated runbook into executable phases

use crate::template::{interpolate, unresolved_vars};
use crate::{
    validate_runbook, RawPhase, RawReady, RawRunbook, ValidationError, ValidationErrors,
};
use ow_core::{PhaseSpec, PollPolicy, ReadinessCheck, ReadinessSpec, RetryPolicy};
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur while loading a runbook
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),
    #[error("phase '{phase}' uses undefined variable '{{{variable}}}'")]
    UnresolvedVariable { phase: String, variable: String },
}

/// Validate and interpolate a runbook into phases, preserving declared order
///
/// Caller `vars` override the runbook's `[vars]` table.
pub fn load_runbook(
    runbook: &RawRunbook,
    vars: &HashMap<String, String>,
) -> Result<Vec<PhaseSpec>, LoadError> {
    validate_runbook(runbook)?;

    let mut merged: HashMap<String, String> = runbook
        .vars
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    merged.extend(vars.iter().map(|(k, v)| (k.clone(), v.clone())));

    runbook
        .phase
        .iter()
        .map(|raw| load_phase(raw, &merged))
        .collect()
}

fn load_phase(raw: &RawPhase, vars: &HashMap<String, String>) -> Result<PhaseSpec, LoadError> {
    let render = |text: &str| -> Result<String, LoadError> {
        let rendered = interpolate(text, vars);
        match unresolved_vars(&rendered).into_iter().next() {
            Some(variable) => Err(LoadError::UnresolvedVariable {
                phase: raw.name.clone(),
                variable,
            }),
            None => Ok(rendered),
        }
    };

    let mut phase = match (&raw.run, &raw.launch) {
        (Some(run), _) => {
            let commands = run
                .commands()
                .into_iter()
                .map(&render)
                .collect::<Result<Vec<_>, _>>()?;
            PhaseSpec::commands(&raw.name, commands)
        }
        (None, Some(launch)) => {
            let log = match &raw.log {
                Some(log) => render(log)?,
                None => render(&format!("{{log_dir}}/{}.log", raw.name))?,
            };
            let mut phase = PhaseSpec::launch(&raw.name, render(launch)?, log);
            if let Some(ready) = &raw.ready {
                phase = phase.with_readiness(load_ready(&raw.name, ready, &render)?);
            }
            phase
        }
        (None, None) => return Err(invalid(ValidationError::ActionCount(raw.name.clone()))),
    };

    if let Some(timeout) = raw.timeout {
        phase = phase.with_timeout(timeout);
    }
    if !raw.critical {
        phase = phase.optional();
    }
    if raw.parallel {
        phase = phase.parallel();
    }
    if raw.retries > 0 {
        phase = phase.with_retry(RetryPolicy::with_retries(raw.retries));
    }
    for (key, value) in &raw.env {
        phase = phase.with_env(key, render(value)?);
    }
    Ok(phase)
}

fn load_ready(
    name: &str,
    ready: &RawReady,
    render: &impl Fn(&str) -> Result<String, LoadError>,
) -> Result<ReadinessSpec, LoadError> {
    let check = match (&ready.tcp, &ready.process, &ready.http) {
        (Some(addr), None, None) => ReadinessCheck::TcpPort {
            addr: render(addr)?,
        },
        (None, Some(pattern), None) => ReadinessCheck::ProcessMatches {
            pattern: render(pattern)?,
        },
        (None, None, Some(url)) => ReadinessCheck::HttpOk { url: render(url)? },
        _ => return Err(invalid(ValidationError::ReadyCheckCount(name.to_string()))),
    };
    Ok(ReadinessSpec {
        check,
        policy: PollPolicy::new(ready.attempts, ready.interval).with_jitter(ready.jitter),
        on_timeout: ready.on_timeout.unwrap_or_default(),
    })
}

fn invalid(error: ValidationError) -> LoadError {
    LoadError::Invalid(ValidationErrors(vec![error]))
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
