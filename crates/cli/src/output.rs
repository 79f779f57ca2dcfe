// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for the run summary and the dry-run plan
//!
//! Everything printed passes through `redact_secrets` first.

use clap::ValueEnum;
use ow_core::{redact_secrets, PhaseAction, PhaseSpec, SetupOutcome};
use ow_engine::plan_batches;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Render a value in the specified format
pub fn render<T: Serialize + fmt::Display>(value: &T, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => value.to_string(),
        OutputFormat::Json => serde_json::to_string_pretty(value).unwrap_or_default(),
    }
}

/// Print a value with every secret masked
pub fn print<T: Serialize + fmt::Display>(value: &T, format: OutputFormat, secrets: &[String]) {
    println!("{}", redact_secrets(&render(value, format), secrets));
}

/// Final report of a run
#[derive(Serialize)]
pub struct Summary<'a> {
    #[serde(flatten)]
    pub outcome: &'a SetupOutcome,
    pub log_file: PathBuf,
}

impl<'a> Summary<'a> {
    pub fn new(outcome: &'a SetupOutcome, log_file: &Path) -> Self {
        Self {
            outcome,
            log_file: log_file.to_path_buf(),
        }
    }
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = self.outcome;
        let elapsed = secs(outcome.elapsed);
        if outcome.completed {
            writeln!(f, "Setup completed in {}", elapsed)?;
        } else if outcome.is_interrupted() {
            writeln!(f, "Setup interrupted after {}", elapsed)?;
        } else {
            writeln!(
                f,
                "Setup failed at phase '{}' after {}",
                outcome.failed_phase.as_deref().unwrap_or("?"),
                elapsed
            )?;
        }

        writeln!(f)?;
        for result in &outcome.phase_results {
            let mark = match (result.succeeded(), result.criticality.is_critical()) {
                (true, _) => "ok",
                (false, true) => "FAILED",
                (false, false) => "failed (optional)",
            };
            write!(
                f,
                "  {:<28} {:<18} {}",
                result.phase,
                mark,
                secs(result.duration)
            )?;
            if result.attempts > 1 {
                write!(f, ", {} attempts", result.attempts)?;
            }
            if result.ready == Some(false) {
                write!(f, ", readiness not confirmed")?;
            }
            writeln!(f)?;
            if let Some(error) = &result.error {
                writeln!(f, "      {}", error)?;
            }
        }

        if !outcome.detached.is_empty() {
            writeln!(f)?;
            writeln!(f, "Background processes:")?;
            for process in &outcome.detached {
                writeln!(f, "  {}", process)?;
            }
        }

        writeln!(f)?;
        write!(f, "Log: {}", self.log_file.display())
    }
}

/// The phases a run would execute, grouped into batches
#[derive(Serialize)]
pub struct Plan<'a> {
    pub batches: Vec<&'a [PhaseSpec]>,
}

impl<'a> Plan<'a> {
    pub fn new(phases: &'a [PhaseSpec]) -> Self {
        Self {
            batches: plan_batches(phases)
                .into_iter()
                .map(|range| &phases[range])
                .collect(),
        }
    }
}

impl fmt::Display for Plan<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total: usize = self.batches.iter().map(|b| b.len()).sum();
        write!(f, "{} phases in {} batches", total, self.batches.len())?;
        for (index, batch) in self.batches.iter().enumerate() {
            writeln!(f)?;
            if batch.len() > 1 {
                write!(f, "\n{}. parallel batch", index + 1)?;
            } else {
                write!(f, "\n{}.", index + 1)?;
            }
            for phase in batch.iter() {
                write_phase(f, phase)?;
            }
        }
        Ok(())
    }
}

fn write_phase(f: &mut fmt::Formatter<'_>, phase: &PhaseSpec) -> fmt::Result {
    let mut flags = vec![format!("timeout {}", secs(phase.timeout))];
    if !phase.is_critical() {
        flags.push("optional".to_string());
    }
    if phase.retry.max_attempts > 1 {
        flags.push(format!("{} attempts", phase.retry.max_attempts));
    }
    write!(f, "\n   {} ({})", phase.name, flags.join(", "))?;

    match &phase.action {
        PhaseAction::Commands(commands) => {
            for command in commands {
                write!(f, "\n     $ {}", command)?;
            }
        }
        PhaseAction::Launch {
            command,
            log_path,
            readiness,
        } => {
            write!(f, "\n     & {}  > {}", command, log_path.display())?;
            if let Some(ready) = readiness {
                write!(
                    f,
                    "\n     ready: {} {} ({} x {})",
                    ready.check.kind(),
                    ready.check.target(),
                    ready.policy.max_attempts,
                    secs(ready.policy.interval)
                )?;
            }
        }
    }
    Ok(())
}

fn secs(duration: Duration) -> String {
    format!("{:.1}s", duration.as_secs_f64())
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
