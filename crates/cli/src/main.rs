// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ow - Ollama Wizard
//!
//! Installs Ollama, starts the server, exposes it through a Cloudflare tunnel
//! and pulls a model.

mod completions;
mod config;
mod error;
mod logging;
mod output;
mod progress;

use anyhow::Result;
use clap::Parser;
use clap_complete::Shell;
use ow_adapters::{ShellLauncher, ShellRunner, SystemProbe, TracedCommandRunner, TracedLauncher};
use ow_core::{SetupOutcome, SystemClock};
use ow_engine::{CancellationToken, PhaseExecutor, Sequencer, WorkerPool};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config::WizardConfig;
use crate::error::WizardError;
use crate::output::{OutputFormat, Plan, Summary};
use crate::progress::TerminalProgress;

/// Exit status when a critical phase fails
const EXIT_FAILED: u8 = 1;
/// Exit status for configuration and runbook errors
const EXIT_CONFIG: u8 = 2;
/// Exit status after Ctrl-C, as a shell would report SIGINT
const EXIT_INTERRUPTED: u8 = 130;

#[derive(Parser)]
#[command(
    name = "ow",
    version,
    about = "Ollama Wizard - install Ollama, open a Cloudflare tunnel and pull a model"
)]
struct Cli {
    /// Model to pull (defaults to $OW_MODEL, then llama3.2)
    model: Option<String>,

    /// Use a TOML runbook instead of the built-in one
    #[arg(long, value_name = "PATH")]
    runbook: Option<PathBuf>,

    /// Extra template variable for the runbook (repeatable)
    #[arg(long = "var", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    vars: Vec<(String, String)>,

    /// Print the phases that would run and exit
    #[arg(long)]
    dry_run: bool,

    /// Summary format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Also write logs to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Print shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<Shell>,
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{}'", s)),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            match e.downcast_ref::<WizardError>() {
                Some(wizard) => eprint!("{}", wizard),
                None => eprintln!("error: {:#}", e),
            }
            ExitCode::from(EXIT_CONFIG)
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    if let Some(shell) = cli.completions {
        completions::generate_completions::<Cli>(shell);
        return Ok(ExitCode::SUCCESS);
    }

    let config = WizardConfig::from_env(cli.model.clone()).map_err(WizardError::bad_config)?;

    let raw = match &cli.runbook {
        Some(path) => ow_runbook::parse_runbook_file(path),
        None => ow_runbook::builtin_runbook(),
    }
    .map_err(|e| WizardError::runbook_unreadable(cli.runbook.as_deref(), e))?;

    let mut vars = config.template_vars();
    vars.extend(cli.vars.iter().cloned());
    let phases = ow_runbook::load_runbook(&raw, &vars)
        .map_err(|e| WizardError::runbook_invalid(cli.runbook.as_deref(), e))?;

    // --var values may carry credentials too
    let mut secrets = config.secrets();
    secrets.extend(
        cli.vars
            .iter()
            .filter(|(key, _)| key.contains("token"))
            .map(|(_, value)| value.clone()),
    );

    if cli.dry_run {
        output::print(&Plan::new(&phases), cli.format, &secrets);
        return Ok(ExitCode::SUCCESS);
    }

    let _guard = logging::setup_logging(&config.log_dir, cli.verbose)?;
    tracing::info!(
        phases = phases.len(),
        model = config.model.as_deref().unwrap_or("runbook default"),
        token = config.tunnel_token.is_some(),
        log_dir = %config.log_dir.display(),
        "ow starting"
    );

    let cancel = CancellationToken::new();
    install_interrupt_handler(cancel.clone())?;

    let executor = PhaseExecutor::new(
        TracedCommandRunner::new(ShellRunner::new()).with_secrets(secrets.clone()),
        TracedLauncher::new(ShellLauncher::new()).with_secrets(secrets.clone()),
        SystemProbe::new(),
        SystemClock,
    )
    .with_secrets(secrets.clone());
    let sequencer = Sequencer::new(executor).with_pool(WorkerPool::new(config.max_workers));

    let outcome = sequencer
        .run(&phases, Arc::new(TerminalProgress::new()), cancel)
        .await;

    let log_file = logging::log_path(&config.log_dir);
    output::print(&Summary::new(&outcome, &log_file), cli.format, &secrets);
    Ok(exit_code(&outcome))
}

/// First Ctrl-C stops after the running phase; a second one exits at once
fn install_interrupt_handler(cancel: CancellationToken) -> Result<()> {
    let interrupted = AtomicBool::new(false);
    ctrlc::set_handler(move || {
        if interrupted.swap(true, Ordering::SeqCst) {
            eprintln!("\nInterrupted again, exiting now");
            std::process::exit(i32::from(EXIT_INTERRUPTED));
        }
        eprintln!("\nInterrupted, stopping after the current phase (Ctrl-C again to exit)");
        cancel.cancel();
    })?;
    Ok(())
}

fn exit_code(outcome: &SetupOutcome) -> ExitCode {
    if outcome.completed {
        ExitCode::SUCCESS
    } else if outcome.is_interrupted() {
        ExitCode::from(EXIT_INTERRUPTED)
    } else {
        ExitCode::from(EXIT_FAILED)
    }
}
