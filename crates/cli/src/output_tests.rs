// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ow_core::{
    CommandResult, Criticality, DetachedProcess, PhaseResult, PhaseStatus, ProcessStatus, RunState,
};

fn result(name: &str, status: PhaseStatus, criticality: Criticality) -> PhaseResult {
    PhaseResult {
        phase: name.to_string(),
        status,
        criticality,
        commands: vec![CommandResult::completed("true", Some(0), "", "", Duration::ZERO)],
        attempts: 1,
        detached: None,
        ready: None,
        error: None,
        duration: Duration::from_millis(1500),
    }
}

fn outcome(state: RunState, results: Vec<PhaseResult>) -> SetupOutcome {
    SetupOutcome {
        completed: state == RunState::Completed,
        failed_phase: match &state {
            RunState::Aborted { phase, .. } => Some(phase.clone()),
            _ => None,
        },
        state,
        detached: results.iter().filter_map(|r| r.detached.clone()).collect(),
        phase_results: results,
        started_at: Default::default(),
        elapsed: Duration::from_secs(42),
    }
}

#[test]
fn completed_summary_lists_phases_and_processes() {
    let mut serve = result("start-ollama", PhaseStatus::Succeeded, Criticality::Critical);
    serve.detached = Some(DetachedProcess {
        name: "start-ollama".into(),
        pid: 4242,
        started_at: Default::default(),
        log_path: "/tmp/ow/ollama.log".into(),
        status: ProcessStatus::Running,
    });
    serve.ready = Some(false);
    let mut apt = result("apt-update", PhaseStatus::Failed, Criticality::Optional);
    apt.error = Some("`apt-get update -y` exited with exit code 100".into());
    apt.attempts = 3;

    let outcome = outcome(RunState::Completed, vec![serve, apt]);
    let text = Summary::new(&outcome, Path::new("/tmp/ow/ow.log")).to_string();

    assert!(text.starts_with("Setup completed in 42.0s"));
    assert!(text.contains("start-ollama"));
    assert!(text.contains("readiness not confirmed"));
    assert!(text.contains("failed (optional)"));
    assert!(text.contains("3 attempts"));
    assert!(text.contains("exit code 100"));
    assert!(text.contains("Background processes:"));
    assert!(text.contains("start-ollama (pid 4242, running, log /tmp/ow/ollama.log)"));
    assert!(text.ends_with("Log: /tmp/ow/ow.log"));
}

#[test]
fn aborted_summary_names_failed_phase() {
    let outcome = outcome(
        RunState::Aborted {
            phase_index: 1,
            phase: "install-ollama".into(),
        },
        vec![
            result("prepare", PhaseStatus::Succeeded, Criticality::Critical),
            result("install-ollama", PhaseStatus::Failed, Criticality::Critical),
        ],
    );
    let text = Summary::new(&outcome, Path::new("ow.log")).to_string();
    assert!(text.starts_with("Setup failed at phase 'install-ollama'"));
    assert!(text.contains("FAILED"));
}

#[test]
fn interrupted_summary() {
    let outcome = outcome(RunState::Interrupted { next_phase_index: 0 }, vec![]);
    let text = Summary::new(&outcome, Path::new("ow.log")).to_string();
    assert!(text.starts_with("Setup interrupted"));
}

#[test]
fn json_summary_includes_outcome_fields() {
    let outcome = outcome(RunState::Completed, vec![]);
    let json = render(&Summary::new(&outcome, Path::new("ow.log")), OutputFormat::Json);
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["completed"], true);
    assert_eq!(value["elapsed"], "42s");
    assert_eq!(value["log_file"], "ow.log");
}

#[test]
fn plan_groups_parallel_batches() {
    let phases = vec![
        PhaseSpec::commands("prepare", ["mkdir -p /usr/local/bin"])
            .parallel()
            .optional(),
        PhaseSpec::commands("fetch", ["curl -o x"]).parallel(),
        PhaseSpec::launch("tunnel", "cloudflared tunnel run --token s3cret", "/tmp/cf.log"),
    ];
    let text = Plan::new(&phases).to_string();

    assert!(text.starts_with("3 phases in 2 batches"));
    assert!(text.contains("1. parallel batch"));
    assert!(text.contains("prepare (timeout 300.0s, optional)"));
    assert!(text.contains("$ mkdir -p /usr/local/bin"));
    assert!(text.contains("& cloudflared tunnel run"));
}

#[test]
fn printed_output_is_redacted() {
    let phases = vec![PhaseSpec::launch(
        "tunnel",
        "cloudflared tunnel run --token s3cret",
        "/tmp/cf.log",
    )];
    let secrets = vec!["s3cret".to_string()];
    for format in [OutputFormat::Text, OutputFormat::Json] {
        let rendered = redact_secrets(&render(&Plan::new(&phases), format), &secrets);
        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("--token ***"));
    }
}

#[test]
fn exited_background_process_is_flagged() {
    let mut tunnel = result("start-tunnel", PhaseStatus::Succeeded, Criticality::Critical);
    tunnel.detached = Some(DetachedProcess {
        name: "start-tunnel".into(),
        pid: 77,
        started_at: Default::default(),
        log_path: "/tmp/ow/cloudflared.log".into(),
        status: ProcessStatus::Exited,
    });

    let outcome = outcome(RunState::Completed, vec![tunnel]);
    let text = Summary::new(&outcome, Path::new("/tmp/ow/ow.log")).to_string();
    assert!(text.contains("start-tunnel (pid 77, exited, log /tmp/ow/cloudflared.log)"));

    let json = render(&Summary::new(&outcome, Path::new("ow.log")), OutputFormat::Json);
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["detached"][0]["status"], "exited");
}
