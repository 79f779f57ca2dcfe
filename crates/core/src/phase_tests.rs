// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn command_phase_defaults() {
    let phase = PhaseSpec::commands("install", ["echo a", "echo b"]);
    assert_eq!(phase.name, "install");
    assert_eq!(phase.timeout, DEFAULT_PHASE_TIMEOUT);
    assert!(phase.is_critical());
    assert!(!phase.parallel);
    assert_eq!(phase.retry, RetryPolicy::none());
    assert_eq!(phase.action.commands(), vec!["echo a", "echo b"]);
}

#[test]
fn builders_set_flags() {
    let phase = PhaseSpec::commands("clean", ["apt-get clean"])
        .optional()
        .parallel()
        .with_timeout(Duration::from_secs(10))
        .with_env("DEBIAN_FRONTEND", "noninteractive");

    assert_eq!(phase.criticality, Criticality::Optional);
    assert!(phase.parallel);
    assert_eq!(phase.timeout, Duration::from_secs(10));
    assert_eq!(
        phase.env,
        vec![("DEBIAN_FRONTEND".to_string(), "noninteractive".to_string())]
    );
}

#[test]
fn readiness_only_attaches_to_launch() {
    let spec = ReadinessSpec {
        check: ReadinessCheck::TcpPort {
            addr: "127.0.0.1:11434".to_string(),
        },
        policy: PollPolicy::new(3, Duration::from_millis(100)),
        on_timeout: ReadinessTimeoutPolicy::Proceed,
    };

    let launch = PhaseSpec::launch("serve", "ollama serve", "/tmp/ollama.log")
        .with_readiness(spec.clone());
    assert!(matches!(
        launch.action,
        PhaseAction::Launch { readiness: Some(ref r), .. } if *r == spec
    ));

    let cmds = PhaseSpec::commands("x", ["true"]).with_readiness(spec);
    assert!(matches!(cmds.action, PhaseAction::Commands(_)));
}

#[test]
fn readiness_check_labels() {
    let check = ReadinessCheck::ProcessMatches {
        pattern: "cloudflared tunnel run".to_string(),
    };
    assert_eq!(check.kind(), "process");
    assert_eq!(check.target(), "cloudflared tunnel run");
}

#[test]
fn phase_serializes_timeout_as_humantime() {
    let phase = PhaseSpec::commands("pull", ["ollama pull llama3"])
        .with_timeout(Duration::from_secs(7200));
    let json = serde_json::to_value(&phase).unwrap();
    assert_eq!(json["timeout"], "2h");
    assert_eq!(json["criticality"], "critical");
}
