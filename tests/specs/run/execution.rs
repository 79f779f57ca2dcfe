//! Run specs
//!
//! Verify exit codes and the summary for custom runbooks.

use crate::prelude::*;

#[test]
fn successful_run_exits_zero() {
    let temp = Project::empty();
    temp.file("ok.toml", MINIMAL_RUNBOOK);

    temp.ow()
        .args(&["--runbook", "ok.toml"])
        .passes()
        .stdout_has("Setup completed in")
        .stdout_has("only")
        .stdout_has("Log: ");
}

#[test]
fn critical_failure_exits_one_and_names_the_phase() {
    let temp = Project::empty();
    temp.file(
        "fail.toml",
        r#"
[[phase]]
name = "install"
run = "exit 7"

[[phase]]
name = "configure"
run = "touch configured"
"#,
    );

    temp.ow()
        .args(&["--runbook", "fail.toml"])
        .exits(1)
        .stdout_has("Setup failed at phase 'install'")
        .stdout_has("FAILED")
        .stdout_lacks("configure");
    assert!(!temp.path().join("configured").exists());
}

#[test]
fn optional_failure_still_completes() {
    let temp = Project::empty();
    temp.file(
        "optional.toml",
        r#"
[[phase]]
name = "cleanup"
run = "exit 1"
critical = false

[[phase]]
name = "install"
run = "touch installed"
"#,
    );

    temp.ow()
        .args(&["--runbook", "optional.toml"])
        .passes()
        .stdout_has("Setup completed in")
        .stdout_has("failed (optional)");
    assert!(temp.path().join("installed").exists());
}

#[test]
fn token_is_redacted_in_failures_and_logs() {
    let temp = Project::empty();
    temp.file(
        "secret.toml",
        r#"
[[phase]]
name = "login"
run = "echo {tunnel_token} >&2; exit 1"
"#,
    );

    temp.ow()
        .args(&["--runbook", "secret.toml"])
        .env("OW_TUNNEL_TOKEN", FAKE_TOKEN)
        .exits(1)
        .stdout_has("***")
        .stdout_lacks(FAKE_TOKEN)
        .stderr_lacks(FAKE_TOKEN);

    let log = std::fs::read_to_string(temp.log_dir().join("ow.log")).unwrap();
    assert!(log.contains("login"), "{log}");
    assert!(!log.contains(FAKE_TOKEN), "token written to ow.log:\n{log}");
}

#[test]
fn progress_goes_to_stderr() {
    let temp = Project::empty();
    temp.file("ok.toml", MINIMAL_RUNBOOK);

    temp.ow()
        .args(&["--runbook", "ok.toml"])
        .passes()
        .stderr_has("100%");
}
