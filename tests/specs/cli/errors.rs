//! Configuration and runbook error specs
//!
//! Every error here is caught before a single phase runs and exits with 2.

use crate::prelude::*;

#[test]
fn builtin_runbook_without_token_explains_how_to_set_one() {
    Project::empty()
        .ow()
        .exits(2)
        .stderr_has("No Cloudflare tunnel token configured")
        .stderr_has("start-tunnel")
        .stderr_has("export OW_TUNNEL_TOKEN=<token>");
}

#[test]
fn missing_token_runs_nothing() {
    let temp = Project::empty();
    temp.ow().exits(2);
    assert!(!temp.log_dir().join("ow.log").exists());
}

#[test]
fn model_with_shell_syntax_is_refused_before_running() {
    let temp = Project::empty();
    temp.ow()
        .args(&["x; touch pwned", "--dry-run"])
        .env("OW_TUNNEL_TOKEN", FAKE_TOKEN)
        .exits(2)
        .stderr_has("Invalid configuration")
        .stderr_has("x; touch pwned");
    assert!(!temp.path().join("pwned").exists());
}

#[test]
fn missing_runbook_file_is_reported() {
    Project::empty()
        .ow()
        .args(&["--runbook", "nope.toml"])
        .exits(2)
        .stderr_has("Could not read nope.toml");
}

#[test]
fn malformed_toml_is_reported() {
    let temp = Project::empty();
    temp.file("bad.toml", "[[phase]\nname = ");
    temp.ow()
        .args(&["--runbook", "bad.toml"])
        .exits(2)
        .stderr_has("valid TOML");
}

#[test]
fn invalid_runbook_lists_every_problem() {
    let temp = Project::empty();
    temp.file(
        "dupes.toml",
        r#"
[[phase]]
name = "same"
run = "true"

[[phase]]
name = "same"
run = "true"

[[phase]]
name = "neither"
"#,
    );
    temp.ow()
        .args(&["--runbook", "dupes.toml"])
        .exits(2)
        .stderr_has("Invalid runbook: dupes.toml")
        .stderr_has("same")
        .stderr_has("neither");
}

#[test]
fn undefined_variable_suggests_var_flag() {
    let temp = Project::empty();
    temp.file(
        "vars.toml",
        r#"
[[phase]]
name = "greet"
run = "echo {greeting}"
"#,
    );
    temp.ow()
        .args(&["--runbook", "vars.toml"])
        .exits(2)
        .stderr_has("undefined variable '{greeting}'")
        .stderr_has("ow --var greeting=<value>");
}

#[test]
fn non_numeric_worker_count_is_rejected() {
    let temp = Project::empty();
    temp.file("ok.toml", MINIMAL_RUNBOOK);
    temp.ow()
        .args(&["--runbook", "ok.toml"])
        .env("OW_MAX_WORKERS", "lots")
        .exits(2)
        .stderr_has("OW_MAX_WORKERS");
}
