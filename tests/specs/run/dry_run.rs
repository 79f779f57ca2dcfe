//! Dry-run specs
//!
//! `--dry-run` prints the resolved plan and never executes anything.

use crate::prelude::*;

#[test]
fn builtin_plan_lists_every_phase() {
    Project::empty()
        .ow()
        .args(&["--dry-run"])
        .env("OW_TUNNEL_TOKEN", FAKE_TOKEN)
        .passes()
        .stdout_has("13 phases in 9 batches")
        .stdout_has("install-ollama")
        .stdout_has("start-ollama")
        .stdout_has("start-tunnel")
        .stdout_has("pull-model");
}

#[test]
fn builtin_plan_never_shows_the_token() {
    Project::empty()
        .ow()
        .args(&["--dry-run"])
        .env("OW_TUNNEL_TOKEN", FAKE_TOKEN)
        .passes()
        .stdout_has("cloudflared tunnel run --token ***")
        .stdout_lacks(FAKE_TOKEN);
}

#[test]
fn json_plan_never_shows_the_token() {
    Project::empty()
        .ow()
        .args(&["--dry-run", "--format", "json"])
        .env("OW_TUNNEL_TOKEN", FAKE_TOKEN)
        .passes()
        .stdout_has("\"batches\"")
        .stdout_lacks(FAKE_TOKEN);
}

#[test]
fn model_defaults_to_llama() {
    Project::empty()
        .ow()
        .args(&["--dry-run"])
        .env("OW_TUNNEL_TOKEN", FAKE_TOKEN)
        .passes()
        .stdout_has("ollama pull llama3.2");
}

#[test]
fn model_from_environment() {
    Project::empty()
        .ow()
        .args(&["--dry-run"])
        .env("OW_TUNNEL_TOKEN", FAKE_TOKEN)
        .env("OW_MODEL", "qwen2.5")
        .passes()
        .stdout_has("ollama pull qwen2.5");
}

#[test]
fn positional_model_beats_environment() {
    Project::empty()
        .ow()
        .args(&["mistral", "--dry-run"])
        .env("OW_TUNNEL_TOKEN", FAKE_TOKEN)
        .env("OW_MODEL", "qwen2.5")
        .passes()
        .stdout_has("ollama pull mistral")
        .stdout_lacks("qwen2.5");
}

#[test]
fn server_settings_flow_into_the_plan() {
    Project::empty()
        .ow()
        .args(&["--dry-run", "--format", "json"])
        .env("OW_TUNNEL_TOKEN", FAKE_TOKEN)
        .env("OW_OLLAMA_HOST", "10.1.2.3")
        .passes()
        .stdout_has("\"OLLAMA_HOST\"")
        .stdout_has("\"10.1.2.3\"");
}

#[test]
fn custom_plan_is_printed_exactly() {
    let temp = Project::empty();
    temp.file(
        "plan.toml",
        r#"
[[phase]]
name = "a"
run = "echo a"
parallel = true

[[phase]]
name = "b"
run = "echo b"
parallel = true
critical = false

[[phase]]
name = "c"
run = ["echo c1", "echo c2"]
timeout = "10s"
retries = 2
"#,
    );

    temp.ow().args(&["--runbook", "plan.toml", "--dry-run"]).passes().stdout_eq(
        "3 phases in 2 batches

1. parallel batch
   a (timeout 300.0s)
     $ echo a
   b (timeout 300.0s, optional)
     $ echo b

2.
   c (timeout 10.0s, 3 attempts)
     $ echo c1
     $ echo c2
",
    );
}

#[test]
fn dry_run_executes_nothing() {
    let temp = Project::empty();
    temp.file(
        "touch.toml",
        r#"
[[phase]]
name = "touch"
run = "touch marker"
"#,
    );

    temp.ow()
        .args(&["--runbook", "touch.toml", "--dry-run"])
        .passes();
    assert!(!temp.path().join("marker").exists());
}
