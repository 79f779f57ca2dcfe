//! CLI help specs

use crate::prelude::*;

#[test]
fn help_lists_the_options() {
    Project::empty()
        .ow()
        .args(&["--help"])
        .passes()
        .stdout_has("Ollama Wizard")
        .stdout_has("[MODEL]")
        .stdout_has("--runbook")
        .stdout_has("--dry-run")
        .stdout_has("--var");
}

#[test]
fn version_prints() {
    Project::empty()
        .ow()
        .args(&["--version"])
        .passes()
        .stdout_has("ow ");
}

#[test]
fn completions_are_generated_for_bash() {
    Project::empty()
        .ow()
        .args(&["--completions", "bash"])
        .passes()
        .stdout_has("_ow");
}

#[test]
fn unknown_flag_is_a_usage_error() {
    Project::empty()
        .ow()
        .args(&["--no-such-flag"])
        .exits(2)
        .stderr_has("--no-such-flag");
}
