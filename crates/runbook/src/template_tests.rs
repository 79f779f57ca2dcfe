// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn interpolate_simple() {
    assert_eq!(
        interpolate("ollama pull {model}", &vars(&[("model", "llama3")])),
        "ollama pull llama3"
    );
}

#[test]
fn interpolate_multiple() {
    let v = vars(&[("a", "1"), ("b", "2")]);
    assert_eq!(interpolate("{a} + {b} = {a}{b}", &v), "1 + 2 = 12");
}

#[test]
fn interpolate_unknown_left_alone() {
    assert_eq!(interpolate("Hello {unknown}!", &HashMap::new()), "Hello {unknown}!");
}

#[test]
fn interpolate_nested_braces_not_matched() {
    // Only simple {name} is matched, not nested
    assert_eq!(interpolate("{{x}}", &vars(&[("x", "val")])), "{val}");
}

#[test]
fn shell_expansion_is_not_a_placeholder() {
    let v = vars(&[("HOME", "nope")]);
    assert_eq!(interpolate("cd ${HOME}/bin", &v), "cd ${HOME}/bin");
    assert!(unresolved_vars("cd ${HOME}/bin").is_empty());
}

#[test]
fn interpolate_env_var_with_default_uses_env() {
    std::env::set_var("OW_TEMPLATE_TEST_VAR", "from_env");
    assert_eq!(
        interpolate("${OW_TEMPLATE_TEST_VAR:-default}", &HashMap::new()),
        "from_env"
    );
    std::env::remove_var("OW_TEMPLATE_TEST_VAR");
}

#[test]
fn interpolate_env_var_with_default_uses_default() {
    std::env::remove_var("OW_TEMPLATE_UNSET_VAR");
    assert_eq!(
        interpolate("${OW_TEMPLATE_UNSET_VAR:-fallback}", &HashMap::new()),
        "fallback"
    );
}

#[test]
fn unresolved_vars_in_order_without_duplicates() {
    assert_eq!(
        unresolved_vars("run --token {tunnel_token} {model} {tunnel_token}"),
        vec!["tunnel_token".to_string(), "model".to_string()]
    );
    assert!(unresolved_vars("no placeholders").is_empty());
}
