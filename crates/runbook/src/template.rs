// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Template variable interpolation

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

// Regex pattern for {variable_name} - this is a constant valid pattern
// Allow expect here as the regex is compile-time verified to be valid
#[allow(clippy::expect_used)]
static VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{([a-zA-Z_][a-zA-Z0-9_]*)\}").expect("constant regex pattern is valid")
});

// Regex pattern for ${VAR:-default} environment variable expansion
#[allow(clippy::expect_used)]
static ENV_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{(\w+):-([^}]*)\}").expect("constant regex pattern is valid"));

/// Interpolate `{name}` placeholders with values from the vars map
///
/// Also expands `${VAR:-default}` patterns from environment variables.
/// Environment variables are expanded first, then template variables.
///
/// Unknown template variables are left as-is. Shell expansions such as
/// `${HOME}` are never treated as placeholders.
pub fn interpolate(template: &str, vars: &HashMap<String, String>) -> String {
    let expanded = ENV_PATTERN
        .replace_all(template, |caps: &regex::Captures| {
            let var_name = &caps[1];
            let default_value = &caps[2];
            std::env::var(var_name).unwrap_or_else(|_| default_value.to_string())
        })
        .to_string();

    let mut out = String::with_capacity(expanded.len());
    let mut last = 0;
    for caps in placeholders(&expanded) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if let Some(value) = vars.get(name.as_str()) {
            out.push_str(&expanded[last..whole.start()]);
            out.push_str(value);
            last = whole.end();
        }
    }
    out.push_str(&expanded[last..]);
    out
}

/// Names of `{name}` placeholders still present in `text`, in order of first use
pub fn unresolved_vars(text: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in placeholders(text) {
        if let Some(name) = caps.get(1) {
            if !names.iter().any(|n| n == name.as_str()) {
                names.push(name.as_str().to_string());
            }
        }
    }
    names
}

fn placeholders(text: &str) -> impl Iterator<Item = regex::Captures<'_>> {
    VAR_PATTERN.captures_iter(text).filter(move |caps| {
        caps.get(0)
            .is_some_and(|m| !text[..m.start()].ends_with('$'))
    })
}

#[cfg(test)]
#[path = "template_tests.rs"]
mod tests;
