// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-friendly error display with context and suggestions.
//!
//! This module provides enhanced error types that include:
//! - What went wrong (message)
//! - Why it might have happened (context)
//! - How to fix it (suggestions)

use crate::config::{ConfigError, TOKEN_VAR};
use ow_runbook::{LoadError, ParseError};
use std::fmt;
use std::path::Path;

/// Error with context and recovery suggestions for user-friendly display.
#[derive(Debug)]
pub struct WizardError {
    /// What went wrong
    pub message: String,
    /// Why it might have happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
    /// Original error if any
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl WizardError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            source: None,
        }
    }

    /// Add context about why this error might have happened.
    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    /// Add a suggestion for how to fix this error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Set the source error that caused this error.
    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for WizardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for WizardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Common error builders for typical failure scenarios.
impl WizardError {
    /// The runbook needs a tunnel token and none was supplied.
    pub fn missing_token(phase: &str) -> Self {
        WizardError::new("No Cloudflare tunnel token configured")
            .with_context(format!("Phase '{}' starts the tunnel and needs a token", phase))
            .with_context("Tokens are never stored in the runbook or on the command line")
            .with_suggestion(format!("Export it first: export {}=<token>", TOKEN_VAR))
            .with_suggestion("Create a token in the Cloudflare Zero Trust dashboard under Tunnels")
    }

    /// A `{var}` in the runbook has no value.
    pub fn unresolved_variable(phase: &str, variable: &str) -> Self {
        if variable == "tunnel_token" {
            return Self::missing_token(phase);
        }
        WizardError::new(format!(
            "Phase '{}' uses undefined variable '{{{}}}'",
            phase, variable
        ))
        .with_suggestion(format!("Pass a value with: ow --var {}=<value>", variable))
        .with_suggestion("Or add a default under [vars] in the runbook")
    }

    /// The runbook could not be read or parsed.
    pub fn runbook_unreadable(path: Option<&Path>, err: ParseError) -> Self {
        let source = path.map_or_else(|| "built-in runbook".to_string(), describe_path);
        WizardError::new(format!("Could not read {}", source))
            .with_context(err.to_string())
            .with_suggestion("Check the file exists and is valid TOML")
            .with_suggestion("Preview what would run with: ow --dry-run")
            .with_source(err)
    }

    /// The runbook parsed but failed validation or interpolation.
    pub fn runbook_invalid(path: Option<&Path>, err: LoadError) -> Self {
        match err {
            LoadError::UnresolvedVariable { phase, variable } => {
                Self::unresolved_variable(&phase, &variable)
            }
            LoadError::Invalid(errors) => {
                let source = path.map_or_else(|| "built-in runbook".to_string(), describe_path);
                let mut wizard = WizardError::new(format!("Invalid runbook: {}", source));
                for problem in &errors.0 {
                    wizard = wizard.with_context(problem.to_string());
                }
                wizard
                    .with_suggestion("Each [[phase]] needs a unique name and exactly one of run or launch")
                    .with_source(errors)
            }
        }
    }

    /// An environment setting has an unusable value.
    pub fn bad_config(err: ConfigError) -> Self {
        let suggestion = match &err {
            ConfigError::InvalidNumber { .. } => "Unset the variable to use the default",
            ConfigError::InvalidModel { .. } => "Use a registry model name such as llama3.2:3b",
        };
        WizardError::new("Invalid configuration")
            .with_context(err.to_string())
            .with_suggestion(suggestion)
            .with_source(err)
    }
}

fn describe_path(path: &Path) -> String {
    path.display().to_string()
}
