// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runbook TOML parsing

use crate::RawRunbook;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during runbook parsing
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Parse a runbook from TOML content
pub fn parse_runbook(content: &str) -> Result<RawRunbook, ParseError> {
    Ok(toml::from_str(content)?)
}

/// Read and parse a runbook file
pub fn parse_runbook_file(path: &Path) -> Result<RawRunbook, ParseError> {
    let content = std::fs::read_to_string(path).map_err(|source| ParseError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_runbook(&content)
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
