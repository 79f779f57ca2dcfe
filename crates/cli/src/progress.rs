// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal progress on stderr

use ow_core::{ProgressSink, ProgressState};
use std::io::Write;

const BAR_WIDTH: usize = 20;

/// Prints one line per progress update
#[derive(Debug, Default)]
pub struct TerminalProgress;

impl TerminalProgress {
    pub fn new() -> Self {
        Self
    }
}

impl ProgressSink for TerminalProgress {
    fn update(&self, state: &ProgressState) {
        let mut stderr = std::io::stderr().lock();
        // Progress is best effort; a closed stderr must not stop the run
        let _ = writeln!(stderr, "{}", render(state));
    }
}

/// `[##########----------]  50% install-ollama: running`
pub fn render(state: &ProgressState) -> String {
    let percent = state.percent();
    let filled = usize::from(percent) * BAR_WIDTH / 100;
    format!(
        "[{}{}] {:>3}% {}: {}",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        percent,
        state.phase,
        state.status
    )
}
