// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tracing support for phases

use crate::phase::{PhaseAction, PhaseSpec};

/// Consistent naming and structured fields for logging
pub trait TracedPhase {
    /// Kind of work, for log spans (e.g., "commands", "launch")
    fn kind(&self) -> &'static str;

    /// Key-value pairs for structured logging
    ///
    /// Command strings are not included since they may carry secrets.
    fn fields(&self) -> Vec<(&'static str, String)>;
}

impl TracedPhase for PhaseSpec {
    fn kind(&self) -> &'static str {
        match self.action {
            PhaseAction::Commands(_) => "commands",
            PhaseAction::Launch { .. } => "launch",
        }
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("phase", self.name.clone()),
            ("criticality", format!("{:?}", self.criticality).to_lowercase()),
            ("timeout_ms", self.timeout.as_millis().to_string()),
        ];
        match &self.action {
            PhaseAction::Commands(cmds) => {
                fields.push(("commands", cmds.len().to_string()));
                fields.push(("max_attempts", self.retry.max_attempts.to_string()));
            }
            PhaseAction::Launch {
                log_path,
                readiness,
                ..
            } => {
                fields.push(("log_path", log_path.display().to_string()));
                if let Some(ready) = readiness {
                    fields.push(("ready_check", ready.check.kind().to_string()));
                }
            }
        }
        fields
    }
}
