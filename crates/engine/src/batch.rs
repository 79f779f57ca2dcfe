// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Grouping phases into execution batches

use ow_core::PhaseSpec;
use std::ops::Range;

/// Split phases into consecutive batches
///
/// A maximal run of adjacent `parallel` phases forms one batch; every other
/// phase is a batch of one. The ranges cover `0..phases.len()` in order.
pub fn plan_batches(phases: &[PhaseSpec]) -> Vec<Range<usize>> {
    let mut batches = Vec::new();
    let mut start = 0;
    while start < phases.len() {
        let mut end = start + 1;
        if phases[start].parallel {
            while end < phases.len() && phases[end].parallel {
                end += 1;
            }
        }
        batches.push(start..end);
        start = end;
    }
    batches
}

#[cfg(test)]
#[path = "batch_tests.rs"]
mod tests;
