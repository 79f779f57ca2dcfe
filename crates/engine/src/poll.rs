// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded readiness polling

use ow_core::PollPolicy;
use rand::Rng;
use std::future::Future;
use std::time::Duration;

/// Call `check` until it returns true or `policy.max_attempts` calls are used
///
/// Sleeps `interval` plus up to `jitter` between calls, never after the last
/// one. Returns false on exhaustion; a zero attempt budget never calls `check`.
pub async fn poll_ready<F, Fut>(mut check: F, policy: &PollPolicy) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    for attempt in 1..=policy.max_attempts {
        if check().await {
            tracing::debug!(attempt, "ready");
            return true;
        }
        if attempt < policy.max_attempts {
            tokio::time::sleep(policy.interval + jitter(policy.jitter)).await;
        }
    }
    false
}

fn jitter(max: Duration) -> Duration {
    if max.is_zero() {
        return Duration::ZERO;
    }
    let max_ms = u64::try_from(max.as_millis()).unwrap_or(u64::MAX);
    Duration::from_millis(rand::thread_rng().gen_range(0..=max_ms))
}

#[cfg(test)]
#[path = "poll_tests.rs"]
mod tests;
