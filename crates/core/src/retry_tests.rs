// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[test]
fn none_allows_a_single_attempt() {
    let policy = RetryPolicy::none();
    assert!(!policy.should_retry(1));
}

#[test]
fn with_retries_counts_extra_attempts() {
    let policy = RetryPolicy::with_retries(2);
    assert_eq!(policy.max_attempts, 3);
    assert!(policy.should_retry(1));
    assert!(policy.should_retry(2));
    assert!(!policy.should_retry(3));
}

#[parameterized(
    first = { 1, 1 },
    second = { 2, 2 },
    third = { 3, 4 },
    capped = { 6, 10 },
    huge_attempt = { 500, 10 },
)]
fn backoff_doubles_and_caps(attempt: u32, expected_secs: u64) {
    let policy = RetryPolicy::with_retries(10)
        .with_delays(Duration::from_secs(1), Duration::from_secs(10));
    assert_eq!(policy.delay_after(attempt), Duration::from_secs(expected_secs));
}

#[test]
fn max_delay_never_below_initial() {
    let policy = RetryPolicy::with_retries(1)
        .with_delays(Duration::from_secs(5), Duration::from_secs(1));
    assert_eq!(policy.max_delay, Duration::from_secs(5));
}

#[test]
fn poll_max_wait_includes_jitter() {
    let policy =
        PollPolicy::new(10, Duration::from_millis(100)).with_jitter(Duration::from_millis(50));
    assert_eq!(policy.max_wait(), Duration::from_millis(1500));
}

#[test]
fn default_poll_policy_matches_quick_health_check() {
    let policy = PollPolicy::default();
    assert_eq!(policy.max_attempts, 20);
    assert_eq!(policy.max_wait(), Duration::from_secs(10));
}
