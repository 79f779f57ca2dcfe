// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded worker pool for parallel batches

use crate::WorkerLost;
use std::future::Future;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Upper bound on the default pool size
const MAX_DEFAULT_WORKERS: usize = 32;

/// `min(32, cpus * 4)`, never less than one
pub fn default_workers() -> usize {
    let cpus = std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1);
    cpus.saturating_mul(4).clamp(1, MAX_DEFAULT_WORKERS)
}

/// Runs jobs concurrently with at most `size` in flight
#[derive(Clone, Debug)]
pub struct WorkerPool {
    permits: Arc<Semaphore>,
    size: usize,
}

impl WorkerPool {
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        Self {
            permits: Arc::new(Semaphore::new(size)),
            size,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Run every job and wait for all of them
    ///
    /// Results come back in the order the jobs were given, regardless of
    /// completion order. A job whose task panics yields `WorkerLost`.
    pub async fn run_all<F, T>(&self, jobs: Vec<F>) -> Vec<Result<T, WorkerLost>>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let count = jobs.len();
        let mut set = JoinSet::new();
        for (index, job) in jobs.into_iter().enumerate() {
            let permits = Arc::clone(&self.permits);
            set.spawn(async move {
                // The semaphore is never closed
                let _permit = permits.acquire_owned().await.ok();
                (index, job.await)
            });
        }

        let mut slots: Vec<Option<T>> = (0..count).map(|_| None).collect();
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((index, value)) => slots[index] = Some(value),
                Err(e) => tracing::error!(error = %e, "worker task failed"),
            }
        }

        slots
            .into_iter()
            .map(|slot| slot.ok_or(WorkerLost))
            .collect()
    }
}

impl Default for WorkerPool {
    fn default() -> Self {
        Self::new(default_workers())
    }
}

#[cfg(test)]
#[path = "pool_tests.rs"]
mod tests;
