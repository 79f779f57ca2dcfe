// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The setup sequencer
//!
//! Runs phases in declared order. Adjacent parallel phases run together on
//! the worker pool and are joined before the next batch starts. A failed
//! critical phase stops the run; a failed optional phase does not.
//! Cancellation is honoured between batches only.

use crate::{plan_batches, PhaseExecutor, WorkerPool};
use ow_adapters::{CommandRunner, ProcessLauncher, ReadinessProbe};
use ow_core::{
    Clock, PhaseResult, PhaseSpec, PhaseStatus, ProgressSink, RunEvent, RunState, SetupOutcome,
};
use std::ops::Range;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

pub struct Sequencer<R, L, P, C> {
    executor: PhaseExecutor<R, L, P, C>,
    pool: WorkerPool,
}

impl<R, L, P, C> Sequencer<R, L, P, C>
where
    R: CommandRunner,
    L: ProcessLauncher,
    P: ReadinessProbe,
    C: Clock,
{
    pub fn new(executor: PhaseExecutor<R, L, P, C>) -> Self {
        Self {
            executor,
            pool: WorkerPool::default(),
        }
    }

    pub fn with_pool(mut self, pool: WorkerPool) -> Self {
        self.pool = pool;
        self
    }

    /// Run every phase and aggregate the outcome
    ///
    /// Never fails: phase failures, aborts and interruption are all
    /// described by the returned `SetupOutcome`.
    pub async fn run(
        &self,
        phases: &[PhaseSpec],
        progress: Arc<dyn ProgressSink>,
        cancel: CancellationToken,
    ) -> SetupOutcome {
        let clock = self.executor.clock();
        let started_at = clock.wall_now();
        let start = clock.now();

        let batches = plan_batches(phases);
        tracing::info!(
            phases = phases.len(),
            batches = batches.len(),
            workers = self.pool.size(),
            "starting setup"
        );

        let mut state = RunState::NotStarted;
        advance(&mut state, RunEvent::Start);
        let mut results: Vec<PhaseResult> = Vec::with_capacity(phases.len());
        let mut failed_phase = None;

        for batch in batches {
            if cancel.is_cancelled() {
                tracing::warn!(
                    next_phase = %phases[batch.start].name,
                    "interrupted, no further phases will start"
                );
                advance(
                    &mut state,
                    RunEvent::Cancelled {
                        next_index: batch.start,
                    },
                );
                break;
            }

            advance(&mut state, RunEvent::PhaseStarted { index: batch.start });
            let batch_results = self.run_batch(phases, batch.clone(), &progress).await;

            let fatal = batch_results.iter().position(PhaseResult::is_fatal);
            results.extend(batch_results);

            if let Some(offset) = fatal {
                let index = batch.start + offset;
                let name = phases[index].name.clone();
                tracing::error!(phase = %name, "critical phase failed, aborting setup");
                advance(
                    &mut state,
                    RunEvent::PhaseFailed {
                        index,
                        phase: name.clone(),
                    },
                );
                failed_phase = Some(name);
                break;
            }
        }

        if !state.is_terminal() {
            advance(&mut state, RunEvent::Finished);
        }

        for process in results.iter_mut().filter_map(|r| r.detached.as_mut()) {
            self.executor.refresh_status(process).await;
        }
        let detached = results.iter().filter_map(|r| r.detached.clone()).collect();
        let elapsed = clock.now().saturating_duration_since(start);
        tracing::info!(
            state = %state,
            elapsed_ms = elapsed.as_millis() as u64,
            "setup finished"
        );

        SetupOutcome {
            completed: state == RunState::Completed,
            state,
            failed_phase,
            phase_results: results,
            detached,
            started_at,
            elapsed,
        }
    }

    async fn run_batch(
        &self,
        phases: &[PhaseSpec],
        batch: Range<usize>,
        progress: &Arc<dyn ProgressSink>,
    ) -> Vec<PhaseResult> {
        if batch.len() == 1 {
            let phase = &phases[batch.start];
            return vec![self.executor.execute(phase, progress.as_ref()).await];
        }

        let members = &phases[batch];
        tracing::info!(
            phases = ?members.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
            "running batch in parallel"
        );

        let jobs: Vec<_> = members
            .iter()
            .map(|phase| {
                let executor = self.executor.clone();
                let phase = phase.clone();
                let progress = Arc::clone(progress);
                async move { executor.execute(&phase, progress.as_ref()).await }
            })
            .collect();

        self.pool
            .run_all(jobs)
            .await
            .into_iter()
            .zip(members)
            .map(|(result, phase)| result.unwrap_or_else(|lost| lost_result(phase, lost)))
            .collect()
    }
}

fn lost_result(phase: &PhaseSpec, lost: crate::WorkerLost) -> PhaseResult {
    PhaseResult {
        phase: phase.name.clone(),
        status: PhaseStatus::Failed,
        criticality: phase.criticality,
        commands: Vec::new(),
        attempts: 0,
        detached: None,
        ready: None,
        error: Some(lost.to_string()),
        duration: Default::default(),
    }
}

fn advance(state: &mut RunState, event: RunEvent) {
    match state.transition(event) {
        Ok(next) => *state = next,
        Err(e) => tracing::error!(error = %e, "unexpected run state transition"),
    }
}

#[cfg(test)]
#[path = "sequencer_tests.rs"]
mod tests;
