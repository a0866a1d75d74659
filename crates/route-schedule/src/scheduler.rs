//! First-come-first-served cooperative job scheduler.
//!
//! # One quantum
//!
//! ```text
//! end = now + budget
//! while now < end and queue not empty:
//!     step head job up to steps_per_slice times (stop early on a result)
//!     Found(route) → resolve Ok(Some(route)), dequeue
//!     Exhausted    → resolve Ok(None),        dequeue
//!     Fault(e)     → resolve Err(e),          dequeue
//!     Pending      → head stays at the front
//!     now = clock.now()
//! ```
//!
//! The head job keeps the whole quantum (and the next ones) until it
//! finishes, so a long search delays every job behind it.  The clock is only
//! read between slices; a slice always runs to completion.

use std::collections::VecDeque;
use std::time::Duration;

use route_core::{EngineConfig, JobId};
use route_search::{AnySearch, PathSearch, SearchContext, StepOutcome};

use crate::{Clock, Completer, JobStatus, QuantumObserver, QuantumReport, SearchOutcome};

// ── Job ───────────────────────────────────────────────────────────────────────

/// A queued search and the completer for its ticket.
pub struct Job {
    pub id: JobId,
    pub search: AnySearch,
    pub completer: Completer,
}

impl Job {
    pub fn new(search: AnySearch, completer: Completer) -> Self {
        Self { id: completer.id(), search, completer }
    }
}

// ── Scheduler ─────────────────────────────────────────────────────────────────

pub struct Scheduler {
    queue: VecDeque<Job>,
    steps_per_slice: u32,
    budget: Duration,
    quanta: u64,
}

impl Scheduler {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            queue: VecDeque::new(),
            steps_per_slice: config.steps_per_slice.max(1),
            budget: config.quantum_budget(),
            quanta: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Quanta run so far.
    pub fn quanta(&self) -> u64 {
        self.quanta
    }

    pub fn contains(&self, id: JobId) -> bool {
        self.queue.iter().any(|j| j.id == id)
    }

    /// Queued job ids, head first.
    pub fn job_ids(&self) -> impl Iterator<Item = JobId> + '_ {
        self.queue.iter().map(|j| j.id)
    }

    /// Append `job` to the back of the queue.
    pub fn submit(&mut self, job: Job) {
        tracing::trace!(job = %job.id, queued = self.queue.len() + 1, "job submitted");
        self.queue.push_back(job);
    }

    /// Remove job `id`, release its search and cancel its ticket.
    ///
    /// Returns `false` if no such job is queued (already finished or never
    /// submitted).
    pub fn cancel(&mut self, id: JobId, ctx: &mut SearchContext<'_>) -> bool {
        let Some(pos) = self.queue.iter().position(|j| j.id == id) else {
            return false;
        };
        if let Some(mut job) = self.queue.remove(pos) {
            job.search.free(ctx);
            job.completer.cancel();
            tracing::debug!(job = %id, "job cancelled");
        }
        true
    }

    /// Cancel every queued job.  Returns how many were removed.
    pub fn cancel_all(&mut self, ctx: &mut SearchContext<'_>) -> usize {
        let n = self.queue.len();
        for mut job in self.queue.drain(..) {
            job.search.free(ctx);
            job.completer.cancel();
        }
        if n > 0 {
            tracing::debug!(jobs = n, "all jobs cancelled");
        }
        n
    }

    /// Restart every queued search, e.g. after the graph cache was rebuilt.
    ///
    /// A job whose search cannot be reset is failed with that error.
    pub fn reset_all(&mut self, ctx: &mut SearchContext<'_>) {
        let mut failed = Vec::new();
        for (i, job) in self.queue.iter_mut().enumerate() {
            if let Err(e) = job.search.reset(ctx) {
                failed.push((i, e));
            }
        }
        for (i, e) in failed.into_iter().rev() {
            if let Some(mut job) = self.queue.remove(i) {
                tracing::warn!(job = %job.id, error = %e, "job failed during reset");
                job.search.free(ctx);
                job.completer.resolve(Err(e));
            }
        }
    }

    /// Run one quantum.  See the module docs for the exact policy.
    pub fn run_quantum(
        &mut self,
        ctx: &mut SearchContext<'_>,
        clock: &dyn Clock,
        observer: &mut dyn QuantumObserver,
    ) -> QuantumReport {
        self.quanta += 1;
        let start = clock.now();
        let end = start + self.budget;
        let mut report = QuantumReport::default();
        observer.on_quantum_start(self.queue.len());

        let mut now = start;
        while now < end {
            let Some(job) = self.queue.front_mut() else {
                break;
            };
            let mut outcome = StepOutcome::Pending;
            for _ in 0..self.steps_per_slice {
                outcome = job.search.step(ctx);
                report.steps += 1;
                if !outcome.is_pending() {
                    break;
                }
            }
            report.slices += 1;

            let finished = match outcome {
                StepOutcome::Pending => None,
                StepOutcome::Found(route) => Some((Ok(Some(route)), JobStatus::Found)),
                StepOutcome::Exhausted => Some((Ok(None), JobStatus::NoPath)),
                StepOutcome::Fault(e) => Some((Err(e), JobStatus::Failed)),
            };
            if let Some((result, status)) = finished {
                self.finish_head(ctx, result, status, observer);
                report.finished += 1;
            }
            now = clock.now();
        }

        report.elapsed = now.saturating_sub(start);
        report.remaining = self.queue.len();
        tracing::debug!(
            quantum = self.quanta,
            slices = report.slices,
            steps = report.steps,
            finished = report.finished,
            remaining = report.remaining,
            "quantum done"
        );
        observer.on_quantum_end(&report);
        report
    }

    fn finish_head(
        &mut self,
        ctx: &mut SearchContext<'_>,
        result: SearchOutcome,
        status: JobStatus,
        observer: &mut dyn QuantumObserver,
    ) {
        let Some(mut job) = self.queue.pop_front() else {
            return;
        };
        if let Err(e) = &result {
            tracing::warn!(job = %job.id, error = %e, "search failed");
        }
        job.search.free(ctx);
        job.completer.resolve(result);
        observer.on_job_finished(job.id, status);
    }
}
