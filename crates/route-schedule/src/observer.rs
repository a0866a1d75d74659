//! Quantum observer trait for progress reporting and diagnostics.

use std::time::Duration;

use route_core::JobId;

/// How a job left the queue.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum JobStatus {
    /// Resolved with a route.
    Found,
    /// Resolved with "no path".
    NoPath,
    /// Failed with a collaborator fault.
    Failed,
}

/// Summary of one scheduling quantum.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct QuantumReport {
    /// Step slices run (each up to `steps_per_slice` steps of the head job).
    pub slices: u32,
    /// Individual search steps taken.
    pub steps: u32,
    /// Jobs finalized during the quantum.
    pub finished: u32,
    /// Clock time between the quantum's first and last reading.
    pub elapsed: Duration,
    /// Jobs still queued afterwards.
    pub remaining: usize,
}

/// Callbacks invoked by [`Scheduler::run_quantum`][crate::Scheduler::run_quantum].
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — completion logger
///
/// ```rust,ignore
/// struct Finished(Vec<JobId>);
///
/// impl QuantumObserver for Finished {
///     fn on_job_finished(&mut self, job: JobId, _status: JobStatus) {
///         self.0.push(job);
///     }
/// }
/// ```
pub trait QuantumObserver {
    /// Called before the first slice, with the number of queued jobs.
    fn on_quantum_start(&mut self, _queued: usize) {}

    /// Called after a job's ticket was resolved and the job dequeued.
    fn on_job_finished(&mut self, _job: JobId, _status: JobStatus) {}

    /// Called once the budget is spent or the queue drained.
    fn on_quantum_end(&mut self, _report: &QuantumReport) {}
}

/// A [`QuantumObserver`] that does nothing.
pub struct NoopObserver;

impl QuantumObserver for NoopObserver {}
