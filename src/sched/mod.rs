//! Time-driven job facility: one-shot and fixed-interval callbacks.
//!
//! Jobs are opaque async closures; registrations are identified by
//! [`JobHandle`] tokens from an arena rather than live timer objects, so a
//! fake scheduler can log registrations and cancellations in tests.

pub mod tokio_scheduler;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;

pub use tokio_scheduler::TokioScheduler;

/// An async job body; invoked once per firing.
pub type TaskFn = Arc<dyn Fn() -> BoxFuture<'static, ()> + Send + Sync>;

/// Opaque token identifying one scheduled registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobHandle(pub u64);

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "job-{}", self.0)
    }
}

/// Scheduler capability consumed by the automation core. Registration is
/// synchronous; job bodies run on the scheduler's own tasks.
pub trait Scheduler: Send + Sync {
    /// Runs `task` once after `delay`.
    fn run_once(&self, delay: Duration, task: TaskFn) -> JobHandle;

    /// Runs `task` every `interval`, first firing one interval from now.
    /// Ticks of one registration never overlap.
    fn run_repeating(&self, interval: Duration, task: TaskFn) -> JobHandle;

    /// Cancels a registration. Returns whether it existed. A tick already in
    /// flight runs to completion; only future firings are suppressed.
    fn cancel(&self, handle: JobHandle) -> bool;
}
