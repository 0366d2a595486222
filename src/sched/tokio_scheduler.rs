//! Tokio-backed [`Scheduler`]: each registration is a spawned task driven by
//! the runtime's timer, cancelled cooperatively between firings.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};
use std::time::Duration;

use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::{JobHandle, Scheduler, TaskFn};

/// Scheduler running jobs on the ambient tokio runtime.
#[derive(Clone, Default)]
pub struct TokioScheduler {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    next_token: AtomicU64,
    jobs: Mutex<HashMap<u64, CancellationToken>>,
}

impl Inner {
    fn jobs(&self) -> std::sync::MutexGuard<'_, HashMap<u64, CancellationToken>> {
        self.jobs.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TokioScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live registrations.
    pub fn active(&self) -> usize {
        self.inner.jobs().len()
    }

    fn register(&self) -> (u64, CancellationToken) {
        let id = self.inner.next_token.fetch_add(1, Ordering::Relaxed) + 1;
        let token = CancellationToken::new();
        self.inner.jobs().insert(id, token.clone());
        (id, token)
    }
}

impl Scheduler for TokioScheduler {
    fn run_once(&self, delay: Duration, task: TaskFn) -> JobHandle {
        let (id, token) = self.register();
        let inner = Arc::downgrade(&self.inner);
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = time::sleep(delay) => {
                    task().await;
                }
            }
            remove_entry(&inner, id);
        });
        debug!(handle = id, delay_secs = delay.as_secs(), "Registered one-shot job");
        JobHandle(id)
    }

    fn run_repeating(&self, interval: Duration, task: TaskFn) -> JobHandle {
        let (id, token) = self.register();
        let inner = Arc::downgrade(&self.inner);
        tokio::spawn(async move {
            let mut ticker = time::interval_at(time::Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                // Cancellation is only observed between ticks: a tick whose
                // outbound work is in flight always runs to completion.
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        task().await;
                    }
                }
            }
            remove_entry(&inner, id);
        });
        debug!(handle = id, interval_secs = interval.as_secs(), "Registered repeating job");
        JobHandle(id)
    }

    fn cancel(&self, handle: JobHandle) -> bool {
        match self.inner.jobs().remove(&handle.0) {
            Some(token) => {
                token.cancel();
                debug!(handle = handle.0, "Cancelled job");
                true
            }
            None => false,
        }
    }
}

fn remove_entry(inner: &Weak<Inner>, id: u64) {
    if let Some(inner) = inner.upgrade() {
        inner.jobs().remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;

    fn counting_task(counter: &Arc<AtomicU32>) -> TaskFn {
        let counter = Arc::clone(counter);
        Arc::new(move || {
            let counter = Arc::clone(&counter);
            Box::pin(async move {
                counter.fetch_add(1, Ordering::SeqCst);
            })
        })
    }

    #[tokio::test(start_paused = true)]
    async fn one_shot_fires_after_delay_then_unregisters() {
        let sched = TokioScheduler::new();
        let counter = Arc::new(AtomicU32::new(0));
        sched.run_once(Duration::from_secs(5), counting_task(&counter));

        time::sleep(Duration::from_secs(4)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        time::sleep(Duration::from_secs(2)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(sched.active(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_one_shot_never_fires() {
        let sched = TokioScheduler::new();
        let counter = Arc::new(AtomicU32::new(0));
        let handle = sched.run_once(Duration::from_secs(5), counting_task(&counter));

        assert!(sched.cancel(handle));
        assert!(!sched.cancel(handle));

        time::sleep(Duration::from_secs(10)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn repeating_job_ticks_at_interval_until_cancelled() {
        let sched = TokioScheduler::new();
        let counter = Arc::new(AtomicU32::new(0));
        let handle = sched.run_repeating(Duration::from_secs(10), counting_task(&counter));

        time::sleep(Duration::from_secs(35)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 3);

        assert!(sched.cancel(handle));
        time::sleep(Duration::from_secs(30)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 3);
        assert_eq!(sched.active(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_does_not_interrupt_tick_in_flight() {
        let sched = TokioScheduler::new();
        let counter = Arc::new(AtomicU32::new(0));
        let slow_task: TaskFn = {
            let counter = Arc::clone(&counter);
            Arc::new(move || {
                let counter = Arc::clone(&counter);
                Box::pin(async move {
                    time::sleep(Duration::from_secs(3)).await;
                    counter.fetch_add(1, Ordering::SeqCst);
                })
            })
        };
        let handle = sched.run_repeating(Duration::from_secs(10), slow_task);

        // First tick starts at t=10 and completes at t=13; cancel at t=11.
        time::sleep(Duration::from_secs(11)).await;
        assert!(sched.cancel(handle));

        time::sleep(Duration::from_secs(5)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        time::sleep(Duration::from_secs(30)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
