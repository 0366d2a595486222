//! Shared fakes for integration tests: a scheduler that records registrations
//! instead of spawning timers, a transport that captures outbound traffic, and
//! a canned quote source.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use quote_bot::core::{BotError, ChatTransport, Result};
use quote_bot::market::{Quote, QuoteSource, QuoteStats};
use quote_bot::sched::{JobHandle, Scheduler, TaskFn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JobKind {
    Once,
    Repeating,
}

struct RecordedJob {
    handle: JobHandle,
    kind: JobKind,
    delay: Duration,
    task: TaskFn,
}

/// Records registrations and cancellations; jobs only run when a test calls
/// [`RecordingScheduler::fire`].
#[derive(Default)]
pub struct RecordingScheduler {
    next: AtomicU64,
    jobs: Mutex<Vec<RecordedJob>>,
}

impl RecordingScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, kind: JobKind, delay: Duration, task: TaskFn) -> JobHandle {
        let handle = JobHandle(self.next.fetch_add(1, Ordering::Relaxed) + 1);
        self.jobs.lock().unwrap().push(RecordedJob {
            handle,
            kind,
            delay,
            task,
        });
        handle
    }

    /// Live registrations as (handle, kind, delay).
    pub fn registrations(&self) -> Vec<(JobHandle, JobKind, Duration)> {
        self.jobs
            .lock()
            .unwrap()
            .iter()
            .map(|j| (j.handle, j.kind, j.delay))
            .collect()
    }

    pub fn active(&self) -> usize {
        self.jobs.lock().unwrap().len()
    }

    /// Runs one registered job body, as the timer would.
    pub async fn fire(&self, handle: JobHandle) {
        let task = self
            .jobs
            .lock()
            .unwrap()
            .iter()
            .find(|j| j.handle == handle)
            .map(|j| Arc::clone(&j.task));
        if let Some(task) = task {
            task().await;
        }
    }
}

impl Scheduler for RecordingScheduler {
    fn run_once(&self, delay: Duration, task: TaskFn) -> JobHandle {
        self.push(JobKind::Once, delay, task)
    }

    fn run_repeating(&self, interval: Duration, task: TaskFn) -> JobHandle {
        self.push(JobKind::Repeating, interval, task)
    }

    fn cancel(&self, handle: JobHandle) -> bool {
        let mut jobs = self.jobs.lock().unwrap();
        let before = jobs.len();
        jobs.retain(|j| j.handle != handle);
        jobs.len() != before
    }
}

/// Captures sends and deletes; failure flags make every call error.
pub struct RecordingTransport {
    next_message_id: AtomicI32,
    pub fail_sends: AtomicBool,
    pub fail_deletes: AtomicBool,
    sent: Mutex<Vec<(i64, String, i32)>>,
    deleted: Mutex<Vec<(i64, i32)>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self {
            next_message_id: AtomicI32::new(100),
            fail_sends: AtomicBool::new(false),
            fail_deletes: AtomicBool::new(false),
            sent: Mutex::new(Vec::new()),
            deleted: Mutex::new(Vec::new()),
        }
    }

    /// Outbound messages as (chat_id, text, assigned message id).
    pub fn sent(&self) -> Vec<(i64, String, i32)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn deleted(&self) -> Vec<(i64, i32)> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<i32> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(BotError::Transport("send refused".to_string()));
        }
        let id = self.next_message_id.fetch_add(1, Ordering::SeqCst);
        self.sent.lock().unwrap().push((chat_id, text.to_string(), id));
        Ok(id)
    }

    async fn delete_message(&self, chat_id: i64, message_id: i32) -> Result<()> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(BotError::Transport("message is gone".to_string()));
        }
        self.deleted.lock().unwrap().push((chat_id, message_id));
        Ok(())
    }
}

/// Canned symbol resolutions and quotes.
#[derive(Default)]
pub struct StubQuoteSource {
    slugs: Mutex<HashMap<String, String>>,
    quotes: Mutex<HashMap<String, Quote>>,
}

impl StubQuoteSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_symbol(&self, symbol: &str, slug: &str) {
        self.slugs
            .lock()
            .unwrap()
            .insert(symbol.to_string(), slug.to_string());
    }

    pub fn add_quote(&self, slug: &str, quote: Quote) {
        self.quotes.lock().unwrap().insert(slug.to_string(), quote);
    }

    pub fn remove_quote(&self, slug: &str) {
        self.quotes.lock().unwrap().remove(slug);
    }
}

#[async_trait]
impl QuoteSource for StubQuoteSource {
    async fn resolve_symbol(&self, symbol: &str) -> Option<String> {
        self.slugs.lock().unwrap().get(&symbol.to_uppercase()).cloned()
    }

    async fn fetch_quote(&self, slug: &str) -> Option<Quote> {
        self.quotes.lock().unwrap().get(slug).cloned()
    }
}

/// A healthy bitcoin quote.
pub fn btc_quote() -> Quote {
    Quote {
        name: Some("Bitcoin".to_string()),
        symbol: Some("BTC".to_string()),
        slug: "bitcoin".to_string(),
        stats: QuoteStats {
            price: Some(50_000.0),
            price_change_percentage_24h: Some(2.5),
            market_cap: Some(1_000_000_000_000.0),
            volume_24h: Some(30_000_000_000.0),
            rank: Some(1),
        },
    }
}
