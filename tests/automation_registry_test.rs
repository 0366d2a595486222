//! Registry lifecycle: create, list, delete, period changes, and the
//! scheduler registrations backing them.

mod test_doubles;

use std::sync::Arc;
use std::time::Duration;

use quote_bot::automation::{AutomationRegistry, DeliveryWorker, MessageJanitor, Period};
use quote_bot::core::ChatTransport;
use quote_bot::market::QuoteSource;
use quote_bot::sched::Scheduler;
use quote_bot::texts::LanguageStore;
use test_doubles::{JobKind, RecordingScheduler, RecordingTransport, StubQuoteSource};

struct Fixture {
    scheduler: Arc<RecordingScheduler>,
    registry: AutomationRegistry,
}

fn fixture() -> Fixture {
    let scheduler = Arc::new(RecordingScheduler::new());
    let transport: Arc<dyn ChatTransport> = Arc::new(RecordingTransport::new());
    let quotes: Arc<dyn QuoteSource> = Arc::new(StubQuoteSource::new());
    let languages = Arc::new(LanguageStore::new());
    let janitor = Arc::new(MessageJanitor::new(
        scheduler.clone() as Arc<dyn Scheduler>,
        Arc::clone(&transport),
    ));
    let worker = Arc::new(DeliveryWorker::new(quotes, transport, janitor, languages));
    let registry = AutomationRegistry::new(scheduler.clone() as Arc<dyn Scheduler>, worker);
    Fixture {
        scheduler,
        registry,
    }
}

#[test]
fn create_registers_repeating_job_at_period_interval() {
    let f = fixture();
    let id = f.registry.create(7, 7, "BTC", "bitcoin", Period::Hourly);

    assert_eq!(id, 1);
    let jobs = f.scheduler.registrations();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].1, JobKind::Repeating);
    assert_eq!(jobs[0].2, Duration::from_secs(3_600));

    let listed = f.registry.list(7);
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].symbol, "BTC");
    assert_eq!(listed[0].period, Period::Hourly);
}

#[test]
fn ids_are_per_user_and_never_reused() {
    let f = fixture();
    assert_eq!(f.registry.create(1, 1, "BTC", "bitcoin", Period::Daily), 1);
    assert_eq!(f.registry.create(1, 1, "ETH", "ethereum", Period::Daily), 2);
    assert_eq!(f.registry.create(2, 2, "BTC", "bitcoin", Period::Daily), 1);

    assert!(f.registry.delete(1, 2));
    assert_eq!(f.registry.create(1, 1, "TON", "toncoin", Period::Daily), 3);
}

#[test]
fn list_is_ascending_by_id_and_empty_for_unknown_user() {
    let f = fixture();
    f.registry.create(5, 5, "ETH", "ethereum", Period::Weekly);
    f.registry.create(5, 5, "BTC", "bitcoin", Period::Hourly);

    let ids: Vec<u32> = f.registry.list(5).iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert!(f.registry.list(99).is_empty());
}

#[test]
fn delete_cancels_the_job_and_is_idempotent() {
    let f = fixture();
    let id = f.registry.create(1, 1, "BTC", "bitcoin", Period::Hourly);
    assert_eq!(f.scheduler.active(), 1);

    assert!(f.registry.delete(1, id));
    assert_eq!(f.scheduler.active(), 0);
    assert!(f.registry.list(1).is_empty());

    assert!(!f.registry.delete(1, id));
    assert!(!f.registry.delete(1, 42));
}

#[test]
fn update_period_swaps_the_registration_and_preserves_identity() {
    let f = fixture();
    let id = f.registry.create(1, 10, "BTC", "bitcoin", Period::Hourly);
    let old_handle = f.registry.list(1)[0].handle;

    assert!(f.registry.update_period(1, id, Period::Daily));

    let listed = f.registry.list(1);
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, id);
    assert_eq!(listed[0].symbol, "BTC");
    assert_eq!(listed[0].slug, "bitcoin");
    assert_eq!(listed[0].chat_id, 10);
    assert_eq!(listed[0].period, Period::Daily);
    assert_ne!(listed[0].handle, old_handle);

    // Exactly one live registration, at the new interval.
    let jobs = f.scheduler.registrations();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].2, Duration::from_secs(86_400));

    assert!(!f.registry.update_period(1, 42, Period::Daily));
}

#[test]
fn full_lifecycle_ends_with_no_registrations() {
    let f = fixture();
    let id = f.registry.create(3, 3, "TON", "toncoin", Period::Hourly);
    assert!(f.registry.update_period(3, id, Period::Monthly));
    assert!(f.registry.delete(3, id));

    assert!(f.registry.list(3).is_empty());
    assert_eq!(f.scheduler.active(), 0);
}
