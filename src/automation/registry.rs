//! Per-user automation tables and their scheduled-job lifecycle.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::info;

use super::{Automation, DeliveryWorker, Period, TickPayload};
use crate::sched::{JobHandle, Scheduler, TaskFn};

/// One user's table: monotonically increasing id counter plus live items.
/// Ids are never reused within a process lifetime, even after deletions.
struct AutomationTable {
    next_id: u32,
    items: BTreeMap<u32, Automation>,
}

impl Default for AutomationTable {
    fn default() -> Self {
        Self {
            next_id: 1,
            items: BTreeMap::new(),
        }
    }
}

/// Registry of all automations, one table per user, owning the scheduler
/// registrations for every live automation.
///
/// The teloxide dispatcher handles updates on parallel tasks, so every
/// cancel-old / register-new / replace-entry triplet runs under the table
/// lock. Scheduler registration is synchronous (a spawn), so the lock is
/// never held across an await.
pub struct AutomationRegistry {
    scheduler: Arc<dyn Scheduler>,
    worker: Arc<DeliveryWorker>,
    tables: Mutex<HashMap<i64, AutomationTable>>,
}

impl AutomationRegistry {
    pub fn new(scheduler: Arc<dyn Scheduler>, worker: Arc<DeliveryWorker>) -> Self {
        Self {
            scheduler,
            worker,
            tables: Mutex::new(HashMap::new()),
        }
    }

    fn tables(&self) -> MutexGuard<'_, HashMap<i64, AutomationTable>> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers the repeating delivery job for one automation.
    fn register_job(
        &self,
        user_id: i64,
        chat_id: i64,
        symbol: &str,
        slug: &str,
        period: Period,
    ) -> JobHandle {
        let worker = Arc::clone(&self.worker);
        let payload = TickPayload {
            user_id,
            chat_id,
            symbol: symbol.to_string(),
            slug: slug.to_string(),
            period,
        };
        let task: TaskFn = Arc::new(move || {
            let worker = Arc::clone(&worker);
            let payload = payload.clone();
            Box::pin(async move {
                worker.tick(&payload).await;
            })
        });
        self.scheduler.run_repeating(period.interval(), task)
    }

    /// Creates an automation: allocates the user's next id, registers the
    /// repeating job, stores the entry. Infallible for valid inputs; period
    /// validity is enforced upstream by the `Period` type itself.
    pub fn create(
        &self,
        user_id: i64,
        chat_id: i64,
        symbol: &str,
        slug: &str,
        period: Period,
    ) -> u32 {
        let mut tables = self.tables();
        let table = tables.entry(user_id).or_default();
        let id = table.next_id;
        table.next_id += 1;

        let handle = self.register_job(user_id, chat_id, symbol, slug, period);
        table.items.insert(
            id,
            Automation {
                id,
                user_id,
                chat_id,
                symbol: symbol.to_string(),
                slug: slug.to_string(),
                period,
                handle,
            },
        );
        info!(user_id, automation_id = id, symbol, period = period.as_str(), "Automation created");
        id
    }

    /// Lists a user's automations in ascending-id (insertion) order. An
    /// unknown user reads as an empty table, not an error.
    pub fn list(&self, user_id: i64) -> Vec<Automation> {
        let mut tables = self.tables();
        let table = tables.entry(user_id).or_default();
        table.items.values().cloned().collect()
    }

    /// Whether the user has an automation with this id.
    pub fn contains(&self, user_id: i64, id: u32) -> bool {
        self.tables()
            .get(&user_id)
            .map(|t| t.items.contains_key(&id))
            .unwrap_or(false)
    }

    /// Deletes an automation, cancelling its job first. Idempotent: returns
    /// false when the id does not exist, leaving the table unchanged.
    pub fn delete(&self, user_id: i64, id: u32) -> bool {
        let mut tables = self.tables();
        let table = tables.entry(user_id).or_default();
        let Some(handle) = table.items.get(&id).map(|a| a.handle) else {
            return false;
        };
        self.scheduler.cancel(handle);
        table.items.remove(&id);
        info!(user_id, automation_id = id, "Automation deleted");
        true
    }

    /// Changes an automation's period: cancels the old job, registers one at
    /// the new interval, and replaces period and handle in place. Everything
    /// else (id, symbol, slug, owner) is preserved.
    pub fn update_period(&self, user_id: i64, id: u32, period: Period) -> bool {
        let mut tables = self.tables();
        let table = tables.entry(user_id).or_default();
        let Some(existing) = table.items.get(&id) else {
            return false;
        };
        let (chat_id, symbol, slug, old_handle) = (
            existing.chat_id,
            existing.symbol.clone(),
            existing.slug.clone(),
            existing.handle,
        );

        self.scheduler.cancel(old_handle);
        let handle = self.register_job(user_id, chat_id, &symbol, &slug, period);
        if let Some(entry) = table.items.get_mut(&id) {
            entry.period = period;
            entry.handle = handle;
        }
        info!(user_id, automation_id = id, period = period.as_str(), "Automation period updated");
        true
    }
}
