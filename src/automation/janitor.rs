//! Time-delayed deletion of ephemeral messages.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::core::ChatTransport;
use crate::sched::{Scheduler, TaskFn};

/// Deletion delay for user command echoes and menu navigation prompts.
pub const COMMAND_DELETE_DELAY: Duration = Duration::from_secs(5);
/// Deletion delay for inline-menu results and confirmations.
pub const MENU_DELETE_DELAY: Duration = Duration::from_secs(5);
/// Deletion delay for manual (non-automation) quote replies.
pub const MANUAL_QUOTE_DELETE_DELAY: Duration = Duration::from_secs(60 * 60 * 24);

/// Schedules one-shot deletions of bot- or user-sent messages. Deletion is
/// best effort: a message already removed (by the user or by Telegram) is
/// logged and forgotten; there is no caller-visible failure mode.
pub struct MessageJanitor {
    scheduler: Arc<dyn Scheduler>,
    transport: Arc<dyn ChatTransport>,
}

impl MessageJanitor {
    pub fn new(scheduler: Arc<dyn Scheduler>, transport: Arc<dyn ChatTransport>) -> Self {
        Self {
            scheduler,
            transport,
        }
    }

    /// Registers a one-shot job deleting the message after `delay`.
    pub fn schedule_delete(&self, chat_id: i64, message_id: i32, delay: Duration) {
        let transport = Arc::clone(&self.transport);
        let task: TaskFn = Arc::new(move || {
            let transport = Arc::clone(&transport);
            Box::pin(async move {
                if let Err(e) = transport.delete_message(chat_id, message_id).await {
                    debug!(chat_id, message_id, error = %e, "Scheduled delete failed; message likely gone");
                }
            })
        });
        self.scheduler.run_once(delay, task);
    }
}
