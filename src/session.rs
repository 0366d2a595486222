//! Per-user automation setup conversation state.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Where a user currently is in the automation setup flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupState {
    /// Setup started; waiting for a ticker symbol.
    AwaitingSymbol,
    /// Symbol resolved; waiting for a period selection from the inline menu.
    AwaitingPeriod { symbol: String, slug: String },
}

/// In-memory conversation state, one entry per user. A user not present in
/// the map is simply not in a setup flow.
#[derive(Default)]
pub struct SessionStore {
    states: Mutex<HashMap<i64, SetupState>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn states(&self) -> MutexGuard<'_, HashMap<i64, SetupState>> {
        self.states.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Starts (or restarts) the setup flow for a user.
    pub fn begin(&self, user_id: i64) {
        self.states().insert(user_id, SetupState::AwaitingSymbol);
    }

    pub fn is_awaiting_symbol(&self, user_id: i64) -> bool {
        matches!(
            self.states().get(&user_id),
            Some(SetupState::AwaitingSymbol)
        )
    }

    /// Advances the flow to the period-selection step.
    pub fn await_period(&self, user_id: i64, symbol: String, slug: String) {
        self.states()
            .insert(user_id, SetupState::AwaitingPeriod { symbol, slug });
    }

    /// Removes and returns the user's state; the flow ends here either way.
    pub fn take(&self, user_id: i64) -> Option<SetupState> {
        self.states().remove(&user_id)
    }

    pub fn clear(&self, user_id: i64) {
        self.states().remove(&user_id);
    }
}
