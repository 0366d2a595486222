//! Recurring quote subscriptions: per-user registry, interval delivery, and
//! ephemeral-message cleanup.

pub mod delivery;
pub mod janitor;
pub mod registry;

use std::str::FromStr;
use std::time::Duration;

use crate::core::HandlerError;
use crate::sched::JobHandle;

pub use delivery::{DeliveryWorker, TickPayload};
pub use janitor::{
    MessageJanitor, COMMAND_DELETE_DELAY, MANUAL_QUOTE_DELETE_DELAY, MENU_DELETE_DELAY,
};
pub use registry::AutomationRegistry;

/// Delivery period of an automation. The interval table is a closed
/// enumeration; "monthly" is a fixed 30-day approximation, not calendar-aware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    Hourly,
    Daily,
    Weekly,
    Monthly,
}

impl Period {
    pub const ALL: [Period; 4] = [
        Period::Hourly,
        Period::Daily,
        Period::Weekly,
        Period::Monthly,
    ];

    /// Fixed delivery interval.
    pub fn interval(self) -> Duration {
        match self {
            Period::Hourly => Duration::from_secs(60 * 60),
            Period::Daily => Duration::from_secs(60 * 60 * 24),
            Period::Weekly => Duration::from_secs(60 * 60 * 24 * 7),
            Period::Monthly => Duration::from_secs(60 * 60 * 24 * 30),
        }
    }

    /// Interval expressed in whole hours, for the automation list line.
    pub fn every_hours(self) -> u64 {
        self.interval().as_secs() / 3600
    }

    /// Token used in callback data.
    pub fn as_str(self) -> &'static str {
        match self {
            Period::Hourly => "hourly",
            Period::Daily => "daily",
            Period::Weekly => "weekly",
            Period::Monthly => "monthly",
        }
    }
}

impl FromStr for Period {
    type Err = HandlerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hourly" => Ok(Period::Hourly),
            "daily" => Ok(Period::Daily),
            "weekly" => Ok(Period::Weekly),
            "monthly" => Ok(Period::Monthly),
            other => Err(HandlerError::InvalidPeriod(other.to_string())),
        }
    }
}

/// One recurring subscription. `handle` always points at the currently active
/// repeating registration; it is swapped atomically on period changes.
#[derive(Debug, Clone)]
pub struct Automation {
    pub id: u32,
    pub user_id: i64,
    pub chat_id: i64,
    pub symbol: String,
    pub slug: String,
    pub period: Period,
    pub handle: JobHandle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_intervals_match_fixed_table() {
        assert_eq!(Period::Hourly.interval().as_secs(), 3_600);
        assert_eq!(Period::Daily.interval().as_secs(), 86_400);
        assert_eq!(Period::Weekly.interval().as_secs(), 604_800);
        assert_eq!(Period::Monthly.interval().as_secs(), 2_592_000);
    }

    #[test]
    fn period_tokens_round_trip_and_invalid_is_rejected() {
        for period in Period::ALL {
            assert_eq!(period.as_str().parse::<Period>().unwrap(), period);
        }
        let err = "yearly".parse::<Period>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid period token: yearly");
        assert!("Hourly".parse::<Period>().is_err());
    }
}
