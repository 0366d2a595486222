//! User identity for core messages.

use serde::{Deserialize, Serialize};

/// The person behind a message, reduced to what the bot keys on: the stable
/// id (language choice, setup sessions, and automation tables are all
/// per-user) plus optional display fields. Channel posts carry no sender and
/// map to id 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}
