//! Handler chain result type.

/// Handler result for the chain. `Reply(text)` stops the chain and carries a
/// plain-text response body; handlers that need keyboards or cleanup send
/// their own messages and return `Stop`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; no response body.
    Stop,
    /// Stop the chain and attach reply text.
    Reply(String),
}
