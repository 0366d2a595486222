//! # Handler chain
//!
//! Runs a sequence of handlers. Each handler has optional before/handle/after: all before run in
//! order (any false stops the chain); then handle runs until Stop or Reply; then all after run in reverse.

use crate::core::{Handler, HandlerResponse, Message, Result};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Chain of handlers: before (all) → handle (until Stop/Reply) → after (reverse).
#[derive(Clone)]
pub struct HandlerChain {
    handlers: Vec<Arc<dyn Handler>>,
}

impl HandlerChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Appends a handler.
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Runs all before → handle until Stop/Reply → all after in reverse.
    #[instrument(skip(self, message))]
    pub async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let mut final_response = HandlerResponse::Continue;

        debug!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            message_id = %message.id,
            "handler chain started"
        );

        for h in &self.handlers {
            let name = std::any::type_name_of_val(h.as_ref());
            let should_continue = h.before(message).await?;
            if !should_continue {
                info!(user_id = message.user.id, handler = %name, "before returned false, chain stopped");
                return Ok(HandlerResponse::Stop);
            }
        }

        for h in &self.handlers {
            let name = std::any::type_name_of_val(h.as_ref());
            let response = h.handle(message).await?;
            debug!(handler = %name, response = ?response, "handler processed");

            match response {
                HandlerResponse::Stop | HandlerResponse::Reply(_) => {
                    info!(user_id = message.user.id, handler = %name, "chain stopped by handler");
                    final_response = response;
                    break;
                }
                HandlerResponse::Continue => {}
            }
        }

        for h in self.handlers.iter().rev() {
            h.after(message, &final_response).await?;
        }

        debug!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            message_id = %message.id,
            "handler chain finished"
        );

        Ok(final_response)
    }
}

impl Default for HandlerChain {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Chat, MessageDirection, User};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn message(text: &str) -> Message {
        Message {
            id: "1".to_string(),
            user: User {
                id: 7,
                username: None,
                first_name: None,
                last_name: None,
            },
            chat: Chat {
                id: 70,
                chat_type: "private".to_string(),
            },
            content: text.to_string(),
            direction: MessageDirection::Incoming,
            created_at: chrono::Utc::now(),
        }
    }

    struct Counting(Arc<AtomicUsize>);

    #[async_trait]
    impl Handler for Counting {
        async fn handle(&self, _message: &Message) -> Result<HandlerResponse> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(HandlerResponse::Continue)
        }
    }

    struct Replying(&'static str);

    #[async_trait]
    impl Handler for Replying {
        async fn handle(&self, _message: &Message) -> Result<HandlerResponse> {
            Ok(HandlerResponse::Reply(self.0.to_string()))
        }
    }

    struct Gate(bool);

    #[async_trait]
    impl Handler for Gate {
        async fn before(&self, _message: &Message) -> Result<bool> {
            Ok(self.0)
        }
    }

    #[tokio::test]
    async fn reply_stops_the_chain_and_carries_the_body() {
        let seen = Arc::new(AtomicUsize::new(0));
        let skipped = Arc::new(AtomicUsize::new(0));
        let chain = HandlerChain::new()
            .add_handler(Arc::new(Counting(Arc::clone(&seen))))
            .add_handler(Arc::new(Replying("pong")))
            .add_handler(Arc::new(Counting(Arc::clone(&skipped))));

        let response = chain.handle(&message("ping")).await.unwrap();

        assert_eq!(response, HandlerResponse::Reply("pong".to_string()));
        assert_eq!(seen.load(Ordering::SeqCst), 1);
        assert_eq!(skipped.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failing_before_hook_stops_everything() {
        let counter = Arc::new(AtomicUsize::new(0));
        let chain = HandlerChain::new()
            .add_handler(Arc::new(Gate(false)))
            .add_handler(Arc::new(Counting(Arc::clone(&counter))));

        let response = chain.handle(&message("hi")).await.unwrap();

        assert_eq!(response, HandlerResponse::Stop);
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }
}
