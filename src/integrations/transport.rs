// src/integrations/transport.rs
//
// Chat transport seam
//
// The bot loop only sees these traits; Slack and the console implement them.

use async_trait::async_trait;

use crate::error::AppResult;

/// A message addressed to the bot, with any mention already stripped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    /// Where the reply goes
    pub channel: String,
    pub user: Option<String>,
    pub text: String,
}

impl InboundMessage {
    pub fn new(channel: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            user: None,
            text: text.into(),
        }
    }
}

/// Ordered stream of addressed messages
#[async_trait]
pub trait MessageSource: Send {
    /// Next message for the bot; `Ok(None)` once the transport has closed
    async fn next_message(&mut self) -> AppResult<Option<InboundMessage>>;
}

/// Shared reply channel. Safe to call from many tasks at once.
#[async_trait]
pub trait MessageSink: Send + Sync {
    async fn send(&self, channel: &str, text: &str) -> AppResult<()>;
}
