// src/integrations/slack/client.rs
//
// Slack RTM Integration
//
// ARCHITECTURE:
// - `rtm.connect` over HTTPS yields a websocket URL and the bot's user id
// - The websocket is split: the read half feeds the bot loop, the write
//   half is shared by every reply task behind an async mutex
//
// CRITICAL RULES:
// - This is INFRASTRUCTURE: it moves text, it never interprets queries
// - Only messages that start by mentioning the bot are forwarded
// - Reply frame ids increase monotonically per connection

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use reqwest::{header, Client};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::error::{AppError, AppResult};
use crate::integrations::slack::message::{parse_event, OutgoingMessage, RtmConnectResponse};
use crate::integrations::transport::{InboundMessage, MessageSink, MessageSource};

pub const SLACK_API_BASE: &str = "https://slack.com/api";

type SlackSocket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Slack Web API client used to open RTM sessions
pub struct SlackClient {
    api_base: String,
    http_client: Client,
    token: String,
}

/// Result of `rtm.connect`
#[derive(Debug, Clone)]
pub struct RtmSession {
    pub url: String,
    pub bot_id: String,
}

impl SlackClient {
    pub fn new(token: impl Into<String>) -> AppResult<Self> {
        Self::with_api_base(token, SLACK_API_BASE)
    }

    pub fn with_api_base(token: impl Into<String>, api_base: impl Into<String>) -> AppResult<Self> {
        let http_client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            api_base: api_base.into(),
            http_client,
            token: token.into(),
        })
    }

    /// Ask Slack for a websocket URL
    pub async fn rtm_connect(&self) -> AppResult<RtmSession> {
        let response = self
            .http_client
            .get(format!("{}/rtm.connect", self.api_base))
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token))
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Transport(format!(
                "rtm.connect returned status: {}",
                response.status()
            )));
        }

        let body: RtmConnectResponse = response.json().await?;
        if !body.ok {
            return Err(AppError::Transport(format!(
                "rtm.connect failed: {}",
                body.error.unwrap_or_else(|| "unknown error".to_string())
            )));
        }

        match (body.url, body.bot) {
            (Some(url), Some(bot)) => {
                log::info!(
                    "RTM session opened for {} ({})",
                    bot.name.as_deref().unwrap_or("bot"),
                    bot.id
                );
                Ok(RtmSession {
                    url,
                    bot_id: bot.id,
                })
            }
            _ => Err(AppError::Transport(
                "rtm.connect response is missing url or self".to_string(),
            )),
        }
    }

    /// Open the RTM websocket and split it into the bot's source and sink
    pub async fn connect(&self) -> AppResult<(SlackSource, SlackSink)> {
        let session = self.rtm_connect().await?;
        let (socket, _) = connect_async(session.url.as_str()).await?;
        let (write, read) = socket.split();

        Ok((
            SlackSource {
                bot_id: session.bot_id,
                stream: read,
            },
            SlackSink {
                sink: Mutex::new(write),
                next_id: AtomicU64::new(1),
            },
        ))
    }
}

/// Read half of an RTM connection
pub struct SlackSource {
    bot_id: String,
    stream: SplitStream<SlackSocket>,
}

impl SlackSource {
    pub fn bot_id(&self) -> &str {
        &self.bot_id
    }
}

#[async_trait]
impl MessageSource for SlackSource {
    async fn next_message(&mut self) -> AppResult<Option<InboundMessage>> {
        while let Some(frame) = self.stream.next().await {
            match frame? {
                Message::Text(text) => {
                    if let Some(message) = parse_event(&text, &self.bot_id) {
                        return Ok(Some(message));
                    }
                }
                Message::Close(reason) => {
                    log::info!("RTM connection closed: {:?}", reason);
                    return Ok(None);
                }
                _ => {}
            }
        }
        Ok(None)
    }
}

/// Write half of an RTM connection, shared by reply tasks
pub struct SlackSink {
    sink: Mutex<SplitSink<SlackSocket, Message>>,
    next_id: AtomicU64,
}

#[async_trait]
impl MessageSink for SlackSink {
    async fn send(&self, channel: &str, text: &str) -> AppResult<()> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let frame = serde_json::to_string(&OutgoingMessage::new(id, channel, text))?;

        let mut sink = self.sink.lock().await;
        sink.send(Message::Text(frame)).await?;
        Ok(())
    }
}
