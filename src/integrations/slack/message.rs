// src/integrations/slack/message.rs
//
// Slack RTM wire types
//
// Only the fields the bot reads are modelled; everything else in the
// payloads is ignored by serde.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::integrations::transport::InboundMessage;

/// `rtm.connect` response
#[derive(Debug, Deserialize)]
pub struct RtmConnectResponse {
    pub ok: bool,
    pub url: Option<String>,
    #[serde(rename = "self")]
    pub bot: Option<RtmSelf>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RtmSelf {
    pub id: String,
    pub name: Option<String>,
}

/// Any event frame read from the RTM websocket
#[derive(Debug, Deserialize)]
pub struct RtmEvent {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub subtype: Option<String>,
    pub channel: Option<String>,
    pub user: Option<String>,
    pub text: Option<String>,
}

/// Reply frame written to the RTM websocket
#[derive(Debug, Serialize)]
pub struct OutgoingMessage<'a> {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub channel: &'a str,
    pub text: &'a str,
}

impl<'a> OutgoingMessage<'a> {
    pub fn new(id: u64, channel: &'a str, text: &'a str) -> Self {
        Self {
            id,
            kind: "message",
            channel,
            text,
        }
    }
}

fn mention_regex() -> &'static Regex {
    static MENTION: OnceLock<Regex> = OnceLock::new();
    MENTION.get_or_init(|| {
        Regex::new(r"^<@([A-Z0-9]+)(?:\|[^>]*)?>:?\s*").expect("valid mention pattern")
    })
}

/// Text after a leading `<@BOT_ID>` mention, or `None` if the message
/// does not start by mentioning `bot_id`
pub fn strip_mention<'a>(text: &'a str, bot_id: &str) -> Option<&'a str> {
    let captures = mention_regex().captures(text)?;
    if captures.get(1)?.as_str() != bot_id {
        return None;
    }
    let whole = captures.get(0)?;
    Some(text[whole.end()..].trim())
}

/// Decode one websocket text frame into an addressed message.
///
/// Non-message events, edits/joins (any subtype), messages from the bot
/// itself and messages that don't start with the bot's mention are dropped.
pub fn parse_event(raw: &str, bot_id: &str) -> Option<InboundMessage> {
    let event: RtmEvent = match serde_json::from_str(raw) {
        Ok(event) => event,
        Err(e) => {
            log::debug!("Ignoring undecodable RTM frame: {}", e);
            return None;
        }
    };

    if event.kind.as_deref() != Some("message") || event.subtype.is_some() {
        return None;
    }
    if event.user.as_deref() == Some(bot_id) {
        return None;
    }

    let text = strip_mention(event.text.as_deref()?, bot_id)?;

    Some(InboundMessage {
        channel: event.channel?,
        user: event.user,
        text: text.to_string(),
    })
}
