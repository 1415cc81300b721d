// src/integrations/slack/mod.rs

pub mod client;
pub mod message;

pub use client::{RtmSession, SlackClient, SlackSink, SlackSource, SLACK_API_BASE};
pub use message::{parse_event, strip_mention};
