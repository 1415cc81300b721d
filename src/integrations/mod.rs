// src/integrations/mod.rs
//
// External Integrations Module
//
// Chat transports. The bot loop talks to them only through
// MessageSource / MessageSink.

pub mod console;
pub mod slack;
pub mod transport;

pub use console::{ConsoleSink, ConsoleSource, CONSOLE_CHANNEL};
pub use slack::{RtmSession, SlackClient, SlackSink, SlackSource};
pub use transport::{InboundMessage, MessageSink, MessageSource};
