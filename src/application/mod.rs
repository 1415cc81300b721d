// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - Sits between the chat transports and the services
// - Parses commands, formats replies, owns the message loop
// - Never touches the store directly

pub mod bot;
pub mod commands;
pub mod config;
pub mod replies;
pub mod state;

pub use bot::{respond, Bot};
pub use commands::BotCommand;
pub use config::Configuration;
pub use state::AppState;
