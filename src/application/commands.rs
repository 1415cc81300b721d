// src/application/commands.rs
//
// Chat commands
//
// The text of an addressed message is either one of the fixed commands or
// a breed query. Matching is case-insensitive on the trimmed text.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand {
    /// List every known label
    Classes,
    /// Store and session statistics
    Stats,
    /// Rebuild the vocabulary from the store
    Reload,
    /// Empty message or `help`
    Help,
    /// Anything else: find a picture of this breed
    Query(String),
}

impl BotCommand {
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        match trimmed.to_lowercase().as_str() {
            "classes" => BotCommand::Classes,
            "stats" => BotCommand::Stats,
            "reload" => BotCommand::Reload,
            "" | "help" => BotCommand::Help,
            _ => BotCommand::Query(trimmed.to_string()),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BotCommand::Classes => "classes",
            BotCommand::Stats => "stats",
            BotCommand::Reload => "reload",
            BotCommand::Help => "help",
            BotCommand::Query(_) => "query",
        }
    }
}
