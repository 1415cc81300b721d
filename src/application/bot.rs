// src/application/bot.rs
//
// Bot loop
//
// CRITICAL RULES:
// - The inbound stream is read strictly in order
// - Each message is answered by its own task; a slow store never blocks reading
// - A failed request is answered with a reply, never propagated
// - Only a transport failure ends the loop with an error

use std::sync::Arc;
use std::time::Duration;

use tokio::task::{JoinHandle, JoinSet};

use crate::application::commands::BotCommand;
use crate::application::replies;
use crate::application::state::AppState;
use crate::error::AppResult;
use crate::integrations::{InboundMessage, MessageSink, MessageSource};
use crate::services::with_store_deadline;

pub struct Bot {
    state: Arc<AppState>,
}

impl Bot {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    /// Read messages until the source closes, answering each on its own task.
    /// Replies still in flight when the source closes or fails are awaited
    /// before returning.
    pub async fn run<S>(&self, mut source: S, sink: Arc<dyn MessageSink>) -> AppResult<()>
    where
        S: MessageSource,
    {
        let mut in_flight = JoinSet::new();

        let outcome = loop {
            let message = match source.next_message().await {
                Ok(Some(message)) => message,
                Ok(None) => break Ok(()),
                Err(e) => break Err(e),
            };

            while in_flight.try_join_next().is_some() {}

            log::info!(
                "[{}] {} asked: {}",
                message.channel,
                message.user.as_deref().unwrap_or("someone"),
                message.text
            );

            let state = Arc::clone(&self.state);
            let sink = Arc::clone(&sink);
            in_flight.spawn(async move {
                answer(&state, sink.as_ref(), message).await;
            });
        };

        while let Some(joined) = in_flight.join_next().await {
            if let Err(e) = joined {
                log::error!("Reply task failed: {}", e);
            }
        }

        match &outcome {
            Ok(()) => log::info!("Message source closed"),
            Err(e) => log::error!("Message source failed: {}", e),
        }
        outcome
    }

    /// Rebuild the vocabulary every `interval` in the background
    pub fn spawn_periodic_refresh(&self, interval: Duration) -> JoinHandle<()> {
        let state = Arc::clone(&self.state);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // first tick is immediate; startup already refreshed
            ticker.tick().await;

            loop {
                ticker.tick().await;
                match state.breed_query_service.refresh_vocabulary().await {
                    Ok(count) => log::debug!("Periodic refresh: {} labels", count),
                    Err(e) => log::warn!("Periodic vocabulary refresh failed: {}", e),
                }
            }
        })
    }
}

async fn answer(state: &AppState, sink: &dyn MessageSink, message: InboundMessage) {
    let reply = respond(state, &message.text).await;
    if let Err(e) = sink.send(&message.channel, &reply).await {
        log::error!("Failed to reply on {}: {}", message.channel, e);
    }
}

/// Compute the reply for one message text
pub async fn respond(state: &AppState, text: &str) -> String {
    let command = BotCommand::parse(text);
    log::debug!("Handling {} command", command.name());

    match command {
        BotCommand::Help => replies::HELP.to_string(),

        BotCommand::Classes => replies::listing(&state.breed_query_service.listing()),

        BotCommand::Reload => match state.breed_query_service.refresh_vocabulary().await {
            Ok(count) => replies::reloaded(count),
            Err(e) => replies::error(&e),
        },

        BotCommand::Stats => {
            let statistics = Arc::clone(&state.statistics_service);
            match with_store_deadline(state.config.store_timeout(), move || statistics.snapshot())
                .await
            {
                Ok(snapshot) => replies::statistics(&snapshot),
                Err(e) => replies::error(&e),
            }
        }

        BotCommand::Query(query) => match state.breed_query_service.find_image(&query).await {
            Ok(selected) => {
                let url = state.config.image_url(&selected.filename);
                replies::selected_image(&selected, &url)
            }
            Err(e) => replies::error(&e),
        },
    }
}
