// src/main.rs

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Parser;

use dogbot::application::{AppState, Bot, Configuration};
use dogbot::db::{
    create_connection_pool, get_database_stats, initialize_database, verify_database_integrity,
};
use dogbot::integrations::{ConsoleSink, ConsoleSource, MessageSink, SlackClient};

#[derive(Parser)]
#[command(name = "dogbot")]
#[command(about = "Answers dog breed questions with a picture", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the JSON configuration file
    config: PathBuf,

    /// Read queries from stdin instead of connecting to Slack
    #[arg(long)]
    console: bool,

    /// Import classifier output (a JSON array of image records) and exit
    #[arg(long, value_name = "PATH")]
    import: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    // 1. CONFIGURATION
    let config = Configuration::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;

    // 2. INFRASTRUCTURE
    let db_path = config.resolve_database_path()?;
    let pool = Arc::new(
        create_connection_pool(&db_path, config.pool_size)
            .with_context(|| format!("opening {}", db_path.display()))?,
    );

    // Initialize schema (idempotent)
    {
        let conn = pool.get()?;
        initialize_database(&conn)?;
        verify_database_integrity(&conn)?;

        let stats = get_database_stats(&conn)?;
        log::info!(
            "Using database {} ({} images, {} classifications, {} bytes)",
            db_path.display(),
            stats.image_count,
            stats.classification_count,
            stats.size_bytes
        );
    }

    // 3. SERVICES
    let refresh_interval = config.refresh_interval();
    let slack_token = config.slack_token.clone();
    let state = Arc::new(AppState::new(config, pool));

    if let Some(path) = cli.import {
        let summary = state
            .catalog_service
            .import_file(&path)
            .with_context(|| format!("importing {}", path.display()))?;
        log::info!(
            "{}: {} images, {} classifications, {} skipped",
            path.display(),
            summary.images,
            summary.classifications,
            summary.skipped
        );
        return Ok(());
    }

    let bot = Bot::new(Arc::clone(&state));

    // 4. VOCABULARY
    let label_count = state
        .breed_query_service
        .refresh_vocabulary()
        .await
        .context("loading the breed vocabulary")?;
    log::info!("Ready with {} breed names", label_count);

    let _refresher = refresh_interval.map(|interval| bot.spawn_periodic_refresh(interval));

    // 5. TRANSPORT
    if cli.console {
        let sink: Arc<dyn MessageSink> = Arc::new(ConsoleSink::stdout());
        bot.run(ConsoleSource::stdin(), sink).await?;
        return Ok(());
    }

    let Some(token) = slack_token else {
        bail!("slack_token is not configured; pass --console to run without Slack");
    };

    let client = SlackClient::new(token)?;
    let (source, sink) = client.connect().await.context("connecting to Slack")?;
    log::info!("Connected to Slack as {}", source.bot_id());

    let sink: Arc<dyn MessageSink> = Arc::new(sink);
    bot.run(source, sink).await?;

    Ok(())
}
