//! Terminal client entry point.
//!
//! Assembles the built-in campaign, a configured [`runtime::Session`],
//! and the ratatui front end, then hands control to the draw/poll loop
//! in [`app`].

mod app;
mod config;
mod theme;
mod transcript;
mod ui;

use anyhow::Result;
use rand::Rng;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use app::App;
use config::ClientConfig;
use game_core::GameConfig;
use runtime::Session;

fn main() -> Result<()> {
    let config = ClientConfig::from_env();
    setup_logging()?;

    let seed = config
        .seed
        .unwrap_or_else(|| rand::thread_rng().r#gen());
    tracing::info!(seed, "starting client");

    let world = game_content::rescue_the_princess();
    let session = Session::new(world, GameConfig::default(), seed)?;

    let mut terminal = ratatui::init();
    let result = App::new(session, config).run(&mut terminal);
    ratatui::restore();
    result
}

/// Logs go to a file only; stderr belongs to the TUI.
fn setup_logging() -> Result<()> {
    let log_dir = directories::ProjectDirs::from("", "", "pixelhero")
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| std::path::PathBuf::from("/tmp/pixelhero/logs"));
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, "client.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());
    let file_layer = tracing_subscriber::fmt::layer().with_writer(writer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    // Keep the writer alive for the process lifetime.
    std::mem::forget(guard);

    tracing::info!("log file: {}/client.log", log_dir.display());
    Ok(())
}
