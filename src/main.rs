//! Atelier - freelancer-studio chat assistant core.
//!
//! ## Architecture
//!
//! - `config` - Environment configuration
//! - `catalogs` - Static content tables (embedded JSON)
//! - `state` - Per-user profile and XP store
//! - `session` - Ephemeral choice-driven interaction sessions
//! - `plugins` - Command handlers (extensible)
//! - `events` - Message triggers, XP-per-message, member-join welcome
//! - `directives` - Response contract with the presentation layer
//! - `bot` - Engine state, dispatch and runtime
//!
//! The platform gateway (Discord, Telegram, ...) is an external
//! collaborator: it feeds `InboundEvent`s into the engine inbox and
//! renders the `ResponseDirective`s the engine emits.

mod bot;
mod catalogs;
mod config;
mod directives;
mod events;
mod plugins;
mod session;
mod state;

use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bot::Engine;
use catalogs::Catalogs;
use config::Config;
use directives::TracingPresenter;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file first (before anything else)
    dotenvy::dotenv().ok();

    // Default to "info" for our crate when RUST_LOG is unset
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("atelier=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting Atelier...");

    let config = Arc::new(Config::from_env());
    info!(bot_name = %config.bot_name, quiz_timeout = ?config.quiz_timeout, "Configuration loaded");

    // Catalog failure is the only fatal error class: there is no
    // degraded mode without the content tables.
    let catalogs = Arc::new(Catalogs::load().context("failed to load content catalogs")?);
    info!(
        challenges = catalogs.challenges.len(),
        quiz = catalogs.quiz.len(),
        quote_categories = catalogs.quotes.len(),
        "Catalogs loaded"
    );

    let (events_tx, engine) = Engine::new(config, catalogs);
    let engine_task = tokio::spawn(engine.run(Arc::new(TracingPresenter)));

    // `events_tx` is the handle a platform gateway drives; the binary
    // holds it open until shutdown is requested.
    info!("Engine running; press Ctrl+C to stop");
    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;

    info!("Shutting down...");
    drop(events_tx);
    engine_task.await.context("engine task panicked")?;
    info!("Shutdown complete");

    Ok(())
}
