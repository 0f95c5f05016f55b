#![forbid(unsafe_code)]

mod helpers;
mod models;
mod routes;

#[macro_use]
extern crate lazy_static;

use anyhow::Context;
use speller_algorithm::rotation::WordSet;
use std::sync::Arc;
use tokio::{
    net::TcpListener,
    sync::{Mutex, RwLock},
};
use tracing::{error, info, Level};
use tracing_subscriber::fmt;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    #[cfg(not(debug_assertions))]
    fmt()
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_max_level(Level::INFO)
        .init();

    #[cfg(debug_assertions)]
    fmt()
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_max_level(Level::TRACE)
        .init();

    let config = helpers::config::read()?;

    // Open score ledger.
    let ledger: speller_db::Instance<models::database::ScoreRecord> =
        speller_db::Builder::default()
            .path(config.scores_path())
            .capacity(config.max_scores())
            .build();
    info!(
        "Loaded ledger {} with {} scores.",
        ledger.path().display(),
        ledger.list().len()
    );

    if config.images.access_key.is_none() {
        info!("No image access key, images are disabled.");
    }

    let state = Arc::new(routes::AppState {
        words: Mutex::new(WordSet::new()),
        ledger: Arc::new(RwLock::new(ledger)),
        upstream: helpers::upstream::Upstream::new(&config)
            .context("failed to build HTTP client")?,
    });

    let listener = TcpListener::bind((config.host(), config.port()))
        .await
        .with_context(|| {
            format!("cannot bind {}:{}", config.host(), config.port())
        })?;

    info!("Server started on {}", listener.local_addr()?);

    axum::serve(listener, routes::router(state))
        .with_graceful_shutdown(shutdown())
        .await?;

    Ok(())
}

async fn shutdown() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl+C: {}", err);
        std::future::pending::<()>().await;
    }

    info!("Shutting down.");
}
