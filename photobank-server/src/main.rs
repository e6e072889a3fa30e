use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use photobank_server::{build_assistant, logging, router, Settings};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; real environment variables still apply.
    let _ = dotenvy::dotenv();
    let settings = Settings::parse();
    logging::init();

    let assistant = Arc::new(build_assistant(&settings).context("invalid configuration")?);

    match assistant.reload().await {
        Ok(chunks) => tracing::info!(chunks, "knowledge base ready"),
        Err(err) => tracing::warn!(
            error = %err,
            "starting without a knowledge base; answers will have no context"
        ),
    }

    let bind_addr = settings.bind_address();
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router(assistant))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", err);
    }
    tracing::info!("Shutting down");
}
