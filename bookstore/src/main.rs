use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookstore::{config::Settings, http, open_store};

fn setup_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
    }
    info!("shutting down");
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load()?;
    info!(backend = %settings.backend, bind = %settings.bind_address, "loaded settings");

    let store = open_store(&settings).await?;
    http::serve(store, settings.socket_addr()?, shutdown_signal()).await?;

    Ok(())
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    setup_tracing();

    match run().await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "bookstore exited with an error");
            std::process::ExitCode::FAILURE
        }
    }
}
