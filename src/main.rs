//! users-api entrypoint.
//!
//! Startup order matters: the store is seeded from environment defaults
//! before the scheduler starts or the listener binds, so nothing ever
//! reads an unseeded store.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use users_api::config::{BootstrapSettings, ConfigFetcher, RefreshScheduler};
use users_api::http::HttpServer;
use users_api::lifecycle::{signals, Shutdown};
use users_api::observability::metrics;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "users_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "users-api starting");

    let settings = BootstrapSettings::from_env();
    let store = Arc::new(settings.seed_store());

    tracing::info!(
        provider = %settings.provider_base_url,
        service = %settings.service_name,
        refresh_interval_secs = settings.refresh_interval.as_secs(),
        "configuration loaded"
    );

    if let Some(addr) = settings.metrics_listener() {
        metrics::init_metrics(addr);
    }

    let shutdown = Shutdown::new();

    // The scheduler's first tick fires immediately, giving the initial
    // fetch with the environment defaults already in place as fallback.
    let fetcher = ConfigFetcher::new(
        &settings.provider_base_url,
        &settings.service_name,
        settings.fetch_timeout,
    )?;
    let scheduler = RefreshScheduler::new(fetcher, store.clone(), settings.refresh_interval);
    tokio::spawn(scheduler.run(shutdown.subscribe()));

    // Bind to the bootstrapped port. Fail fast: a port that does not parse
    // is a startup error, not something to limp past.
    let port: u16 = store.get().server_port.parse()?;
    let listener = TcpListener::bind(("0.0.0.0", port)).await?;

    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(store);

    tokio::spawn(async move {
        signals::wait_for_termination().await;
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("shutdown complete");
    Ok(())
}
