use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use sampling::SeedSource;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod params;
mod payload;
mod pipeline;
mod routes;
mod upstream;

use config::Config;
use upstream::Upstream;

#[derive(Clone)]
struct AppState {
    seeds: Arc<SeedSource>,
    upstream: Upstream,
    max_samples: usize,
}

impl AppState {
    fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Ok(Self {
            seeds: Arc::new(SeedSource::from_option(config.seed)),
            upstream: Upstream::new(
                config.api_url.clone(),
                Duration::from_millis(config.upstream_timeout_ms),
            )?,
            max_samples: config.max_samples,
        })
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::parse();
    let addr = config.addr();

    let state = match AppState::from_config(&config) {
        Ok(state) => state,
        Err(err) => {
            error!("failed to build upstream client: {err}");
            return ExitCode::FAILURE;
        }
    };
    if config.seed.is_some() {
        info!("deterministic seeding enabled");
    }
    let upstream_url = state.upstream.base_url().to_string();
    let seeds = Arc::clone(&state.seeds);
    let app = routes::router(state, config.mode);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("failed to bind {addr}: {err}");
            return ExitCode::FAILURE;
        }
    };

    info!(
        "perftest listening on http://{addr} (mode {:?}, upstream {upstream_url})",
        config.mode
    );
    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("server stopped: {err}");
        return ExitCode::FAILURE;
    }

    if config.seed.is_some() {
        info!("issued {} deterministic seeds", seeds.issued());
    }
    info!("shut down cleanly");
    ExitCode::SUCCESS
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("cannot listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
}
