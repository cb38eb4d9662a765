//! Wallet API Server
//!
//! Main entry point for the wallet service.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wallet_api::{AppState, create_router};
use wallet_core::{ExchangeRateProvider, FixedRateProvider, WalletService};
use wallet_rates::HttpRateProvider;
use wallet_shared::{AppConfig, RateProviderKind, RatesConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize tracing
    let json = config.log.json;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wallet=debug,tower_http=debug".into()),
        )
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(tracing_subscriber::fmt::layer))
        .init();

    config.wallet.validate()?;

    let provider = rate_provider(&config.rates)?;
    let wallet = WalletService::from_config(&config.wallet, provider)?;
    info!(
        base_currency = %wallet.base_currency(),
        currencies = wallet.get_supported_currencies().len(),
        "Wallet initialized"
    );

    let app = create_router(AppState::new(wallet));

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Picks the exchange rate source named by `rates.provider`.
fn rate_provider(config: &RatesConfig) -> anyhow::Result<Arc<dyn ExchangeRateProvider>> {
    match config.provider {
        RateProviderKind::Http => {
            let provider = HttpRateProvider::from_config(config)?;
            info!(
                api_url = %config.api_url,
                timeout_secs = config.timeout_secs,
                cache_ttl_secs = config.cache_ttl_secs,
                "Using HTTP rate feed"
            );
            Ok(Arc::new(provider))
        }
        RateProviderKind::Fixed => {
            let provider = FixedRateProvider::from_config(config)?;
            info!(pairs = provider.len(), "Using fixed rate table");
            Ok(Arc::new(provider))
        }
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
