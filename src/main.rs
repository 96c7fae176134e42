//! TTN Coverage Sync - mirrors TTNMapper gateway coverage shapes into CKAN.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ttn_coverage_sync::ckan::CkanClient;
use ttn_coverage_sync::config::Config;
use ttn_coverage_sync::sync;
use ttn_coverage_sync::ttnmapper::{self, TtnMapperClient};

#[tokio::main]
async fn main() {
    // Initialize tracing before configuration so fatal config errors are
    // themselves logged.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Running TTN coverage sync");

    // Load configuration
    tracing::info!("Loading configuration file");
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let source = match config.gateway_source() {
        Ok(source) => source,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Loading gateway records");
    let gateways = source.load();

    tracing::info!("Updating resources at {}", config.ckan_url);
    let ttnmapper = TtnMapperClient::new(ttnmapper::DEFAULT_BASE_URL);
    let ckan = CkanClient::new(&config.ckan_url, &config.api_key);

    sync::run(&ttnmapper, &ckan, &gateways).await;
}
