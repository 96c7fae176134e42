//! Error types for the sync tool.

/// Errors raised while loading configuration or syncing a gateway.
///
/// Configuration variants are fatal to the run; fetch and upload variants
/// are caught per gateway by the sync loop.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Invalid configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("No gateway source configured: add a gateways list to the config file or set INVENTORY")]
    NoGatewaySource,

    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    #[error("Couldn't fetch GeoJSON data from TTNMapper service")]
    Fetch,

    #[error("Error uploading data to CKAN: {0}")]
    Upload(String),
}

pub type Result<T> = std::result::Result<T, Error>;
