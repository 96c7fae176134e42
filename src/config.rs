//! Configuration for a sync run.

use config::{Config as ConfigLoader, File, FileFormat};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::gateway::{Gateway, GatewaySource};

/// Run configuration, loaded once at startup from the JSON file named by
/// the `CONFIG_FILE` environment variable.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Base URL of the CKAN instance, trailing slash included.
    pub ckan_url: String,
    /// CKAN API key sent verbatim in the `Authorization` header.
    pub api_key: String,
    /// Gateways embedded directly in the config file. When absent, the
    /// `INVENTORY` directory supplies the gateway list instead.
    #[serde(default)]
    pub gateways: Option<Vec<Gateway>>,
}

impl Config {
    /// Load configuration from the file named by `CONFIG_FILE`.
    pub fn load() -> Result<Self> {
        let path = env::var("CONFIG_FILE").map_err(|_| Error::MissingEnvVar("CONFIG_FILE"))?;
        Self::from_file(&path)
    }

    /// Load configuration from a JSON file at `path`.
    ///
    /// A missing file, malformed JSON, or a missing `ckan_url`/`api_key`
    /// key all fail here; the caller treats any of them as fatal.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let loader = ConfigLoader::builder()
            .add_source(File::from(path.as_ref()).format(FileFormat::Json))
            .build()?;

        Ok(loader.try_deserialize()?)
    }

    /// Resolve the gateway source for this run.
    ///
    /// An inline `gateways` list wins; otherwise the `INVENTORY` environment
    /// variable selects a directory of per-gateway files.
    pub fn gateway_source(&self) -> Result<GatewaySource> {
        resolve_source(self.gateways.clone(), env::var("INVENTORY").ok())
    }
}

fn resolve_source(
    inline: Option<Vec<Gateway>>,
    inventory_dir: Option<String>,
) -> Result<GatewaySource> {
    if let Some(gateways) = inline {
        return Ok(GatewaySource::Inline(gateways));
    }

    match inventory_dir {
        Some(dir) => Ok(GatewaySource::Inventory(PathBuf::from(dir))),
        None => Err(Error::NoGatewaySource),
    }
}
