//! Gateway records and the sources that provide them.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// One radio gateway tracked by TTNMapper and mirrored into CKAN.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Gateway {
    /// Identifier used by the TTNMapper service.
    pub ttn_id: String,
    /// Identifier of the CKAN resource the coverage file is attached to.
    pub ckan_id: String,
    /// Human-readable display name.
    pub name: String,
}

/// Where the gateway list for a run comes from.
#[derive(Debug, Clone)]
pub enum GatewaySource {
    /// Gateways embedded in the config file.
    Inline(Vec<Gateway>),
    /// Directory of per-gateway JSON files, one record per file.
    Inventory(PathBuf),
}

impl GatewaySource {
    /// Produce the gateway list for this run.
    ///
    /// Inventory problems are never fatal. Unreadable or invalid files are
    /// logged and skipped, and a missing or empty directory yields an empty
    /// list.
    pub fn load(&self) -> Vec<Gateway> {
        match self {
            GatewaySource::Inline(gateways) => gateways.clone(),
            GatewaySource::Inventory(dir) => load_inventory(dir),
        }
    }
}

/// Scan an inventory directory for gateway files.
///
/// Only file names containing "gw" count as gateway records; anything else
/// in the directory (readmes, other inventory kinds) is ignored. Files are
/// processed in name order so runs are deterministic.
fn load_inventory(dir: &Path) -> Vec<Gateway> {
    let mut gateways = Vec::new();

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::error!("Error occurred whilst loading inventory {}: {}", dir.display(), e);
            return gateways;
        }
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.contains("gw"))
        })
        .collect();
    files.sort();

    if files.is_empty() {
        tracing::error!("Unable to load inventory, no gateway files found in {}", dir.display());
        return gateways;
    }

    for path in files {
        tracing::info!("Loading {} from inventory", path.display());

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::error!("Unable to read inventory file {} - skipping: {}", path.display(), e);
                continue;
            }
        };

        match serde_json::from_str::<Gateway>(&contents) {
            Ok(gateway) => {
                tracing::info!("Loaded gateway inventory data for {}", gateway.name);
                gateways.push(gateway);
            }
            Err(e) => {
                tracing::error!(
                    "Inventory file {} is not a valid gateway record - skipping: {}",
                    path.display(),
                    e
                );
            }
        }
    }

    gateways
}
