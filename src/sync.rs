//! The per-gateway fetch and upload loop.

use crate::ckan::CkanClient;
use crate::error::Result;
use crate::gateway::Gateway;
use crate::ttnmapper::TtnMapperClient;

/// Outcome counts for one sync run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Gateways fetched and uploaded successfully.
    pub processed: usize,
    /// Gateways skipped after a fetch or upload error.
    pub failed: usize,
}

/// Sync every gateway in order.
///
/// A failed fetch or upload is logged with the gateway name and the run
/// moves on; one bad gateway never aborts the batch.
pub async fn run(
    ttnmapper: &TtnMapperClient,
    ckan: &CkanClient,
    gateways: &[Gateway],
) -> RunSummary {
    let mut summary = RunSummary::default();

    for gateway in gateways {
        tracing::info!("Currently processing {}", gateway.name);

        match process_gateway(ttnmapper, ckan, gateway).await {
            Ok(()) => summary.processed += 1,
            Err(e) => {
                summary.failed += 1;
                tracing::error!("Error occurred processing gateway {}: {}", gateway.name, e);
            }
        }
    }

    tracing::info!(
        "Completed syncing data from TTNMapper to CKAN ({} updated, {} failed)",
        summary.processed,
        summary.failed
    );

    summary
}

async fn process_gateway(
    ttnmapper: &TtnMapperClient,
    ckan: &CkanClient,
    gateway: &Gateway,
) -> Result<()> {
    tracing::info!("Fetching gateway's alphashape GeoJSON file");
    let payload = ttnmapper.fetch_alphashape(&gateway.ttn_id).await?;
    tracing::info!("Fetched GeoJSON file successfully");

    tracing::info!("Uploading acquired data to CKAN service");
    ckan.update_resource(gateway, payload).await?;
    tracing::info!("Successfully updated gateway within CKAN");

    Ok(())
}
