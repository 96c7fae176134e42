//! Client for the TTNMapper coverage service.

use reqwest::{Client, StatusCode};

use crate::error::{Error, Result};

/// Base URL of the public TTNMapper GeoJSON endpoint.
pub const DEFAULT_BASE_URL: &str = "https://www.ttnmapper.org/geojson/";

/// Client for fetching gateway coverage shapes from TTNMapper.
pub struct TtnMapperClient {
    http_client: Client,
    base_url: String,
}

impl TtnMapperClient {
    /// `base_url` must end with a slash; gateway ids are appended to it.
    pub fn new(base_url: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.to_string(),
        }
    }

    /// Fetch the alphashape GeoJSON for one gateway.
    ///
    /// The body is returned untouched; it is never parsed or validated.
    /// Any non-200 response is reported as a generic fetch failure with no
    /// status-code distinction, and nothing is retried.
    pub async fn fetch_alphashape(&self, ttn_id: &str) -> Result<String> {
        let url = format!("{}{}/alphashape.geojson", self.base_url, ttn_id);

        tracing::debug!("Fetching coverage shape from {}", url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::RequestFailed(e.to_string()))?;

        if response.status() != StatusCode::OK {
            return Err(Error::Fetch);
        }

        response
            .text()
            .await
            .map_err(|e| Error::RequestFailed(e.to_string()))
    }
}
