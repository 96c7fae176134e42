//! Client for the CKAN catalog API.

use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};

use crate::error::{Error, Result};
use crate::gateway::Gateway;

/// Client for updating coverage resources on a CKAN instance.
pub struct CkanClient {
    http_client: Client,
    base_url: String,
    api_key: String,
}

impl CkanClient {
    /// `base_url` must end with a slash; the API path is appended to it.
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Replace the coverage file attached to the gateway's CKAN resource.
    ///
    /// CKAN matches the resource by `id` and keeps its display `name` in
    /// sync; the payload goes up verbatim as the `upload` file part.
    pub async fn update_resource(&self, gateway: &Gateway, payload: String) -> Result<()> {
        // The upload file name is part of the established resource contract,
        // typo included.
        let upload = Part::text(payload)
            .file_name("alphashapre.geojson")
            .mime_str("text/plain")
            .map_err(|e| Error::RequestFailed(e.to_string()))?;

        let form = Form::new()
            .part("upload", upload)
            .text("format", "GeoJSON")
            .text("id", gateway.ckan_id.clone())
            .text("name", gateway.name.clone());

        let url = format!("{}api/action/resource_update", self.base_url);

        tracing::debug!("Posting resource update to {}", url);

        let response = self
            .http_client
            .post(&url)
            .header("Authorization", &self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::RequestFailed(e.to_string()))?;

        if response.status() != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Upload(body));
        }

        Ok(())
    }
}
