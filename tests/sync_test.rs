//! End-to-end tests for the fetch and upload loop against mock HTTP servers.

use ttn_coverage_sync::{CkanClient, Gateway, TtnMapperClient};
use ttn_coverage_sync::sync;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const POLYGON: &str = r#"{"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,0]]]}"#;

fn gateway(n: u32) -> Gateway {
    Gateway {
        ttn_id: format!("eui-{}", n),
        ckan_id: format!("res-{}", n),
        name: format!("Gateway {}", n),
    }
}

fn ttnmapper_client(server: &MockServer) -> TtnMapperClient {
    TtnMapperClient::new(&format!("{}/geojson/", server.uri()))
}

fn ckan_client(server: &MockServer) -> CkanClient {
    CkanClient::new(&format!("{}/", server.uri()), "test-key")
}

async fn mount_alphashape(server: &MockServer, ttn_id: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(format!("/geojson/{}/alphashape.geojson", ttn_id)))
        .respond_with(ResponseTemplate::new(status).set_body_string(POLYGON))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn syncs_every_configured_gateway() {
    let ttnmapper_server = MockServer::start().await;
    let ckan_server = MockServer::start().await;

    for n in 1..=3 {
        mount_alphashape(&ttnmapper_server, &format!("eui-{}", n), 200).await;
    }

    Mock::given(method("POST"))
        .and(path("/api/action/resource_update"))
        .respond_with(ResponseTemplate::new(200))
        .expect(3)
        .mount(&ckan_server)
        .await;

    let gateways = vec![gateway(1), gateway(2), gateway(3)];
    let summary = sync::run(
        &ttnmapper_client(&ttnmapper_server),
        &ckan_client(&ckan_server),
        &gateways,
    )
    .await;

    assert_eq!(summary.processed, 3);
    assert_eq!(summary.failed, 0);
}

#[tokio::test]
async fn failed_fetch_skips_only_that_gateway() {
    let ttnmapper_server = MockServer::start().await;
    let ckan_server = MockServer::start().await;

    mount_alphashape(&ttnmapper_server, "eui-1", 200).await;
    mount_alphashape(&ttnmapper_server, "eui-2", 404).await;
    mount_alphashape(&ttnmapper_server, "eui-3", 200).await;

    Mock::given(method("POST"))
        .and(path("/api/action/resource_update"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&ckan_server)
        .await;

    let gateways = vec![gateway(1), gateway(2), gateway(3)];
    let summary = sync::run(
        &ttnmapper_client(&ttnmapper_server),
        &ckan_client(&ckan_server),
        &gateways,
    )
    .await;

    assert_eq!(summary.processed, 2);
    assert_eq!(summary.failed, 1);
}

#[tokio::test]
async fn failed_upload_skips_only_that_gateway() {
    let ttnmapper_server = MockServer::start().await;
    let ckan_server = MockServer::start().await;

    mount_alphashape(&ttnmapper_server, "eui-1", 200).await;
    mount_alphashape(&ttnmapper_server, "eui-2", 200).await;

    // First gateway's resource id is rejected, second succeeds.
    Mock::given(method("POST"))
        .and(path("/api/action/resource_update"))
        .and(body_string_contains("res-1"))
        .respond_with(ResponseTemplate::new(409).set_body_string("resource is locked"))
        .expect(1)
        .mount(&ckan_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/action/resource_update"))
        .and(body_string_contains("res-2"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&ckan_server)
        .await;

    let gateways = vec![gateway(1), gateway(2)];
    let summary = sync::run(
        &ttnmapper_client(&ttnmapper_server),
        &ckan_client(&ckan_server),
        &gateways,
    )
    .await;

    assert_eq!(summary.processed, 1);
    assert_eq!(summary.failed, 1);
}

#[tokio::test]
async fn upload_posts_multipart_form_with_gateway_identity() {
    let ckan_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/action/resource_update"))
        .and(header("Authorization", "test-key"))
        .and(body_string_contains("name=\"upload\""))
        .and(body_string_contains("filename=\"alphashapre.geojson\""))
        .and(body_string_contains("Content-Type: text/plain"))
        .and(body_string_contains("name=\"format\""))
        .and(body_string_contains("GeoJSON"))
        .and(body_string_contains("name=\"id\""))
        .and(body_string_contains("res-1"))
        .and(body_string_contains("name=\"name\""))
        .and(body_string_contains("Gateway 1"))
        .and(body_string_contains(POLYGON))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&ckan_server)
        .await;

    let result = ckan_client(&ckan_server)
        .update_resource(&gateway(1), POLYGON.to_string())
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn upload_error_carries_response_body() {
    let ckan_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/action/resource_update"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Access denied"))
        .mount(&ckan_server)
        .await;

    let err = ckan_client(&ckan_server)
        .update_resource(&gateway(1), POLYGON.to_string())
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Access denied"));
}

#[tokio::test]
async fn fetch_returns_raw_body() {
    let ttnmapper_server = MockServer::start().await;
    mount_alphashape(&ttnmapper_server, "eui-1", 200).await;

    let payload = ttnmapper_client(&ttnmapper_server)
        .fetch_alphashape("eui-1")
        .await
        .unwrap();

    assert_eq!(payload, POLYGON);
}

#[tokio::test]
async fn fetch_non_200_is_a_generic_error() {
    let ttnmapper_server = MockServer::start().await;
    mount_alphashape(&ttnmapper_server, "eui-1", 500).await;

    let err = ttnmapper_client(&ttnmapper_server)
        .fetch_alphashape("eui-1")
        .await
        .unwrap_err();

    // No status code leaks into the message.
    assert!(!err.to_string().contains("500"));
    assert!(err.to_string().contains("Couldn't fetch"));
}
