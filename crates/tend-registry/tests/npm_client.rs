//! Registry client against a mock registry.

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use tend_core::api::PackageApi;
use tend_core::errors::SourceError;
use tend_registry::{RegistryClient, RegistryEndpoints, RegistryError};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> RegistryClient {
    RegistryClient::new(
        RegistryEndpoints {
            registry_url: server.uri(),
            downloads_url: format!("{}/downloads", server.uri()),
            downloads_period: "last-week".to_string(),
        },
        Duration::from_secs(5),
    )
    .unwrap()
}

fn packument() -> serde_json::Value {
    json!({
        "name": "nopt",
        "dist-tags": {"latest": "7.2.0"},
        "versions": {
            "7.2.0": {
                "name": "nopt",
                "version": "7.2.0",
                "license": "ISC",
                "deprecated": false,
                "dist": {"unpackedSize": 25000}
            }
        },
        "time": {
            "created": "2011-01-01T00:00:00.000Z",
            "7.2.0": "2023-06-01T12:00:00.000Z"
        }
    })
}

#[tokio::test]
async fn manifest_and_packument_come_from_full_document() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nopt"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(packument()))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let manifest = client.manifest("nopt").await.unwrap();
    let times = client.packument("nopt").await.unwrap();

    assert_eq!(manifest.name.as_deref(), Some("nopt"));
    assert_eq!(manifest.version.as_deref(), Some("7.2.0"));
    assert_eq!(manifest.unpacked_size(), Some(25000));
    assert!(times.published_at("7.2.0").is_some());
}

#[tokio::test]
async fn downloads_use_configured_period() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/downloads/point/last-week/nopt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "downloads": 31337,
            "start": "2024-01-01",
            "end": "2024-01-07",
            "package": "nopt"
        })))
        .mount(&server)
        .await;

    assert_eq!(client_for(&server).downloads("nopt").await.unwrap(), 31337);
}

#[tokio::test]
async fn missing_package_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ghost"))
        .respond_with(ResponseTemplate::new(404).set_body_string("{\"error\":\"Not found\"}"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let direct = client.fetch_manifest("ghost").await.unwrap_err();
    assert!(matches!(direct, RegistryError::PackageNotFound(_)));

    let via_trait = client.manifest("ghost").await.unwrap_err();
    assert!(matches!(via_trait, SourceError::NotFound(_)));
}

#[tokio::test]
async fn rate_limit_is_surfaced_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/downloads/point/last-week/nopt"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "7"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server).downloads("nopt").await.unwrap_err();
    assert!(matches!(
        err,
        SourceError::RateLimited {
            retry_after_secs: 7
        }
    ));
}
