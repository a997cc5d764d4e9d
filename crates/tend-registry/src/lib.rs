//! # tend-registry
//!
//! npm registry HTTP client for Tend.
//!
//! Resolves registry identifiers to the three publication lookups the
//! status engine needs:
//! - the manifest of the `latest` version (full metadata)
//! - the packument's per-version publication times
//! - the download count from the downloads API
//!
//! [`RegistryClient`] implements [`tend_core::api::PackageApi`].

pub mod npm;

mod error;
mod http;

pub use error::RegistryError;

use std::time::Duration;

use async_trait::async_trait;
use tend_core::api::PackageApi;
use tend_core::errors::SourceError;
use tend_core::sources::{PackageManifest, Packument};

// ── Endpoints ──────────────────────────────────────────────────────

/// Where the client sends its requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEndpoints {
    /// Registry base URL, e.g. `https://registry.npmjs.org`.
    pub registry_url: String,
    /// Downloads API base URL, e.g. `https://api.npmjs.org/downloads`.
    pub downloads_url: String,
    /// Download window, e.g. `last-week`.
    pub downloads_period: String,
}

impl Default for RegistryEndpoints {
    fn default() -> Self {
        Self {
            registry_url: "https://registry.npmjs.org".to_string(),
            downloads_url: "https://api.npmjs.org/downloads".to_string(),
            downloads_period: "last-week".to_string(),
        }
    }
}

// ── Client ─────────────────────────────────────────────────────────

/// HTTP client for the npm registry.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    http: reqwest::Client,
    endpoints: RegistryEndpoints,
}

impl RegistryClient {
    /// Create a registry client.
    ///
    /// Trailing slashes on the base URLs are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Http`] if the underlying `reqwest::Client`
    /// fails to build.
    pub fn new(endpoints: RegistryEndpoints, timeout: Duration) -> Result<Self, RegistryError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("tend/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        let endpoints = RegistryEndpoints {
            registry_url: endpoints.registry_url.trim_end_matches('/').to_string(),
            downloads_url: endpoints.downloads_url.trim_end_matches('/').to_string(),
            downloads_period: endpoints.downloads_period,
        };
        Ok(Self { http, endpoints })
    }

    #[must_use]
    pub const fn endpoints(&self) -> &RegistryEndpoints {
        &self.endpoints
    }
}

#[async_trait]
impl PackageApi for RegistryClient {
    async fn manifest(&self, pkg: &str) -> Result<PackageManifest, SourceError> {
        Ok(self.fetch_manifest(pkg).await?)
    }

    async fn packument(&self, pkg: &str) -> Result<Packument, SourceError> {
        Ok(self.fetch_packument(pkg).await?)
    }

    async fn downloads(&self, pkg: &str) -> Result<u64, SourceError> {
        Ok(self.fetch_downloads(pkg).await?)
    }
}
