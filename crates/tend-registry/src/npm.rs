//! npm registry lookups: packument, latest manifest, download counts.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tend_core::sources::{PackageManifest, Packument};

use crate::{RegistryClient, error::RegistryError, http::check_response};

/// Accept header that makes the registry return full metadata rather than
/// the abbreviated install document.
const FULL_METADATA: &str = "application/json";

#[derive(serde::Deserialize)]
struct NpmPackument {
    #[serde(rename = "dist-tags", default)]
    dist_tags: BTreeMap<String, String>,
    #[serde(default)]
    versions: BTreeMap<String, Value>,
    /// Version → ISO timestamp, plus `created`/`modified` and, for
    /// unpublished packages, an `unpublished` object.
    #[serde(default)]
    time: BTreeMap<String, Value>,
}

#[derive(serde::Deserialize)]
struct NpmDownloads {
    downloads: u64,
}

impl NpmPackument {
    fn publication_times(&self) -> Packument {
        let time = self
            .time
            .iter()
            .filter(|(key, _)| !matches!(key.as_str(), "created" | "modified"))
            .filter_map(|(version, stamp)| {
                let parsed = DateTime::parse_from_rfc3339(stamp.as_str()?).ok()?;
                Some((version.clone(), parsed.with_timezone(&Utc)))
            })
            .collect();
        Packument { time }
    }

    fn into_latest_manifest(mut self, name: &str) -> Result<PackageManifest, RegistryError> {
        let latest = self
            .dist_tags
            .get("latest")
            .ok_or_else(|| RegistryError::NoLatestVersion(name.to_string()))?;
        let document = self
            .versions
            .remove(latest)
            .ok_or_else(|| RegistryError::NoLatestVersion(name.to_string()))?;
        serde_json::from_value(document)
            .map_err(|e| RegistryError::Parse(format!("manifest for {name}@{latest}: {e}")))
    }
}

/// Escape a package name for use as a registry path segment.
///
/// Scoped names keep their `@` and only the scope separator is encoded, the
/// form the public registry documents.
pub(crate) fn escape_name(name: &str) -> String {
    match name.strip_prefix('@').and_then(|rest| rest.split_once('/')) {
        Some((scope, package)) => format!(
            "@{}%2f{}",
            urlencoding::encode(scope),
            urlencoding::encode(package)
        ),
        None => urlencoding::encode(name).into_owned(),
    }
}

impl RegistryClient {
    async fn fetch_npm_packument(&self, name: &str) -> Result<NpmPackument, RegistryError> {
        let url = format!("{}/{}", self.endpoints.registry_url, escape_name(name));
        tracing::debug!(package = name, %url, "fetching packument");
        let resp = self
            .http
            .get(&url)
            .header(reqwest::header::ACCEPT, FULL_METADATA)
            .send()
            .await?;
        let resp = check_response(resp, name).await?;
        resp.json()
            .await
            .map_err(|e| RegistryError::Parse(format!("packument for {name}: {e}")))
    }

    /// Publication metadata for `name`, full form.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the HTTP request fails, the registry
    /// returns a non-success status, or the response cannot be parsed.
    pub async fn fetch_packument(&self, name: &str) -> Result<Packument, RegistryError> {
        Ok(self.fetch_npm_packument(name).await?.publication_times())
    }

    /// Manifest of the version the `latest` dist-tag points at.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NoLatestVersion`] when the tag or its version
    /// entry is missing, otherwise as [`Self::fetch_packument`].
    pub async fn fetch_manifest(&self, name: &str) -> Result<PackageManifest, RegistryError> {
        self.fetch_npm_packument(name)
            .await?
            .into_latest_manifest(name)
    }

    /// Download count for the configured period.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the HTTP request fails, the API returns a
    /// non-success status, or the response cannot be parsed.
    pub async fn fetch_downloads(&self, name: &str) -> Result<u64, RegistryError> {
        let url = format!(
            "{}/point/{}/{name}",
            self.endpoints.downloads_url, self.endpoints.downloads_period
        );
        tracing::debug!(package = name, %url, "fetching download count");
        let resp = check_response(self.http.get(&url).send().await?, name).await?;
        let data: NpmDownloads = resp
            .json()
            .await
            .map_err(|e| RegistryError::Parse(format!("downloads for {name}: {e}")))?;
        Ok(data.downloads)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FIXTURE: &str = r#"{
        "name": "abbrev",
        "dist-tags": {"latest": "2.0.0", "next": "3.0.0-pre.1"},
        "versions": {
            "1.1.1": {"name": "abbrev", "version": "1.1.1", "license": "ISC"},
            "2.0.0": {
                "name": "abbrev",
                "version": "2.0.0",
                "license": "ISC",
                "engines": {"node": "^14.17.0 || ^16.13.0 || >=18.0.0"},
                "templateOSS": {"version": "4.5.1"},
                "dist": {"unpackedSize": 4827}
            }
        },
        "time": {
            "created": "2011-03-21T22:21:11.183Z",
            "modified": "2023-10-01T00:00:00.000Z",
            "1.1.1": "2017-09-28T18:12:48.303Z",
            "2.0.0": "2022-11-01T17:02:58.633Z"
        }
    }"#;

    #[test]
    fn latest_manifest_follows_dist_tag() {
        let packument: NpmPackument = serde_json::from_str(FIXTURE).unwrap();
        let manifest = packument.into_latest_manifest("abbrev").unwrap();
        assert_eq!(manifest.version.as_deref(), Some("2.0.0"));
        assert_eq!(manifest.template_version(), Some("4.5.1"));
        assert_eq!(manifest.unpacked_size(), Some(4827));
    }

    #[test]
    fn publication_times_skip_bookkeeping_keys() {
        let packument: NpmPackument = serde_json::from_str(FIXTURE).unwrap();
        let times = packument.publication_times();
        assert_eq!(times.time.len(), 2);
        assert_eq!(
            times.published_at("2.0.0").map(|t| t.to_rfc3339()),
            Some("2022-11-01T17:02:58.633+00:00".to_string())
        );
        assert!(times.published_at("created").is_none());
    }

    #[test]
    fn unpublished_object_is_ignored() {
        let packument: NpmPackument = serde_json::from_str(
            r#"{"time": {"unpublished": {"time": "2020-01-01T00:00:00.000Z"}}}"#,
        )
        .unwrap();
        assert!(packument.publication_times().time.is_empty());
    }

    #[test]
    fn missing_latest_tag_is_reported() {
        let packument: NpmPackument =
            serde_json::from_str(r#"{"dist-tags": {}, "versions": {}}"#).unwrap();
        let err = packument.into_latest_manifest("ghost").unwrap_err();
        assert!(matches!(err, RegistryError::NoLatestVersion(ref n) if n == "ghost"));
    }

    #[test]
    fn escapes_scoped_names() {
        assert_eq!(escape_name("@npmcli/arborist"), "@npmcli%2farborist");
        assert_eq!(escape_name("abbrev"), "abbrev");
    }
}
