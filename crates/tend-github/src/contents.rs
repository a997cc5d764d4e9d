//! `package.json` read straight from the repository.

use tend_core::sources::PackageManifest;

use crate::{GithubClient, error::GithubError, http::check_response};

/// Media type that returns the file body instead of the JSON envelope.
const RAW: &str = "application/vnd.github.raw+json";

/// Repository-relative location of the manifest for `path`.
fn manifest_path(path: Option<&str>) -> String {
    let dir = path.map(|p| p.trim_matches('/')).filter(|p| !p.is_empty());
    let file = match dir {
        Some(dir) => format!("{dir}/package.json"),
        None => "package.json".to_string(),
    };
    file.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

impl GithubClient {
    /// `package.json` at `path` (or the repository root); `None` when the
    /// file does not exist.
    ///
    /// # Errors
    ///
    /// Returns any transport or non-404 status error, or
    /// [`GithubError::Parse`] when the file is not a valid manifest.
    pub async fn package_json(
        &self,
        owner: &str,
        name: &str,
        path: Option<&str>,
    ) -> Result<Option<PackageManifest>, GithubError> {
        let file = manifest_path(path);
        let resource = format!("{owner}/{name}/{file}");
        let url = format!("{}/contents/{file}", self.repo_url(owner, name));
        tracing::debug!(%resource, "fetching package.json");

        let resp = self
            .get(&url)
            .header(reqwest::header::ACCEPT, RAW)
            .send()
            .await?;
        let resp = match check_response(resp, &resource).await {
            Ok(resp) => resp,
            Err(GithubError::NotFound { .. }) => {
                tracing::debug!(%resource, "no package.json");
                return Ok(None);
            }
            Err(other) => return Err(other),
        };
        let body = resp.text().await?;
        serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| GithubError::Parse(format!("{resource}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn manifest_path_for_root_and_workspaces() {
        assert_eq!(manifest_path(None), "package.json");
        assert_eq!(manifest_path(Some("")), "package.json");
        assert_eq!(
            manifest_path(Some("workspaces/arborist/")),
            "workspaces/arborist/package.json"
        );
        assert_eq!(manifest_path(Some("odd dir")), "odd%20dir/package.json");
    }
}
