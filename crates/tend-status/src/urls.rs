//! Display URLs derived from the descriptor and the repository.

/// Web hosts the links point at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Links {
    /// Repository host, e.g. `https://github.com`.
    pub repo_host: String,
    /// Package website, e.g. `https://www.npmjs.com`.
    pub package_site: String,
}

impl Default for Links {
    fn default() -> Self {
        Self {
            repo_host: "https://github.com".to_string(),
            package_site: "https://www.npmjs.com".to_string(),
        }
    }
}

impl Links {
    #[must_use]
    pub fn new(repo_host: impl Into<String>, package_site: impl Into<String>) -> Self {
        Self {
            repo_host: trim_slash(repo_host.into()),
            package_site: trim_slash(package_site.into()),
        }
    }

    /// Repository and display URLs for one project.
    ///
    /// `default_branch` is only read when `path` is set.
    #[must_use]
    pub fn repo(
        &self,
        owner: &str,
        name: &str,
        path: Option<&str>,
        default_branch: &str,
    ) -> RepoUrls {
        let repo = format!("{}/{owner}/{name}", self.repo_host);
        let full = match path {
            Some(path) => format!("{repo}/tree/{default_branch}/{path}"),
            None => repo.clone(),
        };
        RepoUrls { repo, full }
    }

    /// Package page for a published manifest name.
    #[must_use]
    pub fn package(&self, name: &str) -> String {
        format!("{}/package/{name}", self.package_site)
    }
}

fn trim_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoUrls {
    /// `host/owner/name`.
    pub repo: String,
    /// `repo`, scoped to the workspace directory when there is one.
    pub full: String,
}

impl RepoUrls {
    #[must_use]
    pub fn stargazers(&self) -> String {
        format!("{}/stargazers", self.repo)
    }

    /// Fallback CI link when the status lookup has none.
    #[must_use]
    pub fn actions(&self) -> String {
        format!("{}/actions", self.repo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn top_level_full_url_is_repo_url() {
        let urls = Links::default().repo("npm", "cli", None, "latest");
        assert_eq!(urls.repo, "https://github.com/npm/cli");
        assert_eq!(urls.full, urls.repo);
        assert_eq!(urls.stargazers(), "https://github.com/npm/cli/stargazers");
        assert_eq!(urls.actions(), "https://github.com/npm/cli/actions");
    }

    #[test]
    fn workspace_url_points_into_default_branch() {
        let urls = Links::default().repo("npm", "cli", Some("workspaces/arborist"), "latest");
        assert_eq!(
            urls.full,
            "https://github.com/npm/cli/tree/latest/workspaces/arborist"
        );
        assert_eq!(urls.repo, "https://github.com/npm/cli");
    }

    #[test]
    fn workspace_path_is_appended_as_given() {
        let urls = Links::default().repo("npm", "cli", Some("workspaces/arborist/"), "latest");
        assert!(urls.full.ends_with("/tree/latest/workspaces/arborist/"));
    }

    #[test]
    fn custom_hosts_drop_trailing_slash() {
        let links = Links::new("https://git.example.com/", "https://pkgs.example.com/");
        assert_eq!(
            links.repo("o", "r", None, "main").repo,
            "https://git.example.com/o/r"
        );
        assert_eq!(
            links.package("@npmcli/arborist"),
            "https://pkgs.example.com/package/@npmcli/arborist"
        );
    }
}
