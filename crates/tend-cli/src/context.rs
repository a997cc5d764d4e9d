use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tend_config::TendConfig;
use tend_github::GithubClient;
use tend_registry::{RegistryClient, RegistryEndpoints};
use tend_status::{Links, StatusBuilder};

pub fn load_config() -> anyhow::Result<TendConfig> {
    let config = TendConfig::load_with_dotenv().context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;
    if !config.github.is_configured() {
        tracing::warn!(
            "github.token is not set; unauthenticated requests are heavily rate limited"
        );
    }
    Ok(config)
}

/// Shared state for command handlers.
pub struct AppContext {
    pub builder: StatusBuilder,
    pub concurrency: usize,
}

impl AppContext {
    pub fn init(config: &TendConfig) -> anyhow::Result<Self> {
        let timeout = Duration::from_secs(config.general.timeout_secs);

        let github = GithubClient::new(&config.github.api_url, config.github.token(), timeout)
            .context("failed to build GitHub client")?;
        let registry = RegistryClient::new(
            RegistryEndpoints {
                registry_url: config.registry.url.clone(),
                downloads_url: config.registry.downloads_url.clone(),
                downloads_period: config.registry.downloads_period.clone(),
            },
            timeout,
        )
        .context("failed to build registry client")?;

        let builder = StatusBuilder::new(Arc::new(github), Arc::new(registry)).with_links(
            Links::new(&config.github.web_url, &config.registry.website_url),
        );

        Ok(Self {
            builder,
            concurrency: config.general.concurrency,
        })
    }
}
