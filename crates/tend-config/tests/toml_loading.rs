//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;
use tend_config::TendConfig;

#[test]
fn loads_github_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[github]
api_url = "https://ghe.example.com/api/v3"
web_url = "https://ghe.example.com"
token = "ghp_test"
"#,
        )?;

        let config: TendConfig = Figment::from(Serialized::defaults(TendConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.github.api_url, "https://ghe.example.com/api/v3");
        assert_eq!(config.github.web_url, "https://ghe.example.com");
        assert_eq!(config.github.token(), Some("ghp_test"));
        assert!(config.github.is_configured());
        Ok(())
    });
}

#[test]
fn partial_registry_section_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[registry]
downloads_period = "last-month"
"#,
        )?;

        let config: TendConfig = Figment::from(Serialized::defaults(TendConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.registry.downloads_period, "last-month");
        assert_eq!(config.registry.url, "https://registry.npmjs.org");
        assert_eq!(config.registry.website_url, "https://www.npmjs.com");
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[general]
concurrency = 2
timeout_secs = 5
"#,
        )?;
        jail.set_env("TEND_GENERAL__CONCURRENCY", "16");

        let config: TendConfig = Figment::from(Serialized::defaults(TendConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("TEND_").split("__"))
            .extract()?;

        assert_eq!(config.general.concurrency, 16);
        assert_eq!(config.general.timeout_secs, 5);
        Ok(())
    });
}

#[test]
fn project_local_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".tend")?;
        jail.create_file(
            ".tend/config.toml",
            r#"
[github]
token = "from-project"
"#,
        )?;

        let config = TendConfig::load().expect("config loads");
        assert_eq!(config.github.token, "from-project");
        Ok(())
    });
}

#[test]
fn wrong_type_is_a_figment_error() {
    Jail::expect_with(|jail| {
        jail.set_env("TEND_GENERAL__CONCURRENCY", "lots");
        let result = TendConfig::load();
        assert!(matches!(result, Err(tend_config::ConfigError::Figment(_))));
        Ok(())
    });
}
