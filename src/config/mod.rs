use anyhow::Context;
use config::{Config, FileFormat};
use serde::Deserialize;
use std::sync::LazyLock;

static CONFIG: LazyLock<AppConfig> =
    LazyLock::new(|| AppConfig::load().expect("Failed to initialize config"));

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Base URL of the school backend, without a trailing slash.
    pub api_base_url: String,

    pub timeout_secs: u64,

    /// Upper bound on in-flight requests during bulk workflows.
    pub concurrency: usize,
    pub delay_ms: u64,

    /// Term the configuration screens operate on ("1", "2" or "3").
    pub current_term: String,
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        Config::builder()
            .add_source(
                config::File::with_name("application")
                    .format(FileFormat::Yaml)
                    .required(true),
            )
            .add_source(config::Environment::with_prefix("APP").try_parsing(true))
            .build()
            .with_context(|| anyhow::anyhow!("Failed to load config"))?
            .try_deserialize()
            .with_context(|| anyhow::anyhow!("Failed to deserialize config"))
    }
}

pub fn get() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config() {
        let config = AppConfig::load().expect("Failed to load config");
        assert!(!config.api_base_url.is_empty());
        assert!(config.concurrency >= 1);
    }
}
