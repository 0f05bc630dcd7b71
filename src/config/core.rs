use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Json, Toml, Yaml};
use std::path::{Path, PathBuf};

use super::JobscopeConfig;
use super::smart_load;

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

const ENV_PREFIX: &str = "JOBSCOPE_";

/// Serialization formats for `config show`
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ConfigFormat {
    Toml,
    Json,
    #[value(alias = "yml")]
    Yaml,
}

impl JobscopeConfig {
    /// Load with the standard search path.
    pub fn load() -> Result<Self> {
        Self::load_with_custom_config(None)
    }

    /// Load configuration. A custom file replaces the user and repository
    /// layers; embedded defaults and environment variables always apply.
    pub fn load_with_custom_config(custom_config: Option<&Path>) -> Result<Self> {
        Self::figment(custom_config)
            .extract()
            .context("Invalid jobscope configuration")
    }

    pub fn figment(custom_config: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Toml::string(DEFAULT_CONFIG));

        if let Some(custom_path) = custom_config {
            if !custom_path.exists() {
                tracing::warn!(
                    "Config file {} not found, using defaults",
                    custom_path.display()
                );
            }
            figment = figment.merge(smart_load::auto(custom_path));
        } else {
            if let Some(user_dir) = Self::user_config_dir() {
                figment = figment
                    .merge(Toml::file(user_dir.join("config.toml")))
                    .merge(Json::file(user_dir.join("config.json")))
                    .merge(Yaml::file(user_dir.join("config.yaml")))
                    .merge(Yaml::file(user_dir.join("config.yml")));
            }
            figment = figment
                .merge(Toml::file("jobscope.toml"))
                .merge(Json::file("jobscope.json"))
                .merge(Yaml::file("jobscope.yaml"))
                .merge(Yaml::file("jobscope.yml"));
        }

        // Environment variables always have highest priority
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Render the configuration in `format`.
    pub fn export(&self, format: ConfigFormat) -> Result<String> {
        Ok(match format {
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Yaml => serde_yml::to_string(self)?,
        })
    }

    fn user_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("jobscope"))
    }
}
