//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load, override and validate the configuration.
///
/// A `.env` file in the working directory is read first; variables already
/// present in the process environment win over it.
pub fn load_config(path: Option<&Path>) -> Result<GatewayConfig, ConfigError> {
    if let Ok(env_file) = dotenvy::dotenv() {
        tracing::debug!(path = ?env_file, "Loaded .env file");
    }
    load_config_with(path, |key| std::env::var(key).ok())
}

/// Same as [`load_config`] with an explicit variable lookup.
pub fn load_config_with<F>(path: Option<&Path>, lookup: F) -> Result<GatewayConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => GatewayConfig::default(),
    };

    apply_env_overrides(&mut config, lookup);
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

fn apply_env_overrides<F>(config: &mut GatewayConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

    if let Some(v) = var("AIRTABLE_API_KEY") {
        config.airtable.api_key = v;
    }
    if let Some(v) = var("AIRTABLE_BASE_ID") {
        config.airtable.base_id = v;
    }
    if let Some(v) = var("AIRTABLE_TABLE_NAME") {
        config.airtable.table_name = v;
    }
    if let Some(v) = var("AIRTABLE_ENDPOINT_URL") {
        config.airtable.endpoint_url = v;
    }
    if let Some(v) = var("GATEWAY_BIND_ADDRESS") {
        config.listener.bind_address = v;
    }
    if let Some(v) = var("GATEWAY_LOG_LEVEL") {
        config.observability.log_level = v;
    }
}
