//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the record gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Remote table the gateway is bound to.
    pub airtable: AirtableConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Cross-origin access settings.
    pub cors: CorsConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3001").
    pub bind_address: String,

    /// Maximum accepted request body in bytes.
    pub max_body_bytes: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3001".to_string(),
            max_body_bytes: 1024 * 1024,
        }
    }
}

/// Remote table connection settings.
///
/// `api_key` and `base_id` have no usable default and must be supplied by the
/// config file or the environment.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AirtableConfig {
    /// Personal access token sent as a bearer token.
    pub api_key: String,

    /// Base identifier (e.g., "appXXXXXXXXXXXXXX").
    pub base_id: String,

    /// Table name or id within the base.
    pub table_name: String,

    /// API root, without the version segment.
    pub endpoint_url: String,

    /// Per-call timeout applied by the remote client, in seconds.
    pub request_timeout_secs: u64,

    /// Records requested per page when listing (1..=100).
    pub page_size: u32,
}

impl Default for AirtableConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_id: String::new(),
            table_name: "questions table".to_string(),
            endpoint_url: "https://api.airtable.com".to_string(),
            request_timeout_secs: 300,
            page_size: 100,
        }
    }
}

// Hand-written so the API key never lands in logs.
impl std::fmt::Debug for AirtableConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AirtableConfig")
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("base_id", &self.base_id)
            .field("table_name", &self.table_name)
            .field("endpoint_url", &self.endpoint_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("page_size", &self.page_size)
            .finish()
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit a span and completion event for every request.
    pub request_logging: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            request_logging: true,
        }
    }
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Allowed origins. Empty allows any origin.
    pub allowed_origins: Vec<String>,

    /// Preflight cache lifetime in seconds.
    pub max_age_secs: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            max_age_secs: 60 * 60,
        }
    }
}
