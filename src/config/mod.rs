//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! .env file (optional, never overrides the process environment)
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, apply env overrides)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → used once at startup to build the remote client and server
//! ```
//!
//! # Design Decisions
//! - Config is read once; there is no reload
//! - All fields have defaults except the two secrets
//! - A config that fails validation stops the process before it listens

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_config_with, ConfigError};
pub use schema::{AirtableConfig, CorsConfig, GatewayConfig, ListenerConfig, ObservabilityConfig};
pub use validation::ValidationError;
