//! Configuration validation.
//!
//! Serde handles the syntax; this pass checks the values. Every problem is
//! reported, not just the first, so a misconfigured deployment is fixed in one
//! round.

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::GatewayConfig;

/// A single semantic problem in a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing Airtable API key (set AIRTABLE_API_KEY)")]
    MissingApiKey,

    #[error("missing Airtable base id (set AIRTABLE_BASE_ID)")]
    MissingBaseId,

    #[error("table name must not be empty")]
    EmptyTableName,

    #[error("invalid bind address '{0}'")]
    InvalidBindAddress(String),

    #[error("invalid endpoint URL '{0}'")]
    InvalidEndpointUrl(String),

    #[error("page size {0} outside 1..=100")]
    InvalidPageSize(u32),
}

/// Check a configuration for semantic errors.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let airtable = &config.airtable;

    if airtable.api_key.trim().is_empty() {
        errors.push(ValidationError::MissingApiKey);
    }
    if airtable.base_id.trim().is_empty() {
        errors.push(ValidationError::MissingBaseId);
    }
    if airtable.table_name.trim().is_empty() {
        errors.push(ValidationError::EmptyTableName);
    }
    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }
    match url::Url::parse(&airtable.endpoint_url) {
        Ok(url) if !url.cannot_be_a_base() => {}
        _ => errors.push(ValidationError::InvalidEndpointUrl(
            airtable.endpoint_url.clone(),
        )),
    }
    if !(1..=100).contains(&airtable.page_size) {
        errors.push(ValidationError::InvalidPageSize(airtable.page_size));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
