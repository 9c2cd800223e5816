//! Request handling.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) when the caller sent none
//! - Define the inbound record payload
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Field payloads are forwarded as-is; only their JSON shape is checked

use axum::http::{HeaderName, HeaderValue, Request};
use serde::Deserialize;
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::remote::Fields;

/// Header carrying the request ID in both directions.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Generates a fresh UUID v4 for every request lacking an ID.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let value = HeaderValue::from_str(&Uuid::new_v4().to_string()).ok()?;
        Some(RequestId::new(value))
    }
}

/// Body of create and update requests.
#[derive(Debug, Default, Deserialize)]
pub struct RecordPayload {
    /// Field values to write. A missing key writes nothing.
    #[serde(default)]
    pub fields: Fields,
}
