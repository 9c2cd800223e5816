//! Response shaping and the error envelope.
//!
//! Every failure leaves the gateway as `{"error": "<message>"}`. Remote
//! failures are all flattened to 500 regardless of what the store said. A
//! body the gateway could not read keeps the extractor's status (400, 413,
//! 415 or 422).

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::remote::{RemoteError, UNKNOWN_ERROR_MESSAGE};

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Errors a request handler can end with.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The remote call failed.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// The request body was rejected before reaching the table.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Remote(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Rejected { status, .. } => *status,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

/// Response used when a handler panicked.
pub fn unknown_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            error: UNKNOWN_ERROR_MESSAGE.to_string(),
        }),
    )
        .into_response()
}
