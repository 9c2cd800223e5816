//! Record model and error definitions for the remote table.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Field values of a record, keyed by field name.
pub type Fields = Map<String, Value>;

/// Message returned for failures that carry no description.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred";

/// One row of the remote table.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Record {
    /// Store-assigned identifier, immutable once created.
    pub id: String,

    /// Field values. Empty fields are omitted by the store.
    #[serde(default)]
    pub fields: Fields,
}

impl Record {
    /// Flatten into `{ "id": ..., ...fields }`.
    ///
    /// Fields are spread over the id, so a column literally named `id`
    /// replaces the store id's value while keeping the first position.
    pub fn into_flat(self) -> Value {
        let mut flat = Map::with_capacity(self.fields.len() + 1);
        flat.insert("id".to_string(), Value::String(self.id));
        flat.extend(self.fields);
        Value::Object(flat)
    }
}

/// Errors that can occur during remote table operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// The store (or the transport to it) reported a failure with a message.
    #[error("{0}")]
    Message(String),

    /// The failure carried nothing describable.
    #[error("An unknown error occurred")]
    Unknown,
}

impl RemoteError {
    /// Wrap a message, falling back to [`RemoteError::Unknown`] when blank.
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            Self::Unknown
        } else {
            Self::Message(message)
        }
    }
}

/// Result type for remote table operations.
pub type RemoteResult<T> = Result<T, RemoteError>;
