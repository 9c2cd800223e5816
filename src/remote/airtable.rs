//! Airtable REST client.
//!
//! # Responsibilities
//! - Authenticate with a bearer token
//! - List a table, following the `offset` cursor until exhausted
//! - Create, update (PATCH, merge) and delete single records
//! - Turn error responses into a human-readable `RemoteError`

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::AirtableConfig;
use crate::remote::types::{Fields, Record, RemoteError, RemoteResult};
use crate::remote::RemoteTable;

/// Client bound to one table of one base.
#[derive(Clone)]
pub struct AirtableClient {
    http: Client,
    table_url: Url,
    api_key: String,
    page_size: u32,
}

#[derive(Deserialize)]
struct ListPage {
    records: Vec<Record>,
    offset: Option<String>,
}

#[derive(Serialize)]
struct FieldsBody<'a> {
    fields: &'a Fields,
}

#[derive(Deserialize)]
struct DeletedRecord {
    #[allow(dead_code)]
    id: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Detailed {
        #[serde(rename = "type")]
        kind: Option<String>,
        message: Option<String>,
    },
    Code(String),
}

impl AirtableClient {
    /// Create a new client from validated configuration.
    pub fn new(config: &AirtableConfig) -> RemoteResult<Self> {
        let mut table_url = Url::parse(&config.endpoint_url).map_err(|e| {
            RemoteError::Message(format!("Invalid endpoint URL '{}': {}", config.endpoint_url, e))
        })?;
        table_url
            .path_segments_mut()
            .map_err(|_| {
                RemoteError::Message(format!(
                    "Endpoint URL '{}' cannot carry a path",
                    config.endpoint_url
                ))
            })?
            .pop_if_empty()
            .extend(["v0", config.base_id.as_str(), config.table_name.as_str()]);

        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("record-gateway/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RemoteError::from_message(e.to_string()))?;

        tracing::info!(
            base_id = %config.base_id,
            table = %config.table_name,
            "Airtable client initialized"
        );

        Ok(Self {
            http,
            table_url,
            api_key: config.api_key.clone(),
            page_size: config.page_size,
        })
    }

    /// URL of the bound table.
    pub fn table_url(&self) -> &Url {
        &self.table_url
    }

    fn record_url(&self, id: &str) -> Url {
        let mut url = self.table_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(id);
        }
        url
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> RemoteResult<T> {
        let response = request
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status.is_success() {
            return response.json::<T>().await.map_err(transport_error);
        }

        let body = response.text().await.unwrap_or_default();
        let err = decode_error(status, &body);
        tracing::debug!(status = %status, error = %err, "Airtable returned an error");
        Err(err)
    }
}

#[async_trait]
impl RemoteTable for AirtableClient {
    async fn list_all(&self) -> RemoteResult<Vec<Record>> {
        let mut records = Vec::new();
        let mut offset: Option<String> = None;
        let page_size = self.page_size.to_string();

        loop {
            let mut request = self
                .http
                .get(self.table_url.clone())
                .query(&[("pageSize", page_size.as_str())]);
            if let Some(cursor) = &offset {
                request = request.query(&[("offset", cursor.as_str())]);
            }

            let page: ListPage = self.send(request).await?;
            records.extend(page.records);

            match page.offset {
                Some(next) => offset = Some(next),
                None => break,
            }
        }

        tracing::debug!(count = records.len(), "Fetched all records");
        Ok(records)
    }

    async fn create(&self, fields: Fields) -> RemoteResult<Record> {
        let request = self
            .http
            .post(self.table_url.clone())
            .json(&FieldsBody { fields: &fields });
        self.send(request).await
    }

    async fn update(&self, id: &str, fields: Fields) -> RemoteResult<Record> {
        let request = self
            .http
            .patch(self.record_url(id))
            .json(&FieldsBody { fields: &fields });
        self.send(request).await
    }

    async fn delete(&self, id: &str) -> RemoteResult<()> {
        let _: DeletedRecord = self.send(self.http.delete(self.record_url(id))).await?;
        Ok(())
    }
}

fn transport_error(err: reqwest::Error) -> RemoteError {
    RemoteError::from_message(err.to_string())
}

/// Decode an error response into the message the store meant to convey.
///
/// A detailed `{"error": {"message": ...}}` body wins, then the canonical
/// message for the status, then the bare error code.
fn decode_error(status: StatusCode, body: &str) -> RemoteError {
    let (message, code) = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(ErrorEnvelope {
            error: ErrorBody::Detailed { kind, message },
        }) => (message, kind),
        Ok(ErrorEnvelope {
            error: ErrorBody::Code(code),
        }) => (None, Some(code)),
        Err(_) => (None, None),
    };

    if let Some(message) = message.filter(|m| !m.trim().is_empty()) {
        return RemoteError::Message(message);
    }
    if let Some(message) = canonical_message(status) {
        return RemoteError::Message(message.to_string());
    }
    match code {
        Some(code) => RemoteError::from_message(code),
        None => RemoteError::Unknown,
    }
}

fn canonical_message(status: StatusCode) -> Option<&'static str> {
    let message = match status.as_u16() {
        401 => "You should provide valid api key to perform this operation",
        403 => "You are not allowed to perform this operation",
        404 => "Could not find what you are looking for",
        413 => "Request body is too large",
        422 => "The operation cannot be processed",
        429 => "You have made too many requests in a short period of time. Please retry your request later",
        503 => "The service is temporarily unavailable. Please retry shortly.",
        500..=599 => "Try again. If the problem persists, contact support.",
        _ => return None,
    };
    Some(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(endpoint: &str) -> AirtableConfig {
        AirtableConfig {
            api_key: "patKey".into(),
            base_id: "appBase".into(),
            table_name: "questions table".into(),
            endpoint_url: endpoint.into(),
            ..AirtableConfig::default()
        }
    }

    #[test]
    fn test_table_url_encodes_table_name() {
        let client = AirtableClient::new(&config("https://api.airtable.com")).unwrap();
        assert_eq!(
            client.table_url().as_str(),
            "https://api.airtable.com/v0/appBase/questions%20table"
        );
    }

    #[test]
    fn test_table_url_keeps_endpoint_prefix() {
        let client = AirtableClient::new(&config("http://127.0.0.1:9999/mock/")).unwrap();
        assert_eq!(
            client.table_url().as_str(),
            "http://127.0.0.1:9999/mock/v0/appBase/questions%20table"
        );
    }

    #[test]
    fn test_record_url_escapes_id() {
        let client = AirtableClient::new(&config("https://api.airtable.com")).unwrap();
        assert!(client.record_url("rec/../x").as_str().ends_with("/rec%2F..%2Fx"));
    }

    #[test]
    fn test_rejects_non_base_endpoint() {
        assert!(AirtableClient::new(&config("mailto:ops@example.com")).is_err());
    }

    #[test]
    fn test_detailed_error_message_wins() {
        let err = decode_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"error":{"type":"INVALID_VALUE_FOR_COLUMN","message":"Field \"Done\" cannot accept the provided value"}}"#,
        );
        assert_eq!(
            err,
            RemoteError::Message("Field \"Done\" cannot accept the provided value".into())
        );
    }

    #[test]
    fn test_bare_code_uses_canonical_message() {
        let err = decode_error(StatusCode::NOT_FOUND, r#"{"error":"NOT_FOUND"}"#);
        assert_eq!(err.to_string(), "Could not find what you are looking for");

        let err = decode_error(StatusCode::UNAUTHORIZED, "");
        assert_eq!(
            err.to_string(),
            "You should provide valid api key to perform this operation"
        );
    }

    #[test]
    fn test_type_without_message_on_unmapped_status() {
        let err = decode_error(
            StatusCode::BAD_REQUEST,
            r#"{"error":{"type":"INVALID_REQUEST_UNKNOWN"}}"#,
        );
        assert_eq!(err, RemoteError::Message("INVALID_REQUEST_UNKNOWN".into()));
    }

    #[test]
    fn test_bare_code_on_unmapped_status() {
        let err = decode_error(StatusCode::CONFLICT, r#"{"error":"ROW_LOCKED"}"#);
        assert_eq!(err, RemoteError::Message("ROW_LOCKED".into()));
    }

    #[test]
    fn test_undescribed_failure_is_unknown() {
        assert_eq!(decode_error(StatusCode::BAD_REQUEST, "<html></html>"), RemoteError::Unknown);
        assert_eq!(decode_error(StatusCode::CONFLICT, ""), RemoteError::Unknown);
    }
}
