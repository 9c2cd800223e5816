//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, Query, State},
    http::{header::AUTHORIZATION, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, patch},
    Json, Router,
};
use record_gateway::{GatewayConfig, HttpServer, RemoteTable, Shutdown};
use serde_json::{json, Map, Value};
use tokio::net::TcpListener;

pub const API_KEY: &str = "patTestKey";
pub const BASE_ID: &str = "appTestBase";
pub const TABLE: &str = "questions table";

/// Gateway config with valid secrets and quiet request logging.
pub fn test_config() -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.airtable.api_key = API_KEY.into();
    config.airtable.base_id = BASE_ID.into();
    config.airtable.table_name = TABLE.into();
    config.observability.request_logging = false;
    config
}

/// Start a gateway on an ephemeral port. Returns its base URL and the
/// coordinator that stops it.
pub async fn start_gateway(config: GatewayConfig, table: Arc<dyn RemoteTable>) -> (String, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config, table);
    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    (format!("http://{}", addr), shutdown)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// Minimal stand-in for the Airtable record API.
#[derive(Clone, Default)]
pub struct MockAirtable {
    records: Arc<Mutex<Vec<(String, Map<String, Value>)>>>,
    requests: Arc<Mutex<Vec<String>>>,
    next_id: Arc<AtomicU32>,
}

impl MockAirtable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `count` records with an `Index` field.
    pub fn seed(&self, count: usize) {
        let mut records = self.records.lock().unwrap();
        for i in 0..count {
            let fields = json!({ "Index": i }).as_object().cloned().unwrap();
            records.push((format!("recSeed{:010}", i), fields));
        }
    }

    /// `METHOD path?query` of every request received so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub async fn start(&self) -> SocketAddr {
        let app = Router::new()
            .route("/v0/{base}/{table}", get(list).post(create))
            .route("/v0/{base}/{table}/{id}", patch(update).delete(destroy))
            .with_state(self.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    fn log(&self, method: &Method, uri: &Uri) {
        self.requests
            .lock()
            .unwrap()
            .push(format!("{} {}", method, uri));
    }
}

fn record_json(id: &str, fields: &Map<String, Value>) -> Value {
    json!({ "id": id, "createdTime": "2024-01-01T00:00:00.000Z", "fields": fields })
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "NOT_FOUND" }))).into_response()
}

fn check_access(headers: &HeaderMap, base: &str, table: &str) -> Result<(), Response> {
    let expected = format!("Bearer {}", API_KEY);
    let authorized = headers
        .get(AUTHORIZATION)
        .map(|v| v.as_bytes() == expected.as_bytes())
        .unwrap_or(false);
    if !authorized {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": { "type": "AUTHENTICATION_REQUIRED", "message": "Authentication required" }
            })),
        )
            .into_response());
    }
    if base != BASE_ID || table != TABLE {
        return Err((
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": {
                    "type": "TABLE_NOT_FOUND",
                    "message": format!("Could not find table {} in application {}", table, base)
                }
            })),
        )
            .into_response());
    }
    Ok(())
}

async fn list(
    State(mock): State<MockAirtable>,
    Path((base, table)): Path<(String, String)>,
    Query(query): Query<HashMap<String, String>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    mock.log(&method, &uri);
    if let Err(resp) = check_access(&headers, &base, &table) {
        return resp;
    }

    let page_size: usize = query.get("pageSize").and_then(|v| v.parse().ok()).unwrap_or(100);
    let start: usize = query.get("offset").and_then(|v| v.parse().ok()).unwrap_or(0);

    let records = mock.records.lock().unwrap();
    let end = (start + page_size).min(records.len());
    let page: Vec<Value> = records[start.min(end)..end]
        .iter()
        .map(|(id, fields)| record_json(id, fields))
        .collect();

    let mut body = json!({ "records": page });
    if end < records.len() {
        body["offset"] = json!(end.to_string());
    }
    Json(body).into_response()
}

async fn create(
    State(mock): State<MockAirtable>,
    Path((base, table)): Path<(String, String)>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    mock.log(&method, &uri);
    if let Err(resp) = check_access(&headers, &base, &table) {
        return resp;
    }

    let Some(fields) = body.get("fields").and_then(Value::as_object).cloned() else {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "error": {
                    "type": "INVALID_REQUEST_MISSING_FIELDS",
                    "message": "Could not find field \"fields\" in the request body"
                }
            })),
        )
            .into_response();
    };

    let id = format!("recMock{:010}", mock.next_id.fetch_add(1, Ordering::SeqCst));
    mock.records.lock().unwrap().push((id.clone(), fields.clone()));
    Json(record_json(&id, &fields)).into_response()
}

async fn update(
    State(mock): State<MockAirtable>,
    Path((base, table, id)): Path<(String, String, String)>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    mock.log(&method, &uri);
    if let Err(resp) = check_access(&headers, &base, &table) {
        return resp;
    }

    let delta = body
        .get("fields")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();

    let mut records = mock.records.lock().unwrap();
    match records.iter_mut().find(|(rid, _)| *rid == id) {
        Some((rid, fields)) => {
            fields.extend(delta);
            Json(record_json(rid, fields)).into_response()
        }
        None => not_found(),
    }
}

async fn destroy(
    State(mock): State<MockAirtable>,
    Path((base, table, id)): Path<(String, String, String)>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    mock.log(&method, &uri);
    if let Err(resp) = check_access(&headers, &base, &table) {
        return resp;
    }

    let mut records = mock.records.lock().unwrap();
    match records.iter().position(|(rid, _)| *rid == id) {
        Some(index) => {
            records.remove(index);
            Json(json!({ "id": id, "deleted": true })).into_response()
        }
        None => not_found(),
    }
}
