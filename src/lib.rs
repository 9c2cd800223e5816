//! Record Gateway Library
//!
//! A thin HTTP proxy exposing list/create/update/delete over one Airtable
//! table, reshaping every record into a flat `{ id, ...fields }` object.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod remote;

pub use config::schema::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use remote::{AirtableClient, MemoryTable, RemoteTable};
