//! Remote table subsystem.
//!
//! # Data Flow
//! ```text
//! Environment / config (API key, base id, table name)
//!     → airtable.rs (REST client, pagination, error decoding)
//!     → RemoteTable trait object shared by every request handler
//!
//! Tests:
//!     memory.rs (in-process table with store-like ids and errors)
//! ```
//!
//! # Design Decisions
//! - One trait at the seam so handlers never see HTTP details of the store
//! - Every call is a single attempt; failures flow back as `RemoteError`
//! - The client is read-only after construction and shared through `Arc`

pub mod airtable;
pub mod memory;
pub mod types;

use async_trait::async_trait;

pub use airtable::AirtableClient;
pub use memory::MemoryTable;
pub use types::{Fields, Record, RemoteError, RemoteResult, UNKNOWN_ERROR_MESSAGE};

/// Operations offered by the table the gateway is bound to.
#[async_trait]
pub trait RemoteTable: Send + Sync {
    /// Fetch every record, following pagination to the end.
    async fn list_all(&self) -> RemoteResult<Vec<Record>>;

    /// Create one record and return it as stored.
    async fn create(&self, fields: Fields) -> RemoteResult<Record>;

    /// Update the given fields of a record and return the result.
    async fn update(&self, id: &str, fields: Fields) -> RemoteResult<Record>;

    /// Destroy a record.
    async fn delete(&self, id: &str) -> RemoteResult<()>;
}
