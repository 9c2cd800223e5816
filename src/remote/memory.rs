//! In-process table.
//!
//! Behaves like the hosted store where the gateway can observe it: ids look
//! like `recXXXXXXXXXXXXXX`, insertion order is preserved, updates merge
//! fields, and unknown ids fail with the store's not-found message.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::remote::types::{Fields, Record, RemoteError, RemoteResult};
use crate::remote::RemoteTable;

const NOT_FOUND: &str = "Could not find what you are looking for";
const ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Table held in memory.
#[derive(Default)]
pub struct MemoryTable {
    records: Mutex<Vec<Record>>,
    failure: Mutex<Option<RemoteError>>,
}

impl MemoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following call fail with `err` until cleared.
    pub fn fail_with(&self, err: Option<RemoteError>) {
        *self.failure.lock().unwrap_or_else(|e| e.into_inner()) = err;
    }

    /// Current contents, in insertion order.
    pub fn snapshot(&self) -> Vec<Record> {
        self.records.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn check_failure(&self) -> RemoteResult<()> {
        match self.failure.lock().unwrap_or_else(|e| e.into_inner()).clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn generate_id() -> String {
    let mut id = String::from("rec");
    for _ in 0..14 {
        id.push(ID_ALPHABET[fastrand::usize(..ID_ALPHABET.len())] as char);
    }
    id
}

#[async_trait]
impl RemoteTable for MemoryTable {
    async fn list_all(&self) -> RemoteResult<Vec<Record>> {
        self.check_failure()?;
        Ok(self.snapshot())
    }

    async fn create(&self, fields: Fields) -> RemoteResult<Record> {
        self.check_failure()?;
        let record = Record {
            id: generate_id(),
            fields,
        };
        self.records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: &str, fields: Fields) -> RemoteResult<Record> {
        self.check_failure()?;
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| RemoteError::Message(NOT_FOUND.to_string()))?;
        record.fields.extend(fields);
        Ok(record.clone())
    }

    async fn delete(&self, id: &str) -> RemoteResult<()> {
        self.check_failure()?;
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        let index = records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| RemoteError::Message(NOT_FOUND.to_string()))?;
        records.remove(index);
        Ok(())
    }
}
