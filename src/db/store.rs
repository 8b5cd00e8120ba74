// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory document store with typed operations.
//!
//! Each user owns a set of string-keyed JSON documents. Log collections are
//! JSON arrays that only ever grow; the profile is a single object.
//! Documents are decoded into typed models at this boundary, and anything
//! that fails to decode is reported instead of skipped.

use crate::error::AppError;
use dashmap::DashMap;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

/// Document store client.
///
/// Cloning is cheap and all clones share the same documents.
#[derive(Clone, Default)]
pub struct LogStore {
    documents: Arc<DashMap<String, String>>,
}

fn document_key(user_id: &str, collection: &str) -> String {
    format!("users/{}/{}", user_id, collection)
}

impl LogStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // ─── Raw Documents ───────────────────────────────────────────

    /// Get a raw JSON document.
    pub async fn get(&self, user_id: &str, collection: &str) -> Option<String> {
        self.documents
            .get(&document_key(user_id, collection))
            .map(|doc| doc.value().clone())
    }

    /// Replace a raw JSON document.
    pub async fn set(&self, user_id: &str, collection: &str, document: String) {
        self.documents
            .insert(document_key(user_id, collection), document);
    }

    // ─── Log Collections ─────────────────────────────────────────

    /// Read every entry of a log collection. Missing collections are empty.
    pub async fn read_all<T: DeserializeOwned>(
        &self,
        user_id: &str,
        collection: &str,
    ) -> Result<Vec<T>, AppError> {
        match self.get(user_id, collection).await {
            Some(doc) => serde_json::from_str(&doc).map_err(|e| {
                AppError::Database(format!("Failed to decode {}: {}", collection, e))
            }),
            None => Ok(Vec::new()),
        }
    }

    /// Append one entry to a log collection.
    ///
    /// The read-modify-write happens under the document's map entry lock,
    /// so concurrent appends to the same collection are never lost.
    /// Returns the collection length after the append.
    ///
    /// Each append decodes and re-encodes the whole collection, so its cost
    /// grows linearly with the collection's length.
    pub async fn append<T: Serialize>(
        &self,
        user_id: &str,
        collection: &str,
        entry: &T,
    ) -> Result<usize, AppError> {
        let value = serde_json::to_value(entry)
            .map_err(|e| AppError::Database(format!("Failed to encode entry: {}", e)))?;

        let mut doc = self
            .documents
            .entry(document_key(user_id, collection))
            .or_insert_with(|| "[]".to_string());

        let mut entries: Vec<serde_json::Value> = serde_json::from_str(doc.value())
            .map_err(|e| AppError::Database(format!("Failed to decode {}: {}", collection, e)))?;
        entries.push(value);

        *doc = serde_json::to_string(&entries)
            .map_err(|e| AppError::Database(format!("Failed to encode {}: {}", collection, e)))?;

        Ok(entries.len())
    }

    // ─── Single Documents ────────────────────────────────────────

    /// Read a single typed document.
    pub async fn read_doc<T: DeserializeOwned>(
        &self,
        user_id: &str,
        collection: &str,
    ) -> Result<Option<T>, AppError> {
        self.get(user_id, collection)
            .await
            .map(|doc| {
                serde_json::from_str(&doc).map_err(|e| {
                    AppError::Database(format!("Failed to decode {}: {}", collection, e))
                })
            })
            .transpose()
    }

    /// Write a single typed document, replacing any previous one.
    pub async fn write_doc<T: Serialize>(
        &self,
        user_id: &str,
        collection: &str,
        document: &T,
    ) -> Result<(), AppError> {
        let json = serde_json::to_string(document)
            .map_err(|e| AppError::Database(format!("Failed to encode {}: {}", collection, e)))?;
        self.set(user_id, collection, json).await;
        Ok(())
    }
}
