//! Persistence gateway.
//!
//! This module saves and lists form documents against a document store:
//! - `FormStore`: the store seam, implemented over HTTP and in memory
//! - `Gateway`: turns store failures into logged outcome values

mod client;
mod error;
mod memory;

pub use client::HttpStore;
pub use error::StoreError;
pub use memory::MemoryStore;

use crate::form::FormDocument;
use log::*;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A document store that can insert and list form documents.
///
#[allow(async_fn_in_trait)]
pub trait FormStore {
    /// Insert a snapshot of the document, returning the id the store
    /// assigned. Never updates an earlier save.
    async fn insert(&self, doc: &FormDocument) -> Result<String, StoreError>;

    /// Return every saved document, unfiltered.
    async fn find_all(&self) -> Result<Vec<SavedForm>, StoreError>;
}

/// A form document as returned by the store.
///
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SavedForm {
    #[serde(rename = "_id", deserialize_with = "deserialize_object_id")]
    pub id: String,
    #[serde(rename = "savedAt", default)]
    pub saved_at: Option<String>,
    #[serde(flatten)]
    pub document: FormDocument,
}

/// Accept an id as a plain string, a number or an extended-JSON
/// `{"$oid": "..."}` object.
///
pub(crate) fn deserialize_object_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(id) => Ok(id),
        Value::Number(n) => Ok(n.to_string()),
        Value::Object(fields) => match fields.get("$oid") {
            Some(Value::String(id)) => Ok(id.clone()),
            _ => Err(serde::de::Error::custom("expected {\"$oid\": string}")),
        },
        other => Err(serde::de::Error::custom(format!(
            "unsupported id value: {}",
            other
        ))),
    }
}

/// Result of a save.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved { id: String },
    Failed { error: String },
}

impl SaveOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SaveOutcome::Saved { .. })
    }
}

/// Result of listing saved forms.
///
#[derive(Clone, Debug, PartialEq)]
pub enum ListOutcome {
    Listed { forms: Vec<SavedForm> },
    Failed { error: String },
}

impl ListOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ListOutcome::Listed { .. })
    }
}

/// Save/list front of a store. Failures are logged and returned as values,
/// never as errors.
///
pub struct Gateway<S> {
    store: S,
}

impl<S: FormStore> Gateway<S> {
    pub fn new(store: S) -> Self {
        Gateway { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Insert a snapshot of the document.
    ///
    pub async fn save(&self, doc: &FormDocument) -> SaveOutcome {
        debug!("Saving form '{}'...", doc.metadata.name);
        match self.store.insert(doc).await {
            Ok(id) => {
                info!("Form saved successfully: {}", id);
                SaveOutcome::Saved { id }
            }
            Err(e) => {
                error!("Failed to save form: {}", e);
                SaveOutcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    }

    /// Fetch every saved form.
    ///
    pub async fn list_all(&self) -> ListOutcome {
        debug!("Retrieving saved forms...");
        match self.store.find_all().await {
            Ok(forms) => {
                info!("Retrieved forms: {}", forms.len());
                ListOutcome::Listed { forms }
            }
            Err(e) => {
                error!("Failed to retrieve forms: {}", e);
                ListOutcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    }
}
