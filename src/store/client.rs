//! HTTP client for the document store.
//!
//! The store speaks a MongoDB Data API style protocol: every operation is a
//! `POST {base}/action/{name}` whose JSON body names the data source,
//! database and collection.

use super::{FormStore, SavedForm, StoreError};
use crate::config::StoreSettings;
use crate::form::FormDocument;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

/// Makes requests to the document store and conforms responses to models.
///
pub struct HttpStore {
    base_url: String,
    api_key: Option<String>,
    data_source: String,
    database: String,
    collection: String,
    http_client: reqwest::Client,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InsertOneResponse {
    #[serde(deserialize_with = "super::deserialize_object_id")]
    inserted_id: String,
}

#[derive(Deserialize)]
struct FindResponse {
    #[serde(default)]
    documents: Vec<SavedForm>,
}

impl HttpStore {
    /// Returns a new instance for the given store settings.
    ///
    pub fn new(settings: &StoreSettings) -> Result<Self, StoreError> {
        let base_url = settings
            .base_url
            .as_deref()
            .map(|url| url.trim_end_matches('/').to_owned())
            .filter(|url| !url.is_empty())
            .ok_or(StoreError::NotConfigured)?;
        Ok(HttpStore {
            base_url,
            api_key: settings.api_key.clone(),
            data_source: settings.data_source.clone(),
            database: settings.database.clone(),
            collection: settings.collection.clone(),
            http_client: reqwest::Client::builder().build()?,
        })
    }

    /// Body fields shared by every action.
    ///
    fn namespace(&self) -> serde_json::Map<String, Value> {
        let mut body = serde_json::Map::new();
        body.insert("dataSource".into(), Value::String(self.data_source.clone()));
        body.insert("database".into(), Value::String(self.database.clone()));
        body.insert("collection".into(), Value::String(self.collection.clone()));
        body
    }

    /// Make request for the named action and conform the response to `T`.
    ///
    async fn action<T: DeserializeOwned>(
        &self,
        action: &str,
        extra: Vec<(&str, Value)>,
    ) -> Result<T, StoreError> {
        let mut body = self.namespace();
        for (key, value) in extra {
            body.insert(key.to_owned(), value);
        }

        let url = format!("{}/action/{}", self.base_url, action);
        let mut request = self.http_client.post(&url).json(&Value::Object(body));
        if let Some(api_key) = &self.api_key {
            request = request.header("api-key", api_key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("Unable to read response"));
            log::error!("Store action '{}' failed with status {}: {}", action, status, message);
            return Err(StoreError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice::<T>(&bytes)?)
    }
}

impl FormStore for HttpStore {
    async fn insert(&self, doc: &FormDocument) -> Result<String, StoreError> {
        let mut document = serde_json::to_value(doc)?;
        if let Value::Object(fields) = &mut document {
            fields.insert(
                "savedAt".into(),
                Value::String(chrono::Utc::now().to_rfc3339()),
            );
        }
        let response: InsertOneResponse = self
            .action("insertOne", vec![("document", document)])
            .await?;
        Ok(response.inserted_id)
    }

    async fn find_all(&self) -> Result<Vec<SavedForm>, StoreError> {
        let response: FindResponse = self.action("find", vec![("filter", json!({}))]).await?;
        Ok(response.documents)
    }
}
