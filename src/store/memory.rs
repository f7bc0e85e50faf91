use super::{FormStore, SavedForm, StoreError};
use crate::form::FormDocument;
use std::sync::Mutex;

/// In-process store, used offline and in tests.
///
#[derive(Default)]
pub struct MemoryStore {
    forms: Mutex<Vec<SavedForm>>,
    failure: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Return a store whose every call fails with the given message.
    ///
    pub fn failing(message: &str) -> Self {
        MemoryStore {
            forms: Mutex::new(Vec::new()),
            failure: Some(message.to_owned()),
        }
    }

    fn check(&self) -> Result<(), StoreError> {
        match &self.failure {
            Some(message) => Err(StoreError::Other(message.clone())),
            None => Ok(()),
        }
    }
}

impl FormStore for MemoryStore {
    async fn insert(&self, doc: &FormDocument) -> Result<String, StoreError> {
        self.check()?;
        let id = uuid::Uuid::new_v4().to_simple().to_string();
        let mut forms = self
            .forms
            .lock()
            .map_err(|e| StoreError::Other(e.to_string()))?;
        forms.push(SavedForm {
            id: id.clone(),
            saved_at: Some(chrono::Utc::now().to_rfc3339()),
            document: doc.snapshot(),
        });
        Ok(id)
    }

    async fn find_all(&self) -> Result<Vec<SavedForm>, StoreError> {
        self.check()?;
        let forms = self
            .forms
            .lock()
            .map_err(|e| StoreError::Other(e.to_string()))?;
        Ok(forms.clone())
    }
}
