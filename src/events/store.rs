use crate::form::FormDocument;
use crate::state::{Designer, RequestKind};
use crate::store::{FormStore, Gateway, SaveOutcome};
use anyhow::Result;
use log::*;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Specify different store event types.
///
#[derive(Debug, Clone)]
pub enum Event {
    Save(FormDocument),
    ListAll,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Save(doc) => write!(f, "Save({})", doc.metadata.name),
            Event::ListAll => write!(f, "ListAll"),
        }
    }
}

/// Specify struct for managing state with store events.
///
pub struct Handler<'a, S> {
    state: &'a Arc<Mutex<Designer>>,
    gateway: &'a Gateway<S>,
}

impl<'a, S: FormStore> Handler<'a, S> {
    /// Return new instance with reference to state.
    ///
    pub fn new(state: &'a Arc<Mutex<Designer>>, gateway: &'a Gateway<S>) -> Self {
        Handler { state, gateway }
    }

    /// Handle store events by type.
    ///
    pub async fn handle(&mut self, event: Event) -> Result<()> {
        debug!("Processing store event '{}'...", event);
        match event {
            Event::Save(doc) => self.save(doc).await,
            Event::ListAll => self.list_all().await,
        }
        Ok(())
    }

    /// Insert the snapshot, then re-fetch the list after a successful save.
    ///
    async fn save(&mut self, doc: FormDocument) {
        let outcome = self.gateway.save(&doc).await;
        let saved = outcome.is_success();
        {
            let mut state = self.state.lock().await;
            if let SaveOutcome::Saved { id } = &outcome {
                info!("Saved '{}' as {}", doc.metadata.name, id);
            }
            state.finish_save(outcome);
            if saved {
                state.begin_request(RequestKind::List);
            }
        }
        if saved {
            self.list_all().await;
        }
    }

    async fn list_all(&mut self) {
        let outcome = self.gateway.list_all().await;
        let mut state = self.state.lock().await;
        state.finish_list(outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::select_template;
    use crate::store::MemoryStore;

    fn shared(designer: Designer) -> Arc<Mutex<Designer>> {
        Arc::new(Mutex::new(designer))
    }

    #[tokio::test]
    async fn test_save_refreshes_list() {
        let doc = select_template("Contact Form").unwrap();
        let state = shared(Designer::new(doc.clone(), None));
        let gateway = Gateway::new(MemoryStore::new());
        state.lock().await.begin_request(RequestKind::Save);

        let mut handler = Handler::new(&state, &gateway);
        handler.handle(Event::Save(doc)).await.unwrap();

        let state = state.lock().await;
        assert!(!state.is_loading());
        assert!(state.last_save().unwrap().is_success());
        assert_eq!(state.saved_forms().len(), 1);
        assert_eq!(state.saved_forms()[0].document.metadata.name, "Contact Us");
    }

    #[tokio::test]
    async fn test_failed_save_keeps_document() {
        let doc = select_template("Event Registration").unwrap();
        let state = shared(Designer::new(doc.clone(), None));
        let gateway = Gateway::new(MemoryStore::failing("store unreachable"));
        state.lock().await.begin_request(RequestKind::Save);

        let mut handler = Handler::new(&state, &gateway);
        handler.handle(Event::Save(doc.clone())).await.unwrap();

        let state = state.lock().await;
        assert!(!state.is_loading());
        assert_eq!(state.last_error(), Some("Document store error: store unreachable"));
        assert_eq!(state.document(), &doc);
        assert!(state.saved_forms().is_empty());
    }

    #[tokio::test]
    async fn test_list_all() {
        let store = MemoryStore::new();
        store.insert(&select_template("Contact Form").unwrap()).await.unwrap();
        store.insert(&select_template("Event Registration").unwrap()).await.unwrap();
        let gateway = Gateway::new(store);
        let state = shared(Designer::default());
        state.lock().await.begin_request(RequestKind::List);

        let mut handler = Handler::new(&state, &gateway);
        handler.handle(Event::ListAll).await.unwrap();

        let state = state.lock().await;
        assert!(!state.is_loading());
        assert_eq!(state.saved_forms().len(), 2);
    }

    #[test]
    fn test_event_display() {
        let event = Event::Save(select_template("Contact Form").unwrap());
        assert_eq!(event.to_string(), "Save(Contact Us)");
        assert_eq!(Event::ListAll.to_string(), "ListAll");
    }
}
