use super::StateError;
use crate::events::store::Event as StoreEvent;
use crate::form::{
    select_template, validate_form, visible_fields, FieldDefinition, FieldValues, FormDocument,
    FormError, FormMetadata, Selection, ValueIssue,
};
use crate::logger::LogHandle;
use crate::store::{ListOutcome, SaveOutcome, SavedForm};
use crate::ui::{Theme, SPINNER_FRAME_COUNT};
use log::*;

pub type StoreEventSender = std::sync::mpsc::Sender<StoreEvent>;

/// Kind of store request in flight.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestKind {
    Save,
    List,
}

/// Houses the form under design and everything the preview shows about it.
///
/// Every model mutation completes before the next one starts; store requests
/// are handed to the worker and their outcomes are written back here.
pub struct Designer {
    store_sender: Option<StoreEventSender>,
    pub(super) document: FormDocument,
    pub(super) selection: Selection,
    pub(super) values: FieldValues,
    saved_forms: Vec<SavedForm>,
    last_save: Option<SaveOutcome>,
    last_error: Option<String>,
    pending_saves: usize,
    pending_lists: usize,
    spinner_index: usize,
    pub(super) focus_index: usize,
    pub(super) option_cursor: usize,
    theme: Theme,
    log: Option<LogHandle>,
}

impl Default for Designer {
    fn default() -> Designer {
        Designer {
            store_sender: None,
            document: FormDocument::new(),
            selection: Selection::new(),
            values: FieldValues::new(),
            saved_forms: vec![],
            last_save: None,
            last_error: None,
            pending_saves: 0,
            pending_lists: 0,
            spinner_index: 0,
            focus_index: 0,
            option_cursor: 0,
            theme: Theme::default(),
            log: None,
        }
    }
}

impl Designer {
    /// Return new instance editing the given document.
    ///
    pub fn new(document: FormDocument, store_sender: Option<StoreEventSender>) -> Self {
        Designer {
            store_sender,
            document,
            ..Designer::default()
        }
    }

    pub fn set_store_sender(&mut self, sender: StoreEventSender) {
        self.store_sender = Some(sender);
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn set_log(&mut self, log: LogHandle) {
        self.log = Some(log);
    }

    /// Recent log lines, oldest first.
    ///
    pub fn log_entries(&self) -> Vec<String> {
        self.log.as_ref().map(LogHandle::entries).unwrap_or_default()
    }

    pub fn document(&self) -> &FormDocument {
        &self.document
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn values(&self) -> &FieldValues {
        &self.values
    }

    pub fn set_metadata(&mut self, metadata: FormMetadata) {
        self.document.set_metadata(metadata);
    }

    /// Append a field to the document.
    ///
    pub fn add_field(&mut self, field: FieldDefinition) -> Result<(), FormError> {
        self.document.add_field(field)
    }

    /// Replace matching fields wholesale. The selection is cleared
    /// afterwards, whether or not any update matched.
    ///
    pub fn update_fields(&mut self, updates: &[FieldDefinition]) -> usize {
        let updated = self.document.update_fields(updates);
        self.selection.clear();
        self.values.retain_existing(&self.document);
        self.clamp_focus();
        updated
    }

    /// Remove fields by id, dropping them from the selection and forgetting
    /// their preview values.
    ///
    pub fn remove_fields<S: AsRef<str>>(&mut self, ids: &[S]) -> usize {
        let removed = self.document.remove_fields(ids.iter());
        self.selection.deselect(ids.iter());
        self.values.retain_existing(&self.document);
        self.clamp_focus();
        removed
    }

    /// Toggle a field in the selection. Ids not in the document are ignored.
    ///
    pub fn toggle_selection(&mut self, field_id: &str, multi_select: bool) {
        if !self.document.contains(field_id) {
            warn!("Ignoring selection of unknown field '{}'", field_id);
            return;
        }
        self.selection.toggle(field_id, multi_select);
    }

    pub fn selected_fields(&self) -> Vec<&FieldDefinition> {
        self.selection.selected_fields(&self.document)
    }

    pub fn move_fields<S: AsRef<str>>(&mut self, dragged_ids: &[S], target_index: usize) -> bool {
        self.document.move_fields(dragged_ids, target_index)
    }

    pub fn move_field(&mut self, drag_index: usize, hover_index: usize) -> bool {
        self.document.move_field(drag_index, hover_index)
    }

    /// Replace the document with a catalog template. Selection and preview
    /// values start over.
    ///
    pub fn apply_template(&mut self, name: &str) -> Result<(), FormError> {
        let template = select_template(name)?;
        info!("Applying template '{}'", name);
        self.load_document(template);
        Ok(())
    }

    /// Replace the document wholesale.
    ///
    pub fn load_document(&mut self, document: FormDocument) {
        self.document.replace(document);
        self.selection.clear();
        self.values.clear();
        self.focus_index = 0;
        self.option_cursor = 0;
    }

    pub fn set_value(&mut self, field_id: &str, value: &str) {
        self.values.set(field_id, value);
        self.clamp_focus();
    }

    pub fn value(&self, field_id: &str) -> &str {
        self.values.get(field_id)
    }

    /// Fields that currently render, in document order.
    ///
    pub fn visible_fields(&self) -> Vec<&FieldDefinition> {
        visible_fields(&self.document, &self.values)
    }

    /// Validation issues for the rendered fields.
    ///
    pub fn validation_issues(&self) -> Result<Vec<(String, ValueIssue)>, FormError> {
        validate_form(&self.document, &self.values)
    }

    /// Hand a snapshot of the document to the store worker.
    ///
    pub fn request_save(&mut self) -> Result<(), StateError> {
        let snapshot = self.document.snapshot();
        self.dispatch(StoreEvent::Save(snapshot))
    }

    /// Ask the store worker for the saved forms list.
    ///
    pub fn request_refresh(&mut self) -> Result<(), StateError> {
        self.dispatch(StoreEvent::ListAll)
    }

    fn dispatch(&mut self, event: StoreEvent) -> Result<(), StateError> {
        let sender = self
            .store_sender
            .as_ref()
            .ok_or(StateError::StoreNotConnected)?;
        debug!("Dispatching store event '{}'", event);
        let kind = match event {
            StoreEvent::Save(_) => RequestKind::Save,
            StoreEvent::ListAll => RequestKind::List,
        };
        sender
            .send(event)
            .map_err(|e| StateError::StoreUnavailable(e.to_string()))?;
        self.begin_request(kind);
        Ok(())
    }

    /// Record the outcome of a save request.
    ///
    pub fn finish_save(&mut self, outcome: SaveOutcome) {
        self.pending_saves = self.pending_saves.saturating_sub(1);
        self.last_error = match &outcome {
            SaveOutcome::Saved { .. } => None,
            SaveOutcome::Failed { error } => Some(error.clone()),
        };
        self.last_save = Some(outcome);
    }

    /// Record the outcome of a list request. A failed listing keeps the
    /// previous list.
    ///
    pub fn finish_list(&mut self, outcome: ListOutcome) {
        self.pending_lists = self.pending_lists.saturating_sub(1);
        match outcome {
            ListOutcome::Listed { forms } => self.saved_forms = forms,
            ListOutcome::Failed { error } => self.last_error = Some(error),
        }
    }

    /// Count a request in flight, including ones the worker starts on its
    /// own.
    ///
    pub fn begin_request(&mut self, kind: RequestKind) {
        match kind {
            RequestKind::Save => self.pending_saves += 1,
            RequestKind::List => self.pending_lists += 1,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pending_saves + self.pending_lists > 0
    }

    pub fn is_saving(&self) -> bool {
        self.pending_saves > 0
    }

    pub fn saved_forms(&self) -> &[SavedForm] {
        &self.saved_forms
    }

    pub fn last_save(&self) -> Option<&SaveOutcome> {
        self.last_save.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Advance the loading spinner by one frame.
    ///
    pub fn advance_spinner_index(&mut self) {
        self.spinner_index = (self.spinner_index + 1) % SPINNER_FRAME_COUNT;
    }

    pub fn spinner_index(&self) -> usize {
        self.spinner_index
    }
}
