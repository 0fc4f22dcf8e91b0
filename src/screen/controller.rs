// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! List/edit lifecycle of one entity screen
//!
//! ```text
//! Loading ──ok──> Ready ──open──> Editing ──cancel──────────────> Ready
//!    │                              │  └──submit ok──> reload ──> Ready
//!    └──err──> Failed               └──submit err──> Editing (+ error)
//! ```
//!
//! Every successful mutation is followed by a full list reload; the list is
//! never patched in place. Operations take `&mut self`, so one screen never
//! has two of its own requests in flight.

use chrono::{Local, NaiveDate};
use tracing::{debug, error};

use super::form::{EditMode, EntityForm, FieldErrors, FormError, ScreenKind};
use crate::api::{ApiError, ApiResult, ResourceApi};
use crate::logging::AppLogger;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListState {
    Loading,
    Ready,
    /// The last list fetch failed; previously loaded records stay visible
    Failed,
}

/// The `Editing` sub-state: an open form and its validation messages
#[derive(Debug, Clone, PartialEq)]
pub struct Editor<F> {
    mode: EditMode,
    form: F,
    field_errors: FieldErrors,
}

impl<F> Editor<F> {
    pub fn mode(&self) -> &EditMode {
        &self.mode
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Saved and the list was reloaded
    Saved,
    /// Blocked by client-side validation; nothing was sent
    Invalid,
    /// Sent but the server or network refused it; the editor stays open
    Rejected,
    NotEditing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Rejected,
    NothingPending,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScreenError {
    #[error("No {kind} with id {id} in the current list")]
    UnknownRecord { kind: &'static str, id: String },

    #[error("No form is open")]
    NotEditing,

    #[error(transparent)]
    Form(#[from] FormError),
}

#[derive(Debug, Clone, Copy)]
enum Action {
    Load,
    Save,
    Delete,
}

impl Action {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Save => "save",
            Self::Delete => "delete",
        }
    }
}

/// Screen controller for one resource kind
pub struct CrudScreen<K: ScreenKind, A> {
    api: A,
    records: Vec<K::Record>,
    state: ListState,
    error: Option<String>,
    editor: Option<Editor<K::Form>>,
    pending_delete: Option<String>,
}

impl<K, A> CrudScreen<K, A>
where
    K: ScreenKind,
    A: ResourceApi<K>,
{
    /// A screen starts in `Loading`; call [`load`](Self::load) to populate it
    pub fn new(api: A) -> Self {
        Self {
            api,
            records: Vec::new(),
            state: ListState::Loading,
            error: None,
            editor: None,
            pending_delete: None,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn records(&self) -> &[K::Record] {
        &self.records
    }

    pub fn state(&self) -> ListState {
        self.state
    }

    /// Screen-level error message, if any
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn editor(&self) -> Option<&Editor<K::Form>> {
        self.editor.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.editor.is_some()
    }

    /// Identifier awaiting delete confirmation
    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    pub fn find(&self, id: &str) -> Option<&K::Record> {
        self.records.iter().find(|r| K::record_id(r) == id)
    }

    /// Fetch the full list, replacing whatever is held
    pub async fn load(&mut self) {
        self.begin_load();
        let result = self.api.list().await;
        self.finish_load(result);
    }

    pub(crate) fn begin_load(&mut self) {
        debug!("Loading {}", K::PLURAL);
        self.state = ListState::Loading;
    }

    pub(crate) fn finish_load(&mut self, result: ApiResult<Vec<K::Record>>) {
        match result {
            Ok(records) => {
                AppLogger::log_screen_event(K::PLURAL, Action::Load.as_str(), true, None);
                self.records = records;
                self.state = ListState::Ready;
                self.error = None;
            }
            Err(e) => {
                self.state = ListState::Failed;
                self.surface(Action::Load, &e);
            }
        }
    }

    /// Open a blank form with today's defaults
    pub fn open_create(&mut self) {
        self.open_create_on(Local::now().date_naive());
    }

    pub fn open_create_on(&mut self, today: NaiveDate) {
        self.editor = Some(Editor {
            mode: EditMode::Create,
            form: <K::Form as EntityForm<K>>::for_create(today),
            field_errors: FieldErrors::new(),
        });
    }

    /// Open a form pre-populated from a loaded record
    pub fn open_edit(&mut self, id: &str) -> Result<(), ScreenError> {
        let record = self.find(id).ok_or_else(|| ScreenError::UnknownRecord {
            kind: K::SINGULAR,
            id: id.to_string(),
        })?;
        let form = <K::Form as EntityForm<K>>::from_record(record);
        self.editor = Some(Editor {
            mode: EditMode::Update { id: id.to_string() },
            form,
            field_errors: FieldErrors::new(),
        });
        Ok(())
    }

    /// Replace one field; the form is swapped for a new value
    pub fn edit_field(&mut self, field: &str, value: &str) -> Result<(), ScreenError> {
        let editor = self.editor.as_mut().ok_or(ScreenError::NotEditing)?;
        let form = editor.form.with_field(field, value)?;
        let field_errors = editor
            .field_errors
            .iter()
            .filter(|(name, _)| **name != field)
            .map(|(name, message)| (*name, message.clone()))
            .collect();

        editor.form = form;
        editor.field_errors = field_errors;
        Ok(())
    }

    /// Replace the whole form
    pub fn replace_form(&mut self, form: K::Form) -> Result<(), ScreenError> {
        let editor = self.editor.as_mut().ok_or(ScreenError::NotEditing)?;
        editor.form = form;
        Ok(())
    }

    /// Discard the form without any network call
    pub fn cancel_edit(&mut self) {
        self.editor = None;
    }

    /// Validate, send, and on success close the form and reload
    pub async fn submit(&mut self) -> SubmitOutcome {
        let outcome = self.persist().await;
        if outcome == SubmitOutcome::Saved {
            self.load().await;
        }
        outcome
    }

    /// Validate and send without reloading
    pub(crate) async fn persist(&mut self) -> SubmitOutcome {
        let (mode, payload) = {
            let Some(editor) = self.editor.as_mut() else {
                return SubmitOutcome::NotEditing;
            };
            match editor.form.to_payload(&editor.mode) {
                Ok(payload) => {
                    editor.field_errors = FieldErrors::new();
                    (editor.mode.clone(), payload)
                }
                Err(errors) => {
                    let fields: Vec<&str> = errors.keys().copied().collect();
                    AppLogger::log_validation_failure(K::PLURAL, &fields);
                    editor.field_errors = errors;
                    return SubmitOutcome::Invalid;
                }
            }
        };

        let result = match &mode {
            EditMode::Create => self.api.create(&payload).await,
            EditMode::Update { id } => self.api.update(id, &payload).await,
        };

        match result {
            Ok(_) => {
                AppLogger::log_screen_event(K::PLURAL, Action::Save.as_str(), true, mode.target_id());
                self.editor = None;
                SubmitOutcome::Saved
            }
            Err(e) => {
                self.surface(Action::Save, &e);
                SubmitOutcome::Rejected
            }
        }
    }

    /// First step of deletion: remember the target until confirmed
    pub fn request_delete(&mut self, id: &str) {
        self.pending_delete = Some(id.to_string());
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Second step of deletion: send it, then reload on success
    pub async fn confirm_delete(&mut self) -> DeleteOutcome {
        let outcome = self.execute_delete().await;
        if outcome == DeleteOutcome::Deleted {
            self.load().await;
        }
        outcome
    }

    pub(crate) async fn execute_delete(&mut self) -> DeleteOutcome {
        let Some(id) = self.pending_delete.take() else {
            return DeleteOutcome::NothingPending;
        };

        match self.api.delete(&id).await {
            Ok(()) => {
                AppLogger::log_screen_event(K::PLURAL, Action::Delete.as_str(), true, Some(&id));
                DeleteOutcome::Deleted
            }
            Err(e) => {
                self.surface(Action::Delete, &e);
                DeleteOutcome::Rejected
            }
        }
    }

    fn surface(&mut self, action: Action, err: &ApiError) {
        error!(
            screen = K::PLURAL,
            action = action.as_str(),
            status = ?err.status(),
            "Error: {}",
            err
        );
        AppLogger::log_screen_event(K::PLURAL, action.as_str(), false, Some(&err.to_string()));
        self.error = Some(
            err.server_message()
                .unwrap_or_else(|| fallback_message::<K>(action)),
        );
    }
}

fn fallback_message<K: ScreenKind>(action: Action) -> String {
    match action {
        Action::Load => format!("Failed to load {}. Please try again later.", K::PLURAL),
        Action::Save => format!("Failed to save {}. Please try again.", K::SINGULAR),
        Action::Delete => format!("Failed to delete {}. Please try again.", K::SINGULAR),
    }
}
