//! Draft buffer behind the add/edit modal
//!
//! ```text
//! Closed --open(None)--> Creating --commit/cancel--> Closed
//! Closed --open(Some)--> Editing(id) --commit/cancel--> Closed
//! ```

use super::store::{RecordStore, StoreError};
use contracts::shared::record::{Coercion, Record, RecordError, RecordId};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionMode {
    #[default]
    Closed,
    Creating,
    Editing(RecordId),
}

/// Why a draft cannot be saved yet. Rendered next to the fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Required fields left blank, in form order
    pub missing: Vec<&'static str>,
    /// Field name -> message, for input that did not parse or broke a rule
    pub invalid: BTreeMap<String, String>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.missing.is_empty() && self.invalid.is_empty()
    }

    /// Inline message for one field
    pub fn message_for(&self, field: &str) -> Option<String> {
        if let Some(message) = self.invalid.get(field) {
            return Some(message.clone());
        }
        self.missing
            .iter()
            .any(|f| *f == field)
            .then(|| "This field is required".to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommitError {
    #[error("Nothing to save, the form is closed")]
    SessionClosed,

    #[error("Please fill in the highlighted fields")]
    Validation(ValidationReport),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Validated draft, ready to be persisted
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedCommit<R> {
    pub mode: SessionMode,
    pub record: R,
    /// Which opening of the form the draft came from
    pub opened: u64,
}

impl<R> PreparedCommit<R> {
    pub fn is_new(&self) -> bool {
        self.mode == SessionMode::Creating
    }
}

#[derive(Debug, Clone)]
pub struct EditSession<R> {
    mode: SessionMode,
    draft: Option<R>,
    required: Vec<&'static str>,
    coercion: Coercion,
    input_errors: BTreeMap<String, String>,
    last_report: Option<ValidationReport>,
    /// Bumped on every `open`
    opened: u64,
}

impl<R: Record> Default for EditSession<R> {
    fn default() -> Self {
        Self::new(R::required_fields(), Coercion::default())
    }
}

impl<R: Record> EditSession<R> {
    /// `required` overrides the schema when a page asks for a different set
    pub fn new(required: Vec<&'static str>, coercion: Coercion) -> Self {
        Self {
            mode: SessionMode::Closed,
            draft: None,
            required,
            coercion,
            input_errors: BTreeMap::new(),
            last_report: None,
            opened: 0,
        }
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn is_open(&self) -> bool {
        self.mode != SessionMode::Closed
    }

    pub fn draft(&self) -> Option<&R> {
        self.draft.as_ref()
    }

    pub fn coercion(&self) -> Coercion {
        self.coercion
    }

    pub fn set_coercion(&mut self, coercion: Coercion) {
        self.coercion = coercion;
    }

    /// Report from the last failed `validate`/`commit`, cleared field by field as the user edits
    pub fn report(&self) -> Option<&ValidationReport> {
        self.last_report.as_ref()
    }

    /// Inline error for a field: pending parse error first, then the last report
    pub fn field_error(&self, field: &str) -> Option<String> {
        self.input_errors
            .get(field)
            .cloned()
            .or_else(|| self.last_report.as_ref().and_then(|r| r.message_for(field)))
    }

    /// Start a session: `None` for a new record, `Some` to edit a copy
    pub fn open(&mut self, record: Option<&R>) {
        let (mode, draft) = match record {
            Some(r) => (SessionMode::Editing(r.id()), r.clone()),
            None => (SessionMode::Creating, R::template()),
        };
        self.mode = mode;
        self.draft = Some(draft);
        self.input_errors.clear();
        self.last_report = None;
        self.opened += 1;
    }

    /// Store raw form input into the draft, parsed according to the field kind.
    ///
    /// Rejected input leaves the draft as it was and shows up as an inline error.
    pub fn set_field(&mut self, field: &str, raw: &str) -> Result<(), RecordError> {
        let draft = self
            .draft
            .as_mut()
            .ok_or_else(|| RecordError::NotEditing(field.to_string()))?;
        let def = R::field_def(field).ok_or_else(|| RecordError::UnknownField(field.to_string()))?;
        if def.read_only {
            return Err(RecordError::ReadOnly(field.to_string()));
        }

        let result = def
            .coerce(raw, self.coercion)
            .and_then(|value| draft.put(field, value));

        match &result {
            Ok(()) => {
                self.input_errors.remove(field);
                if let Some(report) = self.last_report.as_mut() {
                    report.missing.retain(|f| *f != field);
                    report.invalid.remove(field);
                }
            }
            Err(e) => {
                self.input_errors.insert(field.to_string(), e.to_string());
            }
        }
        result
    }

    pub fn validate(&self) -> Result<(), ValidationReport> {
        let Some(draft) = self.draft.as_ref() else {
            return Ok(());
        };

        let mut report = ValidationReport {
            invalid: self.input_errors.clone(),
            ..ValidationReport::default()
        };

        let mut required = self.required.clone();
        // form order, not the order the page listed them in
        required.sort_by_key(|name| {
            R::fields()
                .iter()
                .position(|f| f.name == *name)
                .unwrap_or(usize::MAX)
        });
        for field in required {
            let blank = draft.get(field).map_or(true, |v| v.is_blank());
            if blank && !report.invalid.contains_key(field) {
                report.missing.push(field);
            }
        }

        for issue in draft.rules() {
            if !report.missing.contains(&issue.field) {
                report
                    .invalid
                    .entry(issue.field.to_string())
                    .or_insert(issue.message);
            }
        }

        if report.is_ok() {
            Ok(())
        } else {
            Err(report)
        }
    }

    /// Validate and hand out the record to persist, keeping the session open
    pub fn prepare(&mut self) -> Result<PreparedCommit<R>, CommitError> {
        let Some(draft) = self.draft.as_ref() else {
            return Err(CommitError::SessionClosed);
        };
        if let Err(report) = self.validate() {
            self.last_report = Some(report.clone());
            return Err(CommitError::Validation(report));
        }
        Ok(PreparedCommit {
            mode: self.mode,
            record: draft.clone(),
            opened: self.opened,
        })
    }

    /// Write a prepared record into the store and close the session it came from.
    /// A form reopened in the meantime stays open.
    pub fn finish(
        &mut self,
        store: &mut RecordStore<R>,
        prepared: PreparedCommit<R>,
        keep_remote_id: bool,
    ) -> Result<RecordId, CommitError> {
        let id = match prepared.mode {
            SessionMode::Closed => return Err(CommitError::SessionClosed),
            SessionMode::Creating if keep_remote_id => store.insert_persisted(prepared.record),
            SessionMode::Creating => store.insert(prepared.record),
            SessionMode::Editing(id) => {
                store.update(id, prepared.record)?;
                id
            }
        };
        if self.is_open() && self.opened == prepared.opened {
            self.close();
        }
        Ok(id)
    }

    /// Validate and write into the store. A second call after success is a no-op error.
    pub fn commit(&mut self, store: &mut RecordStore<R>) -> Result<RecordId, CommitError> {
        let prepared = self.prepare()?;
        self.finish(store, prepared, false)
    }

    /// Drop the draft; the store is never touched
    pub fn cancel(&mut self) {
        self.close();
    }

    fn close(&mut self) {
        self.mode = SessionMode::Closed;
        self.draft = None;
        self.input_errors.clear();
        self.last_report = None;
    }
}
