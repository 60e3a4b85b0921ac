//! Generic list manager shared by every admin list page
//!
//! `TabularRecordManager` owns the loaded records, the active filters, the
//! page window and the add/edit session for one entity. Every operation that
//! changes the records or the filters re-runs the filter pipeline and pulls
//! the current page back into range, so the page number can never point past
//! the last page.

pub mod edit_session;
pub mod filter;
pub mod gateway;
pub mod paginator;
pub mod store;

pub use edit_session::{CommitError, EditSession, PreparedCommit, SessionMode, ValidationReport};
pub use filter::{FieldFilter, FilterSpec, Predicate, ALL};
pub use gateway::{ManagerError, ManagerHandle, RecordGateway};
pub use paginator::{page_count, PageError, PageWindow, Paginator, DEFAULT_PAGE_SIZES};
pub use store::{LoadOutcome, LoadTicket, RecordStore, StoreError};

use contracts::shared::api::ApiError;
use contracts::shared::pricing::round2;
use contracts::shared::record::{Coercion, FieldValue, Record, RecordError, RecordId};

#[derive(Debug, Clone)]
pub struct TabularRecordManager<R> {
    store: RecordStore<R>,
    filters: FilterSpec,
    filter_revision: u64,
    paginator: Paginator,
    session: EditSession<R>,
    /// Store indices that pass the filters, in store order
    visible: Vec<usize>,
    /// (store revision, filter revision) the cache was built for
    visible_key: Option<(u64, u64)>,
}

impl<R: Record> Default for TabularRecordManager<R> {
    fn default() -> Self {
        Self::new(Paginator::default(), EditSession::default())
    }
}

impl<R: Record> TabularRecordManager<R> {
    pub fn new(paginator: Paginator, session: EditSession<R>) -> Self {
        let mut manager = Self {
            store: RecordStore::new(),
            filters: FilterSpec::new(),
            filter_revision: 0,
            paginator,
            session,
            visible: Vec::new(),
            visible_key: None,
        };
        manager.refresh();
        manager
    }

    pub fn with_settings(page_size: usize, page_sizes: &[usize], coercion: Coercion) -> Self {
        Self::new(
            Paginator::new(page_size).with_page_sizes(page_sizes),
            EditSession::new(R::required_fields(), coercion),
        )
    }

    /// Start from records already in memory (mock mode and tests)
    pub fn with_records(mut self, records: Vec<R>) -> Self {
        self.store = RecordStore::with_records(records);
        // the new store starts at revision 0 again
        self.visible_key = None;
        self.refresh();
        self
    }

    /// Re-run the filters when their inputs changed, then clamp the page
    fn refresh(&mut self) {
        let key = (self.store.revision(), self.filter_revision);
        if self.visible_key != Some(key) {
            self.visible = self
                .store
                .records()
                .iter()
                .enumerate()
                .filter(|(_, r)| self.filters.passes(*r))
                .map(|(i, _)| i)
                .collect();
            self.visible_key = Some(key);
        }
        if self.paginator.recompute(self.visible.len()) {
            log::debug!(
                "{}: page clamped to {}",
                R::collection_name(),
                self.paginator.page_number()
            );
        }
    }

    // ---- records ----

    pub fn store(&self) -> &RecordStore<R> {
        &self.store
    }

    pub fn records(&self) -> &[R] {
        self.store.records()
    }

    pub fn get(&self, id: RecordId) -> Option<&R> {
        self.store.get(id)
    }

    pub fn error(&self) -> Option<&str> {
        self.store.error()
    }

    pub fn is_loading(&self) -> bool {
        self.store.is_loading()
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.store.begin_load()
    }

    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<R>, ApiError>,
    ) -> LoadOutcome {
        let outcome = self.store.finish_load(ticket, result);
        self.refresh();
        outcome
    }

    /// Remove a record from the local list
    pub fn remove(&mut self, id: RecordId) -> Result<R, StoreError> {
        let removed = self.store.remove(id)?;
        self.refresh();
        Ok(removed)
    }

    // ---- filters ----

    pub fn filters(&self) -> &FilterSpec {
        &self.filters
    }

    pub fn set_filters(&mut self, filters: FilterSpec) {
        if filters == self.filters {
            return;
        }
        self.filters = filters;
        self.filter_revision += 1;
        self.refresh();
    }

    pub fn clear_filters(&mut self) {
        self.set_filters(FilterSpec::new());
    }

    /// Records passing the filters, in store order
    pub fn filtered(&self) -> Vec<&R> {
        let records = self.store.records();
        self.visible.iter().map(|i| &records[*i]).collect()
    }

    pub fn filtered_count(&self) -> usize {
        self.visible.len()
    }

    /// Sum of a numeric field over the filtered records (all pages)
    pub fn filtered_total(&self, field: &str) -> f64 {
        let records = self.store.records();
        let sum: f64 = self
            .visible
            .iter()
            .filter_map(|i| match records[*i].get(field) {
                Some(FieldValue::Number(n)) => Some(n),
                _ => None,
            })
            .sum();
        round2(sum)
    }

    // ---- paging ----

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    pub fn window(&self) -> PageWindow {
        self.paginator.window()
    }

    pub fn page_count(&self) -> usize {
        self.paginator.page_count()
    }

    pub fn go_to_page(&mut self, page_number: usize) -> Result<(), PageError> {
        self.paginator.go_to(page_number)
    }

    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), PageError> {
        self.paginator.set_page_size(page_size)?;
        self.refresh();
        Ok(())
    }

    /// Records on the current page
    pub fn page_records(&self) -> Vec<&R> {
        let records = self.store.records();
        self.paginator
            .slice(&self.visible)
            .iter()
            .map(|i| &records[*i])
            .collect()
    }

    // ---- editing ----

    pub fn session(&self) -> &EditSession<R> {
        &self.session
    }

    pub fn open_create(&mut self) {
        self.session.open(None);
    }

    /// Open the edit form on a copy of the record
    pub fn open_edit(&mut self, id: RecordId) -> Result<(), StoreError> {
        let record = self.store.get(id).ok_or(StoreError::StaleReference(id))?;
        self.session.open(Some(record));
        Ok(())
    }

    pub fn set_field(&mut self, field: &str, raw: &str) -> Result<(), RecordError> {
        self.session.set_field(field, raw)
    }

    pub fn validate(&self) -> Result<(), ValidationReport> {
        self.session.validate()
    }

    pub fn prepare_commit(&mut self) -> Result<PreparedCommit<R>, CommitError> {
        self.session.prepare()
    }

    /// Store a prepared record and close the form.
    /// `keep_remote_id` keeps the id the server assigned to a new record.
    pub fn finish_commit(
        &mut self,
        prepared: PreparedCommit<R>,
        keep_remote_id: bool,
    ) -> Result<RecordId, CommitError> {
        let id = self
            .session
            .finish(&mut self.store, prepared, keep_remote_id)?;
        self.refresh();
        Ok(id)
    }

    /// Validate and store the draft locally
    pub fn commit(&mut self) -> Result<RecordId, CommitError> {
        let id = self.session.commit(&mut self.store)?;
        self.refresh();
        Ok(id)
    }

    pub fn cancel_edit(&mut self) {
        self.session.cancel();
    }
}
