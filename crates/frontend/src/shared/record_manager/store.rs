//! In-memory copy of one entity list

use contracts::shared::api::ApiError;
use contracts::shared::record::{Record, RecordId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The record was removed or replaced by a reload
    #[error("Record {0} no longer exists, reload the list")]
    StaleReference(RecordId),
}

/// Tag of one `load` request. Issued in increasing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The list was replaced with this many records
    Applied(usize),
    /// The request failed; the previous contents are kept
    Failed(String),
    /// A newer request already landed; this response was dropped
    Stale,
}

#[derive(Debug, Clone)]
pub struct RecordStore<R> {
    records: Vec<R>,
    error: Option<String>,
    issued: u64,
    applied: u64,
    revision: u64,
}

impl<R> Default for RecordStore<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            error: None,
            issued: 0,
            applied: 0,
            revision: 0,
        }
    }
}

impl<R: Record> RecordStore<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<R>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: RecordId) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Last load error, shown as a page banner
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True while the most recently issued load has not landed
    pub fn is_loading(&self) -> bool {
        self.issued > self.applied
    }

    /// Changes whenever the contents change
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.issued += 1;
        LoadTicket(self.issued)
    }

    /// Apply the response of a `begin_load` request.
    ///
    /// Responses older than the last applied one are dropped, so a slow
    /// first request can never overwrite a faster second one.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<R>, ApiError>,
    ) -> LoadOutcome {
        if ticket.0 <= self.applied {
            log::debug!(
                "{}: dropping stale response #{} (already applied #{})",
                R::collection_name(),
                ticket.0,
                self.applied
            );
            return LoadOutcome::Stale;
        }
        self.applied = ticket.0;

        match result {
            Ok(records) => {
                let count = records.len();
                self.records = records;
                self.error = None;
                self.revision += 1;
                log::debug!("{}: loaded {} records", R::collection_name(), count);
                LoadOutcome::Applied(count)
            }
            Err(e) => {
                let message = e.to_string();
                log::warn!("{}: load failed: {}", R::collection_name(), message);
                self.error = Some(message.clone());
                LoadOutcome::Failed(message)
            }
        }
    }

    /// Next local id: max + 1, or 1 for an empty list
    pub fn next_id(&self) -> RecordId {
        self.records.iter().map(|r| r.id()).max().unwrap_or(0) + 1
    }

    /// Append with a freshly assigned local id
    pub fn insert(&mut self, mut record: R) -> RecordId {
        let id = self.next_id();
        record.set_id(id);
        self.records.push(record);
        self.revision += 1;
        id
    }

    /// Append a record saved by the server, keeping its id when usable
    pub fn insert_persisted(&mut self, record: R) -> RecordId {
        let id = record.id();
        if id <= 0 || self.get(id).is_some() {
            return self.insert(record);
        }
        self.records.push(record);
        self.revision += 1;
        id
    }

    /// Replace the record with the same id
    pub fn update(&mut self, id: RecordId, mut record: R) -> Result<(), StoreError> {
        let slot = self
            .records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or(StoreError::StaleReference(id))?;
        record.set_id(id);
        *slot = record;
        self.revision += 1;
        Ok(())
    }

    pub fn remove(&mut self, id: RecordId) -> Result<R, StoreError> {
        let pos = self
            .records
            .iter()
            .position(|r| r.id() == id)
            .ok_or(StoreError::StaleReference(id))?;
        self.revision += 1;
        Ok(self.records.remove(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_coupon::aggregate::Coupon;

    fn coupon(id: RecordId, code: &str) -> Coupon {
        Coupon {
            id,
            coupon_code: code.to_string(),
            ..Coupon::default()
        }
    }

    #[test]
    fn test_insert_assigns_max_plus_one() {
        let mut store = RecordStore::new();
        assert_eq!(store.insert(coupon(0, "A")), 1);
        let mut store = RecordStore::with_records(vec![coupon(3, "A"), coupon(9, "B")]);
        assert_eq!(store.insert(coupon(0, "C")), 10);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_insert_round_trip_only_changes_id() {
        let mut store = RecordStore::with_records(vec![coupon(1, "A")]);
        let input = Coupon {
            coupon_code: "NEW".into(),
            discount_amount: 5.0,
            start_date: "2024-01-01".into(),
            ..Coupon::default()
        };
        let id = store.insert(input.clone());
        let mut expected = input;
        expected.id = id;
        assert_eq!(store.get(id), Some(&expected));
    }

    #[test]
    fn test_update_and_remove_unknown_id() {
        let mut store = RecordStore::with_records(vec![coupon(1, "A")]);
        assert_eq!(
            store.update(5, coupon(5, "X")),
            Err(StoreError::StaleReference(5))
        );
        assert_eq!(store.remove(5), Err(StoreError::StaleReference(5)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_update_keeps_id() {
        let mut store = RecordStore::with_records(vec![coupon(1, "A")]);
        store.update(1, coupon(0, "B")).unwrap();
        assert_eq!(store.get(1).unwrap().coupon_code, "B");
    }

    #[test]
    fn test_failed_load_keeps_contents() {
        let mut store = RecordStore::with_records(vec![coupon(1, "A")]);
        let ticket = store.begin_load();
        assert!(store.is_loading());
        let outcome = store.finish_load(
            ticket,
            Err(ApiError::Status {
                code: "E".into(),
                description: "Server unavailable".into(),
            }),
        );
        assert_eq!(
            outcome,
            LoadOutcome::Failed("Server unavailable (status E)".into())
        );
        assert_eq!(store.len(), 1);
        assert_eq!(store.error(), Some("Server unavailable (status E)"));
        assert!(!store.is_loading());
    }

    #[test]
    fn test_out_of_order_responses_are_dropped() {
        let mut store = RecordStore::<Coupon>::new();
        let first = store.begin_load();
        let second = store.begin_load();

        assert_eq!(
            store.finish_load(second, Ok(vec![coupon(2, "second")])),
            LoadOutcome::Applied(1)
        );
        assert_eq!(
            store.finish_load(first, Ok(vec![coupon(1, "first"), coupon(3, "x")])),
            LoadOutcome::Stale
        );
        assert_eq!(store.records()[0].coupon_code, "second");
    }

    #[test]
    fn test_in_order_responses_both_apply() {
        let mut store = RecordStore::<Coupon>::new();
        let first = store.begin_load();
        let second = store.begin_load();
        assert_eq!(store.finish_load(first, Ok(vec![coupon(1, "first")])), LoadOutcome::Applied(1));
        assert!(store.is_loading());
        assert_eq!(store.finish_load(second, Ok(vec![])), LoadOutcome::Applied(0));
        assert!(store.is_empty());
    }

    #[test]
    fn test_insert_persisted_keeps_server_id() {
        let mut store = RecordStore::with_records(vec![coupon(1, "A")]);
        assert_eq!(store.insert_persisted(coupon(40, "B")), 40);
        assert_eq!(store.insert_persisted(coupon(40, "C")), 41);
        assert_eq!(store.insert_persisted(coupon(0, "D")), 42);
    }

    #[test]
    fn test_revision_moves_on_change() {
        let mut store = RecordStore::<Coupon>::new();
        let r0 = store.revision();
        let id = store.insert(coupon(0, "A"));
        assert!(store.revision() > r0);
        let r1 = store.revision();
        assert!(store.update(99, coupon(0, "B")).is_err());
        assert_eq!(store.revision(), r1);
        store.remove(id).unwrap();
        assert!(store.revision() > r1);
    }
}
