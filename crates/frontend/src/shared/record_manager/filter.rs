//! Conjunctive record filters
//!
//! A `FilterSpec` is an ordered list of `(field, predicate)` pairs. A record
//! passes when every predicate passes, so order never changes the result and
//! two specs can be combined with [`FilterSpec::and`].

use contracts::shared::record::Record;
use serde::{Deserialize, Serialize};

/// Choice value meaning "no constraint"
pub const ALL: &str = "All";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Predicate {
    /// Case-insensitive substring; empty query matches everything
    Contains { query: String },
    /// Exact match of the displayed value
    Equals { value: String },
    /// Exact match unless the selection is "All" or empty
    Choice { selected: String },
    /// Inclusive range over ISO dates; a missing bound is open
    DateRange {
        from: Option<String>,
        to: Option<String>,
    },
}

impl Predicate {
    /// True when the predicate cannot reject anything
    pub fn is_noop(&self) -> bool {
        match self {
            Self::Contains { query } => query.trim().is_empty(),
            Self::Equals { .. } => false,
            Self::Choice { selected } => is_all(selected),
            Self::DateRange { from, to } => blank(from) && blank(to),
        }
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::Contains { query } => {
                let query = query.trim();
                query.is_empty() || value.to_lowercase().contains(&query.to_lowercase())
            }
            Self::Equals { value: expected } => value == expected,
            Self::Choice { selected } => is_all(selected) || value == selected,
            Self::DateRange { from, to } => {
                let after_from = match from.as_deref().map(str::trim) {
                    Some(from) if !from.is_empty() => value >= from,
                    _ => true,
                };
                let before_to = match to.as_deref().map(str::trim) {
                    Some(to) if !to.is_empty() => value <= to,
                    _ => true,
                };
                after_from && before_to
            }
        }
    }
}

fn is_all(selected: &str) -> bool {
    let selected = selected.trim();
    selected.is_empty() || selected == ALL
}

fn blank(bound: &Option<String>) -> bool {
    bound.as_deref().map_or(true, |b| b.trim().is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldFilter {
    pub field: String,
    pub predicate: Predicate,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    filters: Vec<FieldFilter>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, predicate: Predicate) -> Self {
        self.filters.push(FieldFilter {
            field: field.into(),
            predicate,
        });
        self
    }

    pub fn contains(self, field: impl Into<String>, query: impl Into<String>) -> Self {
        self.with(field, Predicate::Contains { query: query.into() })
    }

    pub fn equals(self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.with(field, Predicate::Equals { value: value.into() })
    }

    pub fn choice(self, field: impl Into<String>, selected: impl Into<String>) -> Self {
        self.with(
            field,
            Predicate::Choice {
                selected: selected.into(),
            },
        )
    }

    pub fn date_range(
        self,
        field: impl Into<String>,
        from: Option<String>,
        to: Option<String>,
    ) -> Self {
        self.with(field, Predicate::DateRange { from, to })
    }

    /// Replace the predicate on `field`, or add one when the field has none
    pub fn set(&mut self, field: &str, predicate: Predicate) {
        match self.filters.iter_mut().find(|f| f.field == field) {
            Some(existing) => existing.predicate = predicate,
            None => self.filters.push(FieldFilter {
                field: field.to_string(),
                predicate,
            }),
        }
    }

    /// First predicate on `field`
    pub fn predicate(&self, field: &str) -> Option<&Predicate> {
        self.filters
            .iter()
            .find(|f| f.field == field)
            .map(|f| &f.predicate)
    }

    /// Conjunction of both specs
    pub fn and(mut self, other: FilterSpec) -> Self {
        self.filters.extend(other.filters);
        self
    }

    pub fn filters(&self) -> &[FieldFilter] {
        &self.filters
    }

    /// Number of filters that actually constrain the list (for the panel badge)
    pub fn active_count(&self) -> usize {
        self.filters.iter().filter(|f| !f.predicate.is_noop()).count()
    }

    pub fn passes<R: Record>(&self, record: &R) -> bool {
        self.filters.iter().all(|f| {
            if f.predicate.is_noop() {
                return true;
            }
            let value = record
                .get(&f.field)
                .map(|v| v.to_string())
                .unwrap_or_default();
            f.predicate.matches(&value)
        })
    }

    pub fn apply<'a, R, I>(&self, records: I) -> Vec<&'a R>
    where
        R: Record + 'a,
        I: IntoIterator<Item = &'a R>,
    {
        records.into_iter().filter(|r| self.passes(*r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_purchase_order::aggregate::PurchaseOrder;

    fn po(id: i64, supplier: &str, status: &str, date: &str) -> PurchaseOrder {
        PurchaseOrder {
            id,
            supplier_name: supplier.to_string(),
            status: status.to_string(),
            order_date: date.to_string(),
            ..PurchaseOrder::default()
        }
    }

    fn sample() -> Vec<PurchaseOrder> {
        vec![
            po(1, "Supplier A", "Pending", "2024-01-10"),
            po(2, "Acme", "Received", "2024-02-01"),
            po(3, "Super Foods", "Pending", "2024-02-15"),
            po(4, "supplies & co", "Cancelled", "2024-03-01"),
            po(5, "Acme", "Pending", ""),
        ]
    }

    fn ids(records: &[&PurchaseOrder]) -> Vec<i64> {
        records.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_text_filter_is_case_insensitive() {
        let records = vec![po(1, "Supplier A", "Pending", ""), po(2, "Acme", "Pending", "")];
        let spec = FilterSpec::new().contains("supplierName", "sup");
        assert_eq!(ids(&spec.apply(&records)), vec![1]);
    }

    #[test]
    fn test_empty_query_and_all_sentinel_pass_everything() {
        let records = sample();
        let spec = FilterSpec::new()
            .contains("supplierName", "  ")
            .choice("status", ALL)
            .choice("status", "")
            .date_range("orderDate", None, Some(String::new()));
        assert_eq!(spec.apply(&records).len(), records.len());
        assert_eq!(spec.active_count(), 0);
    }

    #[test]
    fn test_choice_and_equals() {
        let records = sample();
        let pending = FilterSpec::new().choice("status", "Pending");
        assert_eq!(ids(&pending.apply(&records)), vec![1, 3, 5]);
        let acme = FilterSpec::new().equals("supplierName", "Acme");
        assert_eq!(ids(&acme.apply(&records)), vec![2, 5]);
        let nobody = FilterSpec::new().equals("supplierName", "acme");
        assert!(nobody.apply(&records).is_empty());
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let records = sample();
        let spec = FilterSpec::new().date_range(
            "orderDate",
            Some("2024-02-01".into()),
            Some("2024-02-15".into()),
        );
        assert_eq!(ids(&spec.apply(&records)), vec![2, 3]);

        let open_start = FilterSpec::new().date_range("orderDate", None, Some("2024-02-01".into()));
        // records without a date sort before every bound
        assert_eq!(ids(&open_start.apply(&records)), vec![1, 2, 5]);

        let open_end = FilterSpec::new().date_range("orderDate", Some("2024-02-02".into()), None);
        assert_eq!(ids(&open_end.apply(&records)), vec![3, 4]);
    }

    #[test]
    fn test_unknown_field_only_matches_noop() {
        let records = sample();
        let spec = FilterSpec::new().contains("doesNotExist", "x");
        assert!(spec.apply(&records).is_empty());
        let spec = FilterSpec::new().contains("doesNotExist", "");
        assert_eq!(spec.apply(&records).len(), 5);
    }

    #[test]
    fn test_chaining_equals_conjunction() {
        let records = sample();
        let f1 = FilterSpec::new().contains("supplierName", "s");
        let f2 = FilterSpec::new()
            .choice("status", "Pending")
            .date_range("orderDate", Some("2024-01-01".into()), None);

        let chained = f2.apply(f1.apply(&records));
        let combined = f1.clone().and(f2.clone()).apply(&records);
        let reversed = f2.clone().and(f1.clone()).apply(&records);
        assert_eq!(chained, combined);
        assert_eq!(ids(&combined), ids(&reversed));
        assert_eq!(ids(&combined), vec![1, 3]);
    }

    #[test]
    fn test_set_replaces_predicate_for_field() {
        let mut spec = FilterSpec::new().choice("status", "Pending");
        spec.set("status", Predicate::Choice { selected: ALL.into() });
        spec.set("supplierName", Predicate::Contains { query: "ac".into() });
        assert_eq!(spec.filters().len(), 2);
        assert_eq!(
            spec.predicate("status"),
            Some(&Predicate::Choice { selected: ALL.into() })
        );
        assert_eq!(ids(&spec.apply(&sample())), vec![2, 5]);
        assert!(spec.predicate("orderDate").is_none());
    }

    #[test]
    fn test_spec_round_trips_through_json() {
        let spec = FilterSpec::new()
            .contains("supplierName", "ac")
            .date_range("orderDate", Some("2024-01-01".into()), None);
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["filters"][0]["predicate"]["type"], "contains");
        let back: FilterSpec = serde_json::from_value(json).unwrap();
        assert_eq!(back, spec);
    }
}
