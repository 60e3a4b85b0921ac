//! Records: typed entities that can also be read and written by field name
//!
//! Every list page works with its entity through this trait only, so the
//! store, filters, paginator and edit session are written once and reused
//! for coupons, purchase orders, subscriptions and the rest.

mod error;
mod field;

pub use error::RecordError;
pub use field::{inclusive_days, Coercion, FieldDef, FieldKind, FieldValue, DATE_FORMAT};

/// Identifier of a record inside its list
pub type RecordId = i64;

/// Problem found by a record-level rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: &'static str,
    pub message: String,
}

impl FieldIssue {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

pub trait Record: Clone + Default + PartialEq + std::fmt::Debug {
    fn id(&self) -> RecordId;

    fn set_id(&mut self, id: RecordId);

    /// API resource name (for example "coupons")
    fn collection_name() -> &'static str;

    /// Singular UI name (for example "Coupon")
    fn element_name() -> &'static str;

    /// Plural UI name (for example "Coupons")
    fn list_name() -> &'static str;

    /// Editable and displayable fields, in form order
    fn fields() -> &'static [FieldDef];

    /// Read a field by wire name. `id` is always readable.
    fn get(&self, field: &str) -> Option<FieldValue>;

    /// Write a field by wire name, recalculating derived fields
    fn put(&mut self, field: &str, value: FieldValue) -> Result<(), RecordError>;

    /// Blank record used by the "add" flow
    fn template() -> Self {
        Self::default()
    }

    /// Record-level rules beyond "required": ranges, date order and so on
    fn rules(&self) -> Vec<FieldIssue> {
        Vec::new()
    }

    fn field_def(name: &str) -> Option<&'static FieldDef> {
        Self::fields().iter().find(|f| f.name == name)
    }

    fn required_fields() -> Vec<&'static str> {
        Self::fields()
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name)
            .collect()
    }

    /// List shown when the app runs without a server
    fn sample_records() -> Vec<Self> {
        Vec::new()
    }
}

/// Build records from `(field, input)` rows the way the edit form does,
/// numbering them from 1. One bad row fails the whole list.
pub fn records_from_rows<R: Record>(rows: &[&[(&str, &str)]]) -> Result<Vec<R>, RecordError> {
    rows.iter()
        .zip(1..)
        .map(|(row, id)| {
            let mut record = R::template();
            record.set_id(id);
            for (field, raw) in row.iter() {
                let def = R::field_def(field).ok_or_else(|| unknown(field))?;
                record.put(field, def.coerce(raw, Coercion::Strict)?)?;
            }
            Ok(record)
        })
        .collect()
}

/// Error for writes to calculated fields, shared by `put` implementations
pub fn read_only(field: &str) -> RecordError {
    RecordError::ReadOnly(field.to_string())
}

/// Error for unknown names, shared by `put` implementations
pub fn unknown(field: &str) -> RecordError {
    RecordError::UnknownField(field.to_string())
}

/// `later` must not be before `earlier` when both are filled in.
/// ISO dates compare correctly as strings.
pub fn check_date_order(
    earlier: &str,
    later: &str,
    later_field: &'static str,
    message: &str,
) -> Option<FieldIssue> {
    let (earlier, later) = (earlier.trim(), later.trim());
    if !earlier.is_empty() && !later.is_empty() && later < earlier {
        Some(FieldIssue::new(later_field, message))
    } else {
        None
    }
}
