use thiserror::Error;

/// Errors raised when reading or writing a record field by name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Field {0} is calculated and cannot be edited")]
    ReadOnly(String),

    #[error("Field {0} cannot be edited, no record is open")]
    NotEditing(String),

    #[error("Field {field} expects a {expected} value")]
    TypeMismatch { field: String, expected: &'static str },

    #[error("\"{raw}\" is not a number")]
    InvalidNumber { field: String, raw: String },

    #[error("\"{raw}\" is not a date (expected YYYY-MM-DD)")]
    InvalidDate { field: String, raw: String },

    #[error("\"{value}\" is not an allowed value")]
    InvalidChoice { field: String, value: String },
}

impl RecordError {
    /// Name of the field the error refers to
    pub fn field(&self) -> &str {
        match self {
            Self::UnknownField(field) | Self::ReadOnly(field) | Self::NotEditing(field) => field,
            Self::TypeMismatch { field, .. }
            | Self::InvalidNumber { field, .. }
            | Self::InvalidDate { field, .. }
            | Self::InvalidChoice { field, .. } => field,
        }
    }
}
