//! Field schema and values for records exposed by name

use super::RecordError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire format of date fields
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Kind of a record field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    /// ISO `yyyy-mm-dd` string
    Date,
    /// Text restricted to a fixed set of options
    Choice(&'static [&'static str]),
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Date => "date",
            Self::Choice(_) => "choice",
        }
    }
}

/// How raw form input is turned into a field value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Coercion {
    /// Reject input that does not parse
    #[default]
    Strict,
    /// Unparseable numbers become 0, dates and choices are stored as typed
    Lenient,
}

/// Static description of one field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub read_only: bool,
}

impl FieldDef {
    const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
            read_only: false,
        }
    }

    pub const fn text(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub const fn number(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Number)
    }

    pub const fn date(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Date)
    }

    pub const fn choice(
        name: &'static str,
        label: &'static str,
        options: &'static [&'static str],
    ) -> Self {
        Self::new(name, label, FieldKind::Choice(options))
    }

    pub const fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    /// Calculated from other fields, never edited directly
    pub const fn read_only(self) -> Self {
        Self {
            read_only: true,
            ..self
        }
    }

    pub fn options(&self) -> &'static [&'static str] {
        match self.kind {
            FieldKind::Choice(options) => options,
            _ => &[],
        }
    }

    /// Parse raw form input according to the field kind
    pub fn coerce(&self, raw: &str, coercion: Coercion) -> Result<FieldValue, RecordError> {
        let trimmed = raw.trim();
        match self.kind {
            FieldKind::Text => Ok(FieldValue::Text(raw.to_string())),
            FieldKind::Number => {
                if trimmed.is_empty() {
                    return Ok(FieldValue::Number(0.0));
                }
                match trimmed.parse::<f64>() {
                    Ok(n) if n.is_finite() => Ok(FieldValue::Number(n)),
                    _ if coercion == Coercion::Lenient => Ok(FieldValue::Number(0.0)),
                    _ => Err(RecordError::InvalidNumber {
                        field: self.name.to_string(),
                        raw: raw.to_string(),
                    }),
                }
            }
            FieldKind::Date => {
                if trimmed.is_empty() || coercion == Coercion::Lenient {
                    return Ok(FieldValue::Date(trimmed.to_string()));
                }
                NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
                    .map(|d| FieldValue::Date(d.format(DATE_FORMAT).to_string()))
                    .map_err(|_| RecordError::InvalidDate {
                        field: self.name.to_string(),
                        raw: raw.to_string(),
                    })
            }
            FieldKind::Choice(options) => {
                if trimmed.is_empty()
                    || coercion == Coercion::Lenient
                    || options.contains(&trimmed)
                {
                    Ok(FieldValue::Text(trimmed.to_string()))
                } else {
                    Err(RecordError::InvalidChoice {
                        field: self.name.to_string(),
                        value: raw.to_string(),
                    })
                }
            }
        }
    }
}

/// Value of one field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Date(String),
}

impl FieldValue {
    /// Blank means "not filled in": empty text or date, zero number
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(s) | Self::Date(s) => s.trim().is_empty(),
            Self::Number(n) => *n == 0.0,
        }
    }

    pub fn into_text(self, field: &str) -> Result<String, RecordError> {
        match self {
            Self::Text(s) => Ok(s),
            _ => Err(mismatch(field, "text")),
        }
    }

    pub fn into_number(self, field: &str) -> Result<f64, RecordError> {
        match self {
            Self::Number(n) => Ok(n),
            _ => Err(mismatch(field, "number")),
        }
    }

    /// Dates are also accepted as plain text
    pub fn into_date(self, field: &str) -> Result<String, RecordError> {
        match self {
            Self::Date(s) | Self::Text(s) => Ok(s),
            _ => Err(mismatch(field, "date")),
        }
    }
}

fn mismatch(field: &str, expected: &'static str) -> RecordError {
    RecordError::TypeMismatch {
        field: field.to_string(),
        expected,
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) | Self::Date(s) => f.write_str(s),
            Self::Number(n) if n.fract() == 0.0 => write!(f, "{:.0}", n),
            Self::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Days from `from` to `to`, both inclusive. None if either date is missing or invalid.
pub fn inclusive_days(from: &str, to: &str) -> Option<i64> {
    let from = NaiveDate::parse_from_str(from.trim(), DATE_FORMAT).ok()?;
    let to = NaiveDate::parse_from_str(to.trim(), DATE_FORMAT).ok()?;
    Some((to - from).num_days() + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    const AMOUNT: FieldDef = FieldDef::number("amount", "Amount").required();
    const START: FieldDef = FieldDef::date("startDate", "Start date");
    const STATUS: FieldDef = FieldDef::choice("status", "Status", &["Active", "Inactive"]);

    #[test]
    fn test_number_strict_rejects_garbage() {
        let err = AMOUNT.coerce("12abc", Coercion::Strict).unwrap_err();
        assert_eq!(
            err,
            RecordError::InvalidNumber {
                field: "amount".into(),
                raw: "12abc".into()
            }
        );
        assert_eq!(err.field(), "amount");
    }

    #[test]
    fn test_number_lenient_maps_garbage_to_zero() {
        assert_eq!(
            AMOUNT.coerce("12abc", Coercion::Lenient).unwrap(),
            FieldValue::Number(0.0)
        );
    }

    #[test]
    fn test_number_empty_is_zero() {
        assert_eq!(AMOUNT.coerce("  ", Coercion::Strict).unwrap(), FieldValue::Number(0.0));
        assert_eq!(AMOUNT.coerce(" 12.5 ", Coercion::Strict).unwrap(), FieldValue::Number(12.5));
    }

    #[test]
    fn test_date_strict() {
        assert_eq!(
            START.coerce("2024-03-05", Coercion::Strict).unwrap(),
            FieldValue::Date("2024-03-05".into())
        );
        assert!(START.coerce("05.03.2024", Coercion::Strict).is_err());
        assert_eq!(START.coerce("", Coercion::Strict).unwrap(), FieldValue::Date(String::new()));
    }

    #[test]
    fn test_choice() {
        assert!(STATUS.coerce("Active", Coercion::Strict).is_ok());
        assert!(STATUS.coerce("Archived", Coercion::Strict).is_err());
        assert_eq!(STATUS.options(), &["Active", "Inactive"]);
    }

    #[test]
    fn test_display_and_blank() {
        assert_eq!(FieldValue::Number(10.0).to_string(), "10");
        assert_eq!(FieldValue::Number(2.5).to_string(), "2.5");
        assert!(FieldValue::Number(0.0).is_blank());
        assert!(FieldValue::Text("   ".into()).is_blank());
        assert!(!FieldValue::Date("2024-01-01".into()).is_blank());
    }

    #[test]
    fn test_inclusive_days() {
        assert_eq!(inclusive_days("2024-02-27", "2024-03-01"), Some(4));
        assert_eq!(inclusive_days("2024-03-01", "2024-03-01"), Some(1));
        assert_eq!(inclusive_days("", "2024-03-01"), None);
    }
}
