//! Line-total arithmetic shared by order-like documents

use serde::{Deserialize, Serialize};

/// Amounts of one priced line (or a whole document)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineAmounts {
    pub subtotal: f64,
    pub discount_amount: f64,
    pub taxable: f64,
    pub tax_amount: f64,
    pub total: f64,
}

impl LineAmounts {
    /// quantity * unit price, then percentage discount, then percentage tax
    pub fn from_quantity(quantity: f64, unit_price: f64, discount_percent: f64, tax_percent: f64) -> Self {
        let subtotal = round2(quantity * unit_price);
        let discount_amount = round2(subtotal * discount_percent / 100.0);
        Self::from_subtotal(subtotal, discount_amount, tax_percent)
    }

    /// Subtotal with an absolute discount and percentage tax
    pub fn from_subtotal(subtotal: f64, discount_amount: f64, tax_percent: f64) -> Self {
        let taxable = round2(subtotal - discount_amount);
        let tax_amount = round2(taxable * tax_percent / 100.0);
        Self {
            subtotal: round2(subtotal),
            discount_amount: round2(discount_amount),
            taxable,
            tax_amount,
            total: round2(taxable + tax_amount),
        }
    }
}

/// Round to cents
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn is_valid_percent(value: f64) -> bool {
    (0.0..=100.0).contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_quantity() {
        let a = LineAmounts::from_quantity(3.0, 250.0, 10.0, 18.0);
        assert_eq!(a.subtotal, 750.0);
        assert_eq!(a.discount_amount, 75.0);
        assert_eq!(a.taxable, 675.0);
        assert_eq!(a.tax_amount, 121.5);
        assert_eq!(a.total, 796.5);
    }

    #[test]
    fn test_from_subtotal_rounds_to_cents() {
        let a = LineAmounts::from_subtotal(19.99, 0.0, 10.0);
        assert_eq!(a.tax_amount, 2.0);
        assert_eq!(a.total, 21.99);
    }

    #[test]
    fn test_zero_everything() {
        assert_eq!(LineAmounts::from_quantity(0.0, 0.0, 0.0, 0.0), LineAmounts::default());
    }

    #[test]
    fn test_percent_range() {
        assert!(is_valid_percent(0.0));
        assert!(is_valid_percent(100.0));
        assert!(!is_valid_percent(-0.5));
        assert!(!is_valid_percent(100.01));
    }
}
