use crate::shared::pricing::{is_valid_percent, LineAmounts};
use crate::shared::record::{
    read_only, records_from_rows, unknown, FieldDef, FieldIssue, FieldValue, Record, RecordError,
    RecordId,
};
use serde::{Deserialize, Serialize};

pub const PAYMENT_METHODS: &[&str] = &["Cash", "Card", "UPI", "Wallet"];
pub const POS_ORDER_STATUSES: &[&str] = &["Completed", "Pending", "Refunded"];

const FIELDS: &[FieldDef] = &[
    FieldDef::text("orderNumber", "Order No.").required(),
    FieldDef::text("customerName", "Customer"),
    FieldDef::text("cashier", "Cashier"),
    FieldDef::date("orderDate", "Date").required(),
    FieldDef::choice("paymentMethod", "Payment", PAYMENT_METHODS),
    FieldDef::number("subtotal", "Subtotal").required(),
    FieldDef::number("discountAmount", "Discount"),
    FieldDef::number("taxPercent", "Tax %"),
    FieldDef::number("taxAmount", "Tax").read_only(),
    FieldDef::number("total", "Total").read_only(),
    FieldDef::choice("status", "Status", POS_ORDER_STATUSES),
];

/// Shown when the app runs without a server
const SAMPLES: &[&[(&str, &str)]] = &[
    &[
        ("orderNumber", "POS-5001"),
        ("customerName", "Walk-in"),
        ("cashier", "Dana"),
        ("orderDate", "2024-03-10"),
        ("paymentMethod", "Cash"),
        ("subtotal", "42.5"),
        ("taxPercent", "5"),
    ],
    &[
        ("orderNumber", "POS-5002"),
        ("customerName", "Evan Price"),
        ("cashier", "Dana"),
        ("orderDate", "2024-03-10"),
        ("paymentMethod", "Card"),
        ("subtotal", "120"),
        ("discountAmount", "10"),
        ("taxPercent", "5"),
    ],
    &[
        ("orderNumber", "POS-5003"),
        ("customerName", "Farah Ali"),
        ("cashier", "Luis"),
        ("orderDate", "2024-03-11"),
        ("paymentMethod", "UPI"),
        ("subtotal", "18"),
        ("status", "Refunded"),
    ],
];

/// Sale rung up on a POS terminal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PosOrder {
    pub id: RecordId,
    pub order_number: String,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub cashier: String,
    pub order_date: String,
    pub payment_method: String,
    pub subtotal: f64,
    #[serde(default)]
    pub discount_amount: f64,
    #[serde(default)]
    pub tax_percent: f64,
    #[serde(default)]
    pub tax_amount: f64,
    #[serde(default)]
    pub total: f64,
    pub status: String,
}

impl Default for PosOrder {
    fn default() -> Self {
        Self {
            id: 0,
            order_number: String::new(),
            customer_name: String::new(),
            cashier: String::new(),
            order_date: String::new(),
            payment_method: "Cash".to_string(),
            subtotal: 0.0,
            discount_amount: 0.0,
            tax_percent: 0.0,
            tax_amount: 0.0,
            total: 0.0,
            status: "Completed".to_string(),
        }
    }
}

impl PosOrder {
    pub fn amounts(&self) -> LineAmounts {
        LineAmounts::from_subtotal(self.subtotal, self.discount_amount, self.tax_percent)
    }

    fn recalculate(&mut self) {
        let amounts = self.amounts();
        self.tax_amount = amounts.tax_amount;
        self.total = amounts.total;
    }
}

impl Record for PosOrder {
    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn collection_name() -> &'static str {
        "pos-orders"
    }

    fn element_name() -> &'static str {
        "POS order"
    }

    fn list_name() -> &'static str {
        "POS orders"
    }

    fn fields() -> &'static [FieldDef] {
        FIELDS
    }

    fn get(&self, field: &str) -> Option<FieldValue> {
        let value = match field {
            "id" => FieldValue::Number(self.id as f64),
            "orderNumber" => FieldValue::Text(self.order_number.clone()),
            "customerName" => FieldValue::Text(self.customer_name.clone()),
            "cashier" => FieldValue::Text(self.cashier.clone()),
            "orderDate" => FieldValue::Date(self.order_date.clone()),
            "paymentMethod" => FieldValue::Text(self.payment_method.clone()),
            "subtotal" => FieldValue::Number(self.subtotal),
            "discountAmount" => FieldValue::Number(self.discount_amount),
            "taxPercent" => FieldValue::Number(self.tax_percent),
            "taxAmount" => FieldValue::Number(self.tax_amount),
            "total" => FieldValue::Number(self.total),
            "status" => FieldValue::Text(self.status.clone()),
            _ => return None,
        };
        Some(value)
    }

    fn put(&mut self, field: &str, value: FieldValue) -> Result<(), RecordError> {
        match field {
            "orderNumber" => self.order_number = value.into_text(field)?,
            "customerName" => self.customer_name = value.into_text(field)?,
            "cashier" => self.cashier = value.into_text(field)?,
            "orderDate" => self.order_date = value.into_date(field)?,
            "paymentMethod" => self.payment_method = value.into_text(field)?,
            "subtotal" => self.subtotal = value.into_number(field)?,
            "discountAmount" => self.discount_amount = value.into_number(field)?,
            "taxPercent" => self.tax_percent = value.into_number(field)?,
            "status" => self.status = value.into_text(field)?,
            "taxAmount" | "total" => return Err(read_only(field)),
            _ => return Err(unknown(field)),
        }
        self.recalculate();
        Ok(())
    }

    fn sample_records() -> Vec<Self> {
        records_from_rows(SAMPLES).unwrap_or_default()
    }

    fn rules(&self) -> Vec<FieldIssue> {
        let mut issues = Vec::new();
        if self.subtotal < 0.0 {
            issues.push(FieldIssue::new("subtotal", "Subtotal cannot be negative"));
        }
        if self.discount_amount < 0.0 || self.discount_amount > self.subtotal {
            issues.push(FieldIssue::new(
                "discountAmount",
                "Discount must be between 0 and the subtotal",
            ));
        }
        if !is_valid_percent(self.tax_percent) {
            issues.push(FieldIssue::new("taxPercent", "Tax must be between 0 and 100"));
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_records_are_valid() {
        let samples = PosOrder::sample_records();
        assert_eq!(samples.len(), SAMPLES.len());
        for (record, id) in samples.iter().zip(1..) {
            assert_eq!(record.id, id);
            assert!(record.rules().is_empty(), "{:?}", record);
            for field in PosOrder::required_fields() {
                let value = record.get(field).unwrap();
                assert!(!value.is_blank(), "{} is blank in {:?}", field, record);
            }
        }
    }

    #[test]
    fn test_taxable_is_subtotal_minus_discount() {
        let mut order = PosOrder::template();
        order.put("subtotal", FieldValue::Number(200.0)).unwrap();
        order.put("discountAmount", FieldValue::Number(50.0)).unwrap();
        order.put("taxPercent", FieldValue::Number(12.0)).unwrap();
        assert_eq!(order.tax_amount, 18.0);
        assert_eq!(order.total, 168.0);
        assert_eq!(order.amounts().taxable, 150.0);
    }

    #[test]
    fn test_discount_above_subtotal_is_flagged() {
        let order = PosOrder {
            subtotal: 10.0,
            discount_amount: 15.0,
            ..PosOrder::default()
        };
        assert_eq!(order.rules()[0].field, "discountAmount");
    }
}
