use crate::shared::pricing::{is_valid_percent, LineAmounts};
use crate::shared::record::{
    check_date_order, read_only, records_from_rows, unknown, FieldDef, FieldIssue, FieldValue,
    Record, RecordError, RecordId,
};
use serde::{Deserialize, Serialize};

pub const PURCHASE_ORDER_STATUSES: &[&str] = &["Pending", "Ordered", "Received", "Cancelled"];

const FIELDS: &[FieldDef] = &[
    FieldDef::text("orderNumber", "Order No.").required(),
    FieldDef::text("supplierName", "Supplier").required(),
    FieldDef::text("productName", "Product"),
    FieldDef::date("orderDate", "Order date").required(),
    FieldDef::date("expectedDate", "Expected delivery"),
    FieldDef::choice("status", "Status", PURCHASE_ORDER_STATUSES),
    FieldDef::number("quantity", "Quantity").required(),
    FieldDef::number("unitPrice", "Unit price").required(),
    FieldDef::number("discountPercent", "Discount %"),
    FieldDef::number("taxPercent", "Tax %"),
    FieldDef::number("subtotal", "Subtotal").read_only(),
    FieldDef::number("discountAmount", "Discount").read_only(),
    FieldDef::number("taxAmount", "Tax").read_only(),
    FieldDef::number("total", "Total").read_only(),
];

/// Shown when the app runs without a server
const SAMPLES: &[&[(&str, &str)]] = &[
    &[
        ("orderNumber", "PO-1001"),
        ("supplierName", "Fresh Farms Ltd"),
        ("productName", "Organic milk"),
        ("orderDate", "2024-02-05"),
        ("expectedDate", "2024-02-09"),
        ("status", "Received"),
        ("quantity", "120"),
        ("unitPrice", "1.25"),
        ("taxPercent", "5"),
    ],
    &[
        ("orderNumber", "PO-1002"),
        ("supplierName", "Metro Wholesale"),
        ("productName", "Paper bags"),
        ("orderDate", "2024-02-12"),
        ("status", "Ordered"),
        ("quantity", "500"),
        ("unitPrice", "0.08"),
        ("discountPercent", "10"),
        ("taxPercent", "18"),
    ],
    &[
        ("orderNumber", "PO-1003"),
        ("supplierName", "Fresh Farms Ltd"),
        ("productName", "Free-range eggs"),
        ("orderDate", "2024-03-01"),
        ("expectedDate", "2024-03-04"),
        ("status", "Pending"),
        ("quantity", "60"),
        ("unitPrice", "3.4"),
    ],
];

/// Purchase order to a supplier. `supplierName` is copied at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrder {
    pub id: RecordId,
    pub order_number: String,
    pub supplier_name: String,
    #[serde(default)]
    pub product_name: String,
    pub order_date: String,
    #[serde(default)]
    pub expected_date: String,
    pub status: String,
    pub quantity: f64,
    pub unit_price: f64,
    #[serde(default)]
    pub discount_percent: f64,
    #[serde(default)]
    pub tax_percent: f64,
    #[serde(flatten)]
    pub amounts: LineAmounts,
}

impl Default for PurchaseOrder {
    fn default() -> Self {
        Self {
            id: 0,
            order_number: String::new(),
            supplier_name: String::new(),
            product_name: String::new(),
            order_date: String::new(),
            expected_date: String::new(),
            status: "Pending".to_string(),
            quantity: 0.0,
            unit_price: 0.0,
            discount_percent: 0.0,
            tax_percent: 0.0,
            amounts: LineAmounts::default(),
        }
    }
}

impl PurchaseOrder {
    fn recalculate(&mut self) {
        self.amounts = LineAmounts::from_quantity(
            self.quantity,
            self.unit_price,
            self.discount_percent,
            self.tax_percent,
        );
    }
}

impl Record for PurchaseOrder {
    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn collection_name() -> &'static str {
        "purchase-orders"
    }

    fn element_name() -> &'static str {
        "Purchase order"
    }

    fn list_name() -> &'static str {
        "Purchase orders"
    }

    fn fields() -> &'static [FieldDef] {
        FIELDS
    }

    fn get(&self, field: &str) -> Option<FieldValue> {
        let value = match field {
            "id" => FieldValue::Number(self.id as f64),
            "orderNumber" => FieldValue::Text(self.order_number.clone()),
            "supplierName" => FieldValue::Text(self.supplier_name.clone()),
            "productName" => FieldValue::Text(self.product_name.clone()),
            "orderDate" => FieldValue::Date(self.order_date.clone()),
            "expectedDate" => FieldValue::Date(self.expected_date.clone()),
            "status" => FieldValue::Text(self.status.clone()),
            "quantity" => FieldValue::Number(self.quantity),
            "unitPrice" => FieldValue::Number(self.unit_price),
            "discountPercent" => FieldValue::Number(self.discount_percent),
            "taxPercent" => FieldValue::Number(self.tax_percent),
            "subtotal" => FieldValue::Number(self.amounts.subtotal),
            "discountAmount" => FieldValue::Number(self.amounts.discount_amount),
            "taxAmount" => FieldValue::Number(self.amounts.tax_amount),
            "total" => FieldValue::Number(self.amounts.total),
            _ => return None,
        };
        Some(value)
    }

    fn put(&mut self, field: &str, value: FieldValue) -> Result<(), RecordError> {
        match field {
            "orderNumber" => self.order_number = value.into_text(field)?,
            "supplierName" => self.supplier_name = value.into_text(field)?,
            "productName" => self.product_name = value.into_text(field)?,
            "orderDate" => self.order_date = value.into_date(field)?,
            "expectedDate" => self.expected_date = value.into_date(field)?,
            "status" => self.status = value.into_text(field)?,
            "quantity" => self.quantity = value.into_number(field)?,
            "unitPrice" => self.unit_price = value.into_number(field)?,
            "discountPercent" => self.discount_percent = value.into_number(field)?,
            "taxPercent" => self.tax_percent = value.into_number(field)?,
            "subtotal" | "discountAmount" | "taxAmount" | "total" => return Err(read_only(field)),
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
        if self.quantity < 0.0 {
            issues.push(FieldIssue::new("quantity", "Quantity cannot be negative"));
        }
        if self.unit_price < 0.0 {
            issues.push(FieldIssue::new("unitPrice", "Unit price cannot be negative"));
        }
        if !is_valid_percent(self.discount_percent) {
            issues.push(FieldIssue::new("discountPercent", "Discount must be between 0 and 100"));
        }
        if !is_valid_percent(self.tax_percent) {
            issues.push(FieldIssue::new("taxPercent", "Tax must be between 0 and 100"));
        }
        issues.extend(check_date_order(
            &self.order_date,
            &self.expected_date,
            "expectedDate",
            "Delivery cannot be expected before the order date",
        ));
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_records_are_valid() {
        let samples = PurchaseOrder::sample_records();
        assert_eq!(samples.len(), SAMPLES.len());
        for (record, id) in samples.iter().zip(1..) {
            assert_eq!(record.id, id);
            assert!(record.rules().is_empty(), "{:?}", record);
            for field in PurchaseOrder::required_fields() {
                let value = record.get(field).unwrap();
                assert!(!value.is_blank(), "{} is blank in {:?}", field, record);
            }
        }
    }

    #[test]
    fn test_totals_follow_inputs() {
        let mut po = PurchaseOrder::template();
        po.put("quantity", FieldValue::Number(4.0)).unwrap();
        po.put("unitPrice", FieldValue::Number(25.0)).unwrap();
        po.put("discountPercent", FieldValue::Number(10.0)).unwrap();
        po.put("taxPercent", FieldValue::Number(5.0)).unwrap();
        assert_eq!(po.get("subtotal"), Some(FieldValue::Number(100.0)));
        assert_eq!(po.get("discountAmount"), Some(FieldValue::Number(10.0)));
        assert_eq!(po.get("taxAmount"), Some(FieldValue::Number(4.5)));
        assert_eq!(po.get("total"), Some(FieldValue::Number(94.5)));
    }

    #[test]
    fn test_derived_fields_are_read_only() {
        let mut po = PurchaseOrder::template();
        assert_eq!(
            po.put("total", FieldValue::Number(1.0)),
            Err(RecordError::ReadOnly("total".into()))
        );
        assert!(PurchaseOrder::field_def("total").unwrap().read_only);
    }

    #[test]
    fn test_amounts_flatten_on_the_wire() {
        let mut po = PurchaseOrder::template();
        po.put("quantity", FieldValue::Number(2.0)).unwrap();
        po.put("unitPrice", FieldValue::Number(3.0)).unwrap();
        let json = serde_json::to_value(&po).unwrap();
        assert_eq!(json["total"], 6.0);
        assert_eq!(json["supplierName"], "");
    }

    #[test]
    fn test_rules_catch_bad_percent_and_dates() {
        let po = PurchaseOrder {
            tax_percent: 140.0,
            order_date: "2024-06-10".into(),
            expected_date: "2024-06-01".into(),
            ..PurchaseOrder::default()
        };
        let fields: Vec<_> = po.rules().into_iter().map(|i| i.field).collect();
        assert_eq!(fields, vec!["taxPercent", "expectedDate"]);
    }
}
