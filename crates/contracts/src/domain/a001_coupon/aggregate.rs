use crate::shared::pricing::is_valid_percent;
use crate::shared::record::{
    check_date_order, records_from_rows, unknown, FieldDef, FieldIssue, FieldValue, Record,
    RecordError, RecordId,
};
use serde::{Deserialize, Serialize};

pub const DISCOUNT_TYPES: &[&str] = &["Percentage", "Fixed"];
pub const COUPON_STATUSES: &[&str] = &["Active", "Inactive"];

const FIELDS: &[FieldDef] = &[
    FieldDef::text("couponCode", "Coupon code").required(),
    FieldDef::text("description", "Description"),
    FieldDef::choice("discountType", "Discount type", DISCOUNT_TYPES),
    FieldDef::number("discountAmount", "Discount").required(),
    FieldDef::number("minPurchase", "Minimum purchase"),
    FieldDef::date("startDate", "Valid from").required(),
    FieldDef::date("endDate", "Valid to").required(),
    FieldDef::choice("status", "Status", COUPON_STATUSES),
];

/// Shown when the app runs without a server
const SAMPLES: &[&[(&str, &str)]] = &[
    &[
        ("couponCode", "WELCOME10"),
        ("description", "New customer discount"),
        ("discountType", "Percentage"),
        ("discountAmount", "10"),
        ("minPurchase", "50"),
        ("startDate", "2024-01-01"),
        ("endDate", "2024-12-31"),
    ],
    &[
        ("couponCode", "FLAT25"),
        ("description", "Flat discount on large orders"),
        ("discountType", "Fixed"),
        ("discountAmount", "25"),
        ("minPurchase", "200"),
        ("startDate", "2024-03-01"),
        ("endDate", "2024-06-30"),
    ],
    &[
        ("couponCode", "SUMMER15"),
        ("discountType", "Percentage"),
        ("discountAmount", "15"),
        ("startDate", "2024-06-01"),
        ("endDate", "2024-08-31"),
        ("status", "Inactive"),
    ],
];

/// Discount coupon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    pub id: RecordId,
    pub coupon_code: String,
    #[serde(default)]
    pub description: String,
    pub discount_type: String,
    pub discount_amount: f64,
    #[serde(default)]
    pub min_purchase: f64,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
}

impl Default for Coupon {
    fn default() -> Self {
        Self {
            id: 0,
            coupon_code: String::new(),
            description: String::new(),
            discount_type: "Percentage".to_string(),
            discount_amount: 0.0,
            min_purchase: 0.0,
            start_date: String::new(),
            end_date: String::new(),
            status: "Active".to_string(),
        }
    }
}

impl Record for Coupon {
    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn collection_name() -> &'static str {
        "coupons"
    }

    fn element_name() -> &'static str {
        "Coupon"
    }

    fn list_name() -> &'static str {
        "Coupons"
    }

    fn fields() -> &'static [FieldDef] {
        FIELDS
    }

    fn get(&self, field: &str) -> Option<FieldValue> {
        let value = match field {
            "id" => FieldValue::Number(self.id as f64),
            "couponCode" => FieldValue::Text(self.coupon_code.clone()),
            "description" => FieldValue::Text(self.description.clone()),
            "discountType" => FieldValue::Text(self.discount_type.clone()),
            "discountAmount" => FieldValue::Number(self.discount_amount),
            "minPurchase" => FieldValue::Number(self.min_purchase),
            "startDate" => FieldValue::Date(self.start_date.clone()),
            "endDate" => FieldValue::Date(self.end_date.clone()),
            "status" => FieldValue::Text(self.status.clone()),
            _ => return None,
        };
        Some(value)
    }

    fn put(&mut self, field: &str, value: FieldValue) -> Result<(), RecordError> {
        match field {
            "couponCode" => self.coupon_code = value.into_text(field)?,
            "description" => self.description = value.into_text(field)?,
            "discountType" => self.discount_type = value.into_text(field)?,
            "discountAmount" => self.discount_amount = value.into_number(field)?,
            "minPurchase" => self.min_purchase = value.into_number(field)?,
            "startDate" => self.start_date = value.into_date(field)?,
            "endDate" => self.end_date = value.into_date(field)?,
            "status" => self.status = value.into_text(field)?,
            _ => return Err(unknown(field)),
        }
        Ok(())
    }

    fn sample_records() -> Vec<Self> {
        records_from_rows(SAMPLES).unwrap_or_default()
    }

    fn rules(&self) -> Vec<FieldIssue> {
        let mut issues = Vec::new();
        if self.discount_amount < 0.0 {
            issues.push(FieldIssue::new("discountAmount", "Discount cannot be negative"));
        } else if self.discount_type == "Percentage" && !is_valid_percent(self.discount_amount) {
            issues.push(FieldIssue::new(
                "discountAmount",
                "Percentage discount must be between 0 and 100",
            ));
        }
        if self.min_purchase < 0.0 {
            issues.push(FieldIssue::new("minPurchase", "Minimum purchase cannot be negative"));
        }
        issues.extend(check_date_order(
            &self.start_date,
            &self.end_date,
            "endDate",
            "End date must not be before start date",
        ));
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_records_are_valid() {
        let samples = Coupon::sample_records();
        assert_eq!(samples.len(), SAMPLES.len());
        for (record, id) in samples.iter().zip(1..) {
            assert_eq!(record.id, id);
            assert!(record.rules().is_empty(), "{:?}", record);
            for field in Coupon::required_fields() {
                let value = record.get(field).unwrap();
                assert!(!value.is_blank(), "{} is blank in {:?}", field, record);
            }
        }
    }

    #[test]
    fn test_wire_shape_is_camel_case() {
        let json = r#"{"id":7,"couponCode":"SAVE10","discountType":"Fixed","discountAmount":10,
            "startDate":"2024-01-01","endDate":"2024-02-01","status":"Active"}"#;
        let coupon: Coupon = serde_json::from_str(json).unwrap();
        assert_eq!(coupon.id, 7);
        assert_eq!(coupon.coupon_code, "SAVE10");
        assert_eq!(coupon.min_purchase, 0.0);
    }

    #[test]
    fn test_required_fields() {
        assert_eq!(
            Coupon::required_fields(),
            vec!["couponCode", "discountAmount", "startDate", "endDate"]
        );
    }

    #[test]
    fn test_rules() {
        let mut c = Coupon {
            discount_amount: 120.0,
            start_date: "2024-05-01".into(),
            end_date: "2024-04-01".into(),
            ..Coupon::default()
        };
        let fields: Vec<_> = c.rules().into_iter().map(|i| i.field).collect();
        assert_eq!(fields, vec!["discountAmount", "endDate"]);

        c.discount_type = "Fixed".into();
        c.end_date = "2024-05-01".into();
        assert!(c.rules().is_empty());
    }

    #[test]
    fn test_put_type_mismatch() {
        let mut c = Coupon::default();
        assert!(c.put("discountAmount", FieldValue::Text("x".into())).is_err());
        assert_eq!(
            c.put("nope", FieldValue::Text("x".into())),
            Err(RecordError::UnknownField("nope".into()))
        );
    }

    #[test]
    fn test_one_bad_row_fails_the_list() {
        let bad_number: &[&[(&str, &str)]] = &[&[("couponCode", "A")], &[("discountAmount", "ten")]];
        assert!(matches!(
            records_from_rows::<Coupon>(bad_number),
            Err(RecordError::InvalidNumber { .. })
        ));

        let bad_field: &[&[(&str, &str)]] = &[&[("nope", "x")]];
        assert_eq!(
            records_from_rows::<Coupon>(bad_field),
            Err(RecordError::UnknownField("nope".into()))
        );
    }
}
