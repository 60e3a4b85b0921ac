use crate::shared::record::{
    check_date_order, records_from_rows, unknown, FieldDef, FieldIssue, FieldValue, Record,
    RecordError, RecordId,
};
use serde::{Deserialize, Serialize};

pub const PLANS: &[&str] = &["Basic", "Standard", "Premium", "Enterprise"];
pub const BILLING_CYCLES: &[&str] = &["Monthly", "Quarterly", "Yearly"];
pub const SUBSCRIPTION_STATUSES: &[&str] = &["Active", "Expired", "Cancelled"];

const FIELDS: &[FieldDef] = &[
    FieldDef::text("companyName", "Company").required(),
    FieldDef::choice("planName", "Plan", PLANS).required(),
    FieldDef::choice("billingCycle", "Billing cycle", BILLING_CYCLES),
    FieldDef::number("amount", "Amount").required(),
    FieldDef::date("startDate", "Start date").required(),
    FieldDef::date("endDate", "End date").required(),
    FieldDef::choice("status", "Status", SUBSCRIPTION_STATUSES),
];

/// Shown when the app runs without a server
const SAMPLES: &[&[(&str, &str)]] = &[
    &[
        ("companyName", "Corner Cafe"),
        ("planName", "Basic"),
        ("billingCycle", "Monthly"),
        ("amount", "29"),
        ("startDate", "2024-01-01"),
        ("endDate", "2024-01-31"),
    ],
    &[
        ("companyName", "Northside Grocers"),
        ("planName", "Premium"),
        ("billingCycle", "Yearly"),
        ("amount", "990"),
        ("startDate", "2024-02-15"),
        ("endDate", "2025-02-14"),
    ],
    &[
        ("companyName", "City Bakery"),
        ("planName", "Standard"),
        ("billingCycle", "Quarterly"),
        ("amount", "179"),
        ("startDate", "2023-10-01"),
        ("endDate", "2023-12-31"),
        ("status", "Expired"),
    ],
];

/// Tenant subscription managed by the super admin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: RecordId,
    pub company_name: String,
    pub plan_name: String,
    pub billing_cycle: String,
    pub amount: f64,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
}

impl Default for Subscription {
    fn default() -> Self {
        Self {
            id: 0,
            company_name: String::new(),
            plan_name: String::new(),
            billing_cycle: "Monthly".to_string(),
            amount: 0.0,
            start_date: String::new(),
            end_date: String::new(),
            status: "Active".to_string(),
        }
    }
}

impl Record for Subscription {
    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn collection_name() -> &'static str {
        "subscriptions"
    }

    fn element_name() -> &'static str {
        "Subscription"
    }

    fn list_name() -> &'static str {
        "Subscriptions"
    }

    fn fields() -> &'static [FieldDef] {
        FIELDS
    }

    fn get(&self, field: &str) -> Option<FieldValue> {
        let value = match field {
            "id" => FieldValue::Number(self.id as f64),
            "companyName" => FieldValue::Text(self.company_name.clone()),
            "planName" => FieldValue::Text(self.plan_name.clone()),
            "billingCycle" => FieldValue::Text(self.billing_cycle.clone()),
            "amount" => FieldValue::Number(self.amount),
            "startDate" => FieldValue::Date(self.start_date.clone()),
            "endDate" => FieldValue::Date(self.end_date.clone()),
            "status" => FieldValue::Text(self.status.clone()),
            _ => return None,
        };
        Some(value)
    }

    fn put(&mut self, field: &str, value: FieldValue) -> Result<(), RecordError> {
        match field {
            "companyName" => self.company_name = value.into_text(field)?,
            "planName" => self.plan_name = value.into_text(field)?,
            "billingCycle" => self.billing_cycle = value.into_text(field)?,
            "amount" => self.amount = value.into_number(field)?,
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
        if self.amount < 0.0 {
            issues.push(FieldIssue::new("amount", "Amount cannot be negative"));
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
        let samples = Subscription::sample_records();
        assert_eq!(samples.len(), SAMPLES.len());
        for (record, id) in samples.iter().zip(1..) {
            assert_eq!(record.id, id);
            assert!(record.rules().is_empty(), "{:?}", record);
            for field in Subscription::required_fields() {
                let value = record.get(field).unwrap();
                assert!(!value.is_blank(), "{} is blank in {:?}", field, record);
            }
        }
    }

    #[test]
    fn test_end_date_not_before_start() {
        let mut s = Subscription {
            company_name: "Corner Cafe".into(),
            plan_name: "Basic".into(),
            amount: 29.0,
            start_date: "2024-03-01".into(),
            end_date: "2024-02-01".into(),
            ..Subscription::default()
        };
        let fields: Vec<_> = s.rules().into_iter().map(|i| i.field).collect();
        assert_eq!(fields, vec!["endDate"]);

        s.end_date = "2024-03-01".into();
        assert!(s.rules().is_empty());

        s.amount = -1.0;
        let fields: Vec<_> = s.rules().into_iter().map(|i| i.field).collect();
        assert_eq!(fields, vec!["amount"]);
    }

    #[test]
    fn test_put_then_get_by_field_name() {
        let mut s = Subscription::default();
        s.put("companyName", FieldValue::Text("Northside".into())).unwrap();
        s.put("planName", FieldValue::Text("Premium".into())).unwrap();
        s.put("amount", FieldValue::Number(990.0)).unwrap();
        s.put("startDate", FieldValue::Date("2024-02-15".into())).unwrap();

        assert_eq!(s.get("companyName"), Some(FieldValue::Text("Northside".into())));
        assert_eq!(s.get("planName"), Some(FieldValue::Text("Premium".into())));
        assert_eq!(s.get("amount"), Some(FieldValue::Number(990.0)));
        assert_eq!(s.get("startDate"), Some(FieldValue::Date("2024-02-15".into())));
        assert_eq!(s.get("billingCycle"), Some(FieldValue::Text("Monthly".into())));
        assert_eq!(s.get("nope"), None);

        assert!(s.put("amount", FieldValue::Text("x".into())).is_err());
        assert_eq!(
            s.put("nope", FieldValue::Text("x".into())),
            Err(RecordError::UnknownField("nope".into()))
        );
    }
}
