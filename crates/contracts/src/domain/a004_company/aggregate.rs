use crate::shared::record::{
    records_from_rows, unknown, FieldDef, FieldIssue, FieldValue, Record, RecordError, RecordId,
};
use serde::{Deserialize, Serialize};

pub const COMPANY_STATUSES: &[&str] = &["Active", "Inactive"];

const FIELDS: &[FieldDef] = &[
    FieldDef::text("name", "Company name").required(),
    FieldDef::text("email", "Email").required(),
    FieldDef::text("phone", "Phone"),
    FieldDef::text("address", "Address"),
    FieldDef::text("planName", "Plan"),
    FieldDef::date("registeredOn", "Registered on"),
    FieldDef::choice("status", "Status", COMPANY_STATUSES),
];

/// Shown when the app runs without a server
const SAMPLES: &[&[(&str, &str)]] = &[
    &[
        ("name", "Corner Cafe"),
        ("email", "owner@cornercafe.example"),
        ("phone", "555-0101"),
        ("address", "12 Market St"),
        ("planName", "Basic"),
        ("registeredOn", "2023-11-20"),
    ],
    &[
        ("name", "Northside Grocers"),
        ("email", "admin@northside.example"),
        ("phone", "555-0144"),
        ("planName", "Premium"),
        ("registeredOn", "2024-02-15"),
    ],
    &[
        ("name", "City Bakery"),
        ("email", "hello@citybakery.example"),
        ("address", "3 Baker Lane"),
        ("planName", "Standard"),
        ("registeredOn", "2023-09-28"),
        ("status", "Inactive"),
    ],
];

/// Tenant company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub plan_name: String,
    #[serde(default)]
    pub registered_on: String,
    pub status: String,
}

impl Default for Company {
    fn default() -> Self {
        Self {
            id: 0,
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            plan_name: String::new(),
            registered_on: String::new(),
            status: "Active".to_string(),
        }
    }
}

impl Record for Company {
    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn collection_name() -> &'static str {
        "companies"
    }

    fn element_name() -> &'static str {
        "Company"
    }

    fn list_name() -> &'static str {
        "Companies"
    }

    fn fields() -> &'static [FieldDef] {
        FIELDS
    }

    fn get(&self, field: &str) -> Option<FieldValue> {
        let value = match field {
            "id" => FieldValue::Number(self.id as f64),
            "name" => FieldValue::Text(self.name.clone()),
            "email" => FieldValue::Text(self.email.clone()),
            "phone" => FieldValue::Text(self.phone.clone()),
            "address" => FieldValue::Text(self.address.clone()),
            "planName" => FieldValue::Text(self.plan_name.clone()),
            "registeredOn" => FieldValue::Date(self.registered_on.clone()),
            "status" => FieldValue::Text(self.status.clone()),
            _ => return None,
        };
        Some(value)
    }

    fn put(&mut self, field: &str, value: FieldValue) -> Result<(), RecordError> {
        match field {
            "name" => self.name = value.into_text(field)?,
            "email" => self.email = value.into_text(field)?,
            "phone" => self.phone = value.into_text(field)?,
            "address" => self.address = value.into_text(field)?,
            "planName" => self.plan_name = value.into_text(field)?,
            "registeredOn" => self.registered_on = value.into_date(field)?,
            "status" => self.status = value.into_text(field)?,
            _ => return Err(unknown(field)),
        }
        Ok(())
    }

    fn sample_records() -> Vec<Self> {
        records_from_rows(SAMPLES).unwrap_or_default()
    }

    fn rules(&self) -> Vec<FieldIssue> {
        let email = self.email.trim();
        if !email.is_empty() && !email.contains('@') {
            vec![FieldIssue::new("email", "Email address is not valid")]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_records_are_valid() {
        let samples = Company::sample_records();
        assert_eq!(samples.len(), SAMPLES.len());
        for (record, id) in samples.iter().zip(1..) {
            assert_eq!(record.id, id);
            assert!(record.rules().is_empty(), "{:?}", record);
            for field in Company::required_fields() {
                let value = record.get(field).unwrap();
                assert!(!value.is_blank(), "{} is blank in {:?}", field, record);
            }
        }
    }

    #[test]
    fn test_email_rule() {
        let mut c = Company::template();
        assert!(c.rules().is_empty());
        c.email = "shop.example.com".into();
        assert_eq!(c.rules()[0].field, "email");
        c.email = "owner@shop.example.com".into();
        assert!(c.rules().is_empty());
    }
}
