use crate::shared::record::{
    check_date_order, inclusive_days, read_only, records_from_rows, unknown, FieldDef, FieldIssue,
    FieldValue, Record, RecordError, RecordId,
};
use serde::{Deserialize, Serialize};

pub const LEAVE_TYPES: &[&str] = &["Casual", "Sick", "Annual", "Maternity", "Unpaid"];
pub const LEAVE_STATUSES: &[&str] = &["Pending", "Approved", "Rejected"];

const FIELDS: &[FieldDef] = &[
    FieldDef::text("employeeName", "Employee").required(),
    FieldDef::text("department", "Department"),
    FieldDef::choice("leaveType", "Leave type", LEAVE_TYPES).required(),
    FieldDef::date("fromDate", "From").required(),
    FieldDef::date("toDate", "To").required(),
    FieldDef::number("days", "Days").read_only(),
    FieldDef::text("reason", "Reason"),
    FieldDef::choice("status", "Status", LEAVE_STATUSES),
];

/// Shown when the app runs without a server
const SAMPLES: &[&[(&str, &str)]] = &[
    &[
        ("employeeName", "Alice Moreno"),
        ("department", "Sales"),
        ("leaveType", "Annual"),
        ("fromDate", "2024-04-08"),
        ("toDate", "2024-04-12"),
        ("reason", "Family trip"),
        ("status", "Approved"),
    ],
    &[
        ("employeeName", "Ben Carter"),
        ("department", "Warehouse"),
        ("leaveType", "Sick"),
        ("fromDate", "2024-04-15"),
        ("toDate", "2024-04-16"),
    ],
    &[
        ("employeeName", "Chloe Singh"),
        ("department", "Support"),
        ("leaveType", "Casual"),
        ("fromDate", "2024-05-03"),
        ("toDate", "2024-05-03"),
        ("status", "Rejected"),
    ],
];

/// Employee leave request reviewed by HR
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    pub id: RecordId,
    pub employee_name: String,
    #[serde(default)]
    pub department: String,
    pub leave_type: String,
    pub from_date: String,
    pub to_date: String,
    #[serde(default)]
    pub days: f64,
    #[serde(default)]
    pub reason: String,
    pub status: String,
}

impl Default for LeaveRequest {
    fn default() -> Self {
        Self {
            id: 0,
            employee_name: String::new(),
            department: String::new(),
            leave_type: String::new(),
            from_date: String::new(),
            to_date: String::new(),
            days: 0.0,
            reason: String::new(),
            status: "Pending".to_string(),
        }
    }
}

impl LeaveRequest {
    fn recalculate(&mut self) {
        self.days = match inclusive_days(&self.from_date, &self.to_date) {
            Some(days) if days > 0 => days as f64,
            _ => 0.0,
        };
    }
}

impl Record for LeaveRequest {
    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn collection_name() -> &'static str {
        "leaves"
    }

    fn element_name() -> &'static str {
        "Leave request"
    }

    fn list_name() -> &'static str {
        "Leave requests"
    }

    fn fields() -> &'static [FieldDef] {
        FIELDS
    }

    fn get(&self, field: &str) -> Option<FieldValue> {
        let value = match field {
            "id" => FieldValue::Number(self.id as f64),
            "employeeName" => FieldValue::Text(self.employee_name.clone()),
            "department" => FieldValue::Text(self.department.clone()),
            "leaveType" => FieldValue::Text(self.leave_type.clone()),
            "fromDate" => FieldValue::Date(self.from_date.clone()),
            "toDate" => FieldValue::Date(self.to_date.clone()),
            "days" => FieldValue::Number(self.days),
            "reason" => FieldValue::Text(self.reason.clone()),
            "status" => FieldValue::Text(self.status.clone()),
            _ => return None,
        };
        Some(value)
    }

    fn put(&mut self, field: &str, value: FieldValue) -> Result<(), RecordError> {
        match field {
            "employeeName" => self.employee_name = value.into_text(field)?,
            "department" => self.department = value.into_text(field)?,
            "leaveType" => self.leave_type = value.into_text(field)?,
            "fromDate" => self.from_date = value.into_date(field)?,
            "toDate" => self.to_date = value.into_date(field)?,
            "reason" => self.reason = value.into_text(field)?,
            "status" => self.status = value.into_text(field)?,
            "days" => return Err(read_only(field)),
            _ => return Err(unknown(field)),
        }
        self.recalculate();
        Ok(())
    }

    fn sample_records() -> Vec<Self> {
        records_from_rows(SAMPLES).unwrap_or_default()
    }

    fn rules(&self) -> Vec<FieldIssue> {
        check_date_order(
            &self.from_date,
            &self.to_date,
            "toDate",
            "Leave cannot end before it starts",
        )
        .into_iter()
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_records_are_valid() {
        let samples = LeaveRequest::sample_records();
        assert_eq!(samples.len(), SAMPLES.len());
        for (record, id) in samples.iter().zip(1..) {
            assert_eq!(record.id, id);
            assert!(record.rules().is_empty(), "{:?}", record);
            for field in LeaveRequest::required_fields() {
                let value = record.get(field).unwrap();
                assert!(!value.is_blank(), "{} is blank in {:?}", field, record);
            }
        }
    }

    #[test]
    fn test_days_are_counted_inclusively() {
        let mut leave = LeaveRequest::template();
        leave.put("fromDate", FieldValue::Date("2024-03-04".into())).unwrap();
        assert_eq!(leave.days, 0.0);
        leave.put("toDate", FieldValue::Date("2024-03-08".into())).unwrap();
        assert_eq!(leave.get("days"), Some(FieldValue::Number(5.0)));
    }

    #[test]
    fn test_reversed_range() {
        let mut leave = LeaveRequest::template();
        leave.put("fromDate", FieldValue::Date("2024-03-08".into())).unwrap();
        leave.put("toDate", FieldValue::Date("2024-03-04".into())).unwrap();
        assert_eq!(leave.days, 0.0);
        assert_eq!(leave.rules()[0].field, "toDate");
    }
}
