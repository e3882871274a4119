//! Schema validation for incoming generation requests.
//!
//! The body arrives as untyped JSON; every field is checked and ALL
//! violations are collected into one field-level report, which the route
//! returns verbatim in the 400 body.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// Accepted interview focus values. "behavioural" is kept alongside
/// "behavioral" for UK-spelling clients.
pub const INTERVIEW_TYPES: &[&str] = &[
    "technical",
    "behavioral",
    "behavioural",
    "balanced",
    "mixed",
];

/// Field-level validation report, serialized as
/// `{ "formErrors": [], "fieldErrors": { "role": ["..."] } }`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    #[serde(rename = "formErrors")]
    pub form_errors: Vec<String>,
    #[serde(rename = "fieldErrors")]
    pub field_errors: BTreeMap<&'static str, Vec<String>>,
}

impl ValidationReport {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.field_errors
            .entry(field)
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.form_errors.is_empty() && self.field_errors.is_empty()
    }
}

/// A generation request that passed validation, with `amount` coerced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterviewRequest {
    pub role: String,
    pub level: String,
    /// Comma-separated; may be empty.
    pub techstack: String,
    pub interview_type: String,
    pub amount: u32,
    pub user_id: String,
}

pub fn validate_interview_request(body: &Value) -> Result<InterviewRequest, ValidationReport> {
    let mut report = ValidationReport::default();

    let role = required_string(body, "role", "Role is required.", &mut report);
    let level = required_string(body, "level", "Level is required.", &mut report);

    // Any string is fine here, including empty — but it must be a string.
    let techstack = match body.get("techstack").and_then(Value::as_str) {
        Some(s) => Some(s.to_string()),
        None => {
            report.push("techstack", "Techstack must be a string.");
            None
        }
    };

    let interview_type = match body.get("type").and_then(Value::as_str) {
        Some(t) if INTERVIEW_TYPES.contains(&t) => Some(t.to_string()),
        Some(_) | None => {
            report.push(
                "type",
                format!("Type must be one of: {}.", INTERVIEW_TYPES.join(", ")),
            );
            None
        }
    };

    let amount = match coerce_positive_int(body.get("amount")) {
        Some(n) => Some(n),
        None => {
            report.push("amount", "Amount must be a positive number.");
            None
        }
    };

    let user_id = required_string(body, "userid", "User ID is required.", &mut report);

    match (role, level, techstack, interview_type, amount, user_id) {
        (Some(role), Some(level), Some(techstack), Some(interview_type), Some(amount), Some(user_id))
            if report.is_empty() =>
        {
            Ok(InterviewRequest {
                role,
                level,
                techstack,
                interview_type,
                amount,
                user_id,
            })
        }
        _ => Err(report),
    }
}

fn required_string(
    body: &Value,
    field: &'static str,
    message: &str,
    report: &mut ValidationReport,
) -> Option<String> {
    match body.get(field).and_then(Value::as_str) {
        Some(s) if !s.is_empty() => Some(s.to_string()),
        _ => {
            report.push(field, message);
            None
        }
    }
}

/// Coerces a JSON number or numeric string into a positive integer.
/// Floats, zero, negatives and garbage strings are rejected.
fn coerce_positive_int(value: Option<&Value>) -> Option<u32> {
    match value? {
        Value::Number(n) => {
            let n = n.as_u64().filter(|&n| n > 0)?;
            u32::try_from(n).ok()
        }
        Value::String(s) => s.trim().parse::<u32>().ok().filter(|&n| n > 0),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_body() -> Value {
        json!({
            "role": "Backend Engineer",
            "level": "Senior",
            "techstack": "Rust, Postgres",
            "type": "technical",
            "amount": 5,
            "userid": "user-1"
        })
    }

    #[test]
    fn accepts_a_valid_request() {
        let request = validate_interview_request(&valid_body()).expect("valid");
        assert_eq!(request.role, "Backend Engineer");
        assert_eq!(request.amount, 5);
        assert_eq!(request.user_id, "user-1");
    }

    #[test]
    fn empty_body_reports_every_field() {
        let report = validate_interview_request(&json!({})).unwrap_err();
        for field in ["role", "level", "techstack", "type", "amount", "userid"] {
            assert!(
                report.field_errors.contains_key(field),
                "missing report for {field}"
            );
        }
    }

    #[test]
    fn all_five_types_are_accepted() {
        for t in INTERVIEW_TYPES {
            let mut body = valid_body();
            body["type"] = json!(t);
            assert!(validate_interview_request(&body).is_ok(), "type {t}");
        }
    }

    #[test]
    fn unknown_type_is_rejected() {
        let mut body = valid_body();
        body["type"] = json!("casual");
        let report = validate_interview_request(&body).unwrap_err();
        assert!(report.field_errors.contains_key("type"));
    }

    #[test]
    fn amount_as_numeric_string_is_coerced() {
        let mut body = valid_body();
        body["amount"] = json!("5");
        let request = validate_interview_request(&body).expect("coerced");
        assert_eq!(request.amount, 5);
    }

    #[test]
    fn bad_amounts_are_rejected() {
        for bad in [json!(0), json!(-3), json!(2.5), json!("abc"), json!(null)] {
            let mut body = valid_body();
            body["amount"] = bad.clone();
            let report = validate_interview_request(&body).unwrap_err();
            assert!(report.field_errors.contains_key("amount"), "amount {bad}");
        }
    }

    #[test]
    fn empty_techstack_is_allowed() {
        let mut body = valid_body();
        body["techstack"] = json!("");
        assert!(validate_interview_request(&body).is_ok());
    }

    #[test]
    fn empty_role_is_rejected() {
        let mut body = valid_body();
        body["role"] = json!("");
        let report = validate_interview_request(&body).unwrap_err();
        assert_eq!(report.field_errors["role"], vec!["Role is required."]);
    }
}
