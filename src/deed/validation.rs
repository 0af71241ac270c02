//! Input validation for deed submissions.
//!
//! Each field is checked against its rules in order and only the first
//! failing rule is reported, so the result maps every invalid field to a
//! single message. The browser form applies the same rules before submitting.

use chrono::{DateTime, NaiveDate};
use std::collections::BTreeMap;
use std::fmt;

use super::models::{CreateDeedRequest, FieldValue, NewDeed};

/// Validation error for a single form field.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// The request key that failed validation
    pub field: &'static str,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Collection of validation errors, at most one per field.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Field name to message mapping, as returned to clients.
    pub fn to_field_map(&self) -> BTreeMap<String, String> {
        self.errors
            .iter()
            .map(|e| (e.field.to_string(), e.message.clone()))
            .collect()
    }

    /// One-line summary naming the invalid fields.
    pub fn summary(&self) -> String {
        let fields: Vec<&str> = self.errors.iter().map(|e| e.field).collect();
        format!("Invalid: {}", fields.join(", "))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

// ============================================================================
// Field rules
// ============================================================================

/// Validate that a text field is present and not blank.
pub fn validate_required<'a>(
    value: Option<&'a str>,
    field: &'static str,
    message: &str,
    errors: &mut ValidationErrors,
) -> Option<&'a str> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Some(v),
        _ => {
            errors.add(ValidationError::new(field, message));
            None
        }
    }
}

/// Property size: required text that parses to a number greater than zero.
pub fn validate_property_size(value: Option<&FieldValue>, errors: &mut ValidationErrors) -> Option<f64> {
    const FIELD: &str = "propertySize";

    let Some(value) = value.filter(|v| !matches!(v, FieldValue::Text(s) if s.trim().is_empty())) else {
        errors.add(ValidationError::new(FIELD, "Property size is required"));
        return None;
    };

    match value.as_number() {
        Some(n) if n > 0.0 => Some(n),
        _ => {
            errors.add(ValidationError::new(FIELD, "Property size must be a valid number"));
            None
        }
    }
}

/// Sale amount: coerced to a number; blank or zero counts as missing.
pub fn validate_sale_amount(value: Option<&FieldValue>, errors: &mut ValidationErrors) -> Option<f64> {
    const FIELD: &str = "saleAmount";

    let Some(value) = value.filter(|v| !v.is_blank()) else {
        errors.add(ValidationError::new(FIELD, "Sale amount is required"));
        return None;
    };

    match value.as_number() {
        Some(n) if n > 0.0 => Some(n),
        Some(n) if n == 0.0 => {
            errors.add(ValidationError::new(FIELD, "Sale amount is required"));
            None
        }
        _ => {
            errors.add(ValidationError::new(FIELD, "Sale amount must be a valid number"));
            None
        }
    }
}

/// Sale date: required, parseable, and not after `today`.
pub fn validate_sale_date(
    value: Option<&str>,
    today: NaiveDate,
    errors: &mut ValidationErrors,
) -> Option<NaiveDate> {
    const FIELD: &str = "date";

    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        errors.add(ValidationError::new(FIELD, "Date is required"));
        return None;
    };

    let Some(date) = parse_sale_date(raw) else {
        errors.add(ValidationError::new(FIELD, "Date must be a valid date"));
        return None;
    };

    if date > today {
        errors.add(ValidationError::new(FIELD, "Date cannot be in the future"));
        return None;
    }

    Some(date)
}

/// Parse `YYYY-MM-DD`, `DD/MM/YYYY` or an RFC 3339 timestamp.
pub fn parse_sale_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%d/%m/%Y"))
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

impl CreateDeedRequest {
    /// Check every field and produce the validated deed.
    ///
    /// `today` bounds the sale date; callers pass the current local date.
    pub fn validate(&self, today: NaiveDate) -> Result<NewDeed, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let full_name = validate_required(
            self.full_name.as_deref(),
            "fullName",
            "Full name is required",
            &mut errors,
        );
        let father_name = validate_required(
            self.father_name.as_deref(),
            "fatherName",
            "Father's name is required",
            &mut errors,
        );
        let property_size = validate_property_size(self.property_size.as_ref(), &mut errors);
        let sale_amount = validate_sale_amount(self.sale_amount.as_ref(), &mut errors);
        let sale_date = validate_sale_date(self.date.as_deref(), today, &mut errors);

        match (full_name, father_name, property_size, sale_amount, sale_date) {
            (Some(full_name), Some(father_name), Some(property_size), Some(sale_amount), Some(sale_date))
                if errors.is_empty() =>
            {
                Ok(NewDeed {
                    full_name: full_name.to_string(),
                    father_name: father_name.to_string(),
                    property_size,
                    sale_amount,
                    sale_date,
                })
            }
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
    }

    fn valid_request() -> CreateDeedRequest {
        CreateDeedRequest {
            full_name: Some("Ravi Kumar".into()),
            father_name: Some("Mohan Kumar".into()),
            property_size: Some("1200".into()),
            sale_amount: Some(FieldValue::from(2500000.0)),
            date: Some("2025-01-15".into()),
        }
    }

    #[test]
    fn test_valid_request_produces_new_deed() {
        let deed = valid_request().validate(today()).unwrap();
        assert_eq!(deed.full_name, "Ravi Kumar");
        assert_eq!(deed.father_name, "Mohan Kumar");
        assert_eq!(deed.property_size, 1200.0);
        assert_eq!(deed.sale_amount, 2500000.0);
        assert_eq!(deed.sale_date, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
    }

    #[test]
    fn test_names_are_trimmed() {
        let mut request = valid_request();
        request.full_name = Some("  Ravi Kumar ".into());
        assert_eq!(request.validate(today()).unwrap().full_name, "Ravi Kumar");
    }

    #[test]
    fn test_empty_names_are_attributed() {
        let mut request = valid_request();
        request.full_name = Some("".into());
        request.father_name = Some("   ".into());

        let errors = request.validate(today()).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("fullName"), Some("Full name is required"));
        assert_eq!(errors.get("fatherName"), Some("Father's name is required"));
    }

    #[test]
    fn test_property_size_rules() {
        let cases = [
            (None, "Property size is required"),
            (Some(FieldValue::from("")), "Property size is required"),
            (Some(FieldValue::from("abc")), "Property size must be a valid number"),
            (Some(FieldValue::from("0")), "Property size must be a valid number"),
            (Some(FieldValue::from("-5")), "Property size must be a valid number"),
        ];

        for (value, expected) in cases {
            let mut request = valid_request();
            request.property_size = value;
            let errors = request.validate(today()).unwrap_err();
            assert_eq!(errors.len(), 1);
            assert_eq!(errors.get("propertySize"), Some(expected));
        }
    }

    #[test]
    fn test_sale_amount_rules() {
        let cases = [
            (None, "Sale amount is required"),
            (Some(FieldValue::from(0.0)), "Sale amount is required"),
            (Some(FieldValue::from("")), "Sale amount is required"),
            (Some(FieldValue::from("0")), "Sale amount is required"),
            (Some(FieldValue::from(" 0 ")), "Sale amount is required"),
            (Some(FieldValue::from("lots")), "Sale amount must be a valid number"),
            (Some(FieldValue::from(-100.0)), "Sale amount must be a valid number"),
        ];

        for (value, expected) in cases {
            let mut request = valid_request();
            request.sale_amount = value;
            let errors = request.validate(today()).unwrap_err();
            assert_eq!(errors.get("saleAmount"), Some(expected));
        }
    }

    #[test]
    fn test_sale_amount_accepts_numeric_text() {
        let mut request = valid_request();
        request.sale_amount = Some("750000".into());
        assert_eq!(request.validate(today()).unwrap().sale_amount, 750000.0);
    }

    #[test]
    fn test_date_rules() {
        let cases = [
            (None, "Date is required"),
            (Some(""), "Date is required"),
            (Some("not a date"), "Date must be a valid date"),
            (Some("2025-02-30"), "Date must be a valid date"),
            (Some("2025-07-01"), "Date cannot be in the future"),
        ];

        for (value, expected) in cases {
            let mut request = valid_request();
            request.date = value.map(String::from);
            let errors = request.validate(today()).unwrap_err();
            assert_eq!(errors.get("date"), Some(expected), "input {:?}", value);
        }
    }

    #[test]
    fn test_today_is_allowed() {
        let mut request = valid_request();
        request.date = Some("2025-06-30".into());
        assert!(request.validate(today()).is_ok());
    }

    #[test]
    fn test_parse_sale_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        assert_eq!(parse_sale_date("2025-01-15"), Some(expected));
        assert_eq!(parse_sale_date("15/1/2025"), Some(expected));
        assert_eq!(parse_sale_date("15/01/2025"), Some(expected));
        assert_eq!(parse_sale_date("2025-01-15T10:30:00+05:30"), Some(expected));
        assert_eq!(parse_sale_date("January 15"), None);
    }

    #[test]
    fn test_every_invalid_field_reported_once() {
        let errors = CreateDeedRequest::default().validate(today()).unwrap_err();
        let map = errors.to_field_map();

        assert_eq!(map.len(), 5);
        assert_eq!(
            errors.summary(),
            "Invalid: fullName, fatherName, propertySize, saleAmount, date"
        );
    }
}
