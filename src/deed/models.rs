use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A persisted sale deed record.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema, sqlx::FromRow)]
pub struct Deed {
    #[schema(example = "f1e2d3c4-b5a6-7890-1234-567890abcdef")]
    pub id: Uuid,
    #[schema(example = "Ravi Kumar")]
    pub full_name: String,
    #[schema(example = "Mohan Kumar")]
    pub father_name: String,
    #[schema(example = 1200.0)]
    pub property_size: f64,
    #[schema(example = 2500000.0)]
    pub sale_amount: f64,
    #[schema(example = "2025-01-15")]
    pub sale_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated deed input, the only shape the record store accepts.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDeed {
    pub full_name: String,
    pub father_name: String,
    pub property_size: f64,
    pub sale_amount: f64,
    pub sale_date: NaiveDate,
}

/// A form value sent either as JSON text or as a JSON number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Whether the value counts as absent (blank text or the number zero).
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Number(n) => *n == 0.0,
            FieldValue::Text(s) => s.trim().is_empty(),
        }
    }

    /// Numeric interpretation, `None` when the text is not a finite number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) if n.is_finite() => Some(*n),
            FieldValue::Number(_) => None,
            FieldValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

/// Request body for `POST /api/createdeed`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDeedRequest {
    #[schema(example = "Ravi Kumar")]
    pub full_name: Option<String>,
    #[schema(example = "Mohan Kumar")]
    pub father_name: Option<String>,
    #[schema(value_type = Option<String>, example = "1200")]
    pub property_size: Option<FieldValue>,
    #[schema(value_type = Option<f64>, example = 2500000)]
    pub sale_amount: Option<FieldValue>,
    /// Sale date as YYYY-MM-DD or DD/MM/YYYY; defaults to today.
    #[schema(example = "2025-01-15")]
    pub date: Option<String>,
}

impl CreateDeedRequest {
    /// Names of the hard-required fields that are absent or blank, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.full_name.as_deref().map_or(true, |s| s.trim().is_empty()) {
            missing.push("fullName");
        }
        if self.father_name.as_deref().map_or(true, |s| s.trim().is_empty()) {
            missing.push("fatherName");
        }
        if self.property_size.as_ref().map_or(true, FieldValue::is_blank) {
            missing.push("propertySize");
        }
        if self.sale_amount.as_ref().map_or(true, FieldValue::is_blank) {
            missing.push("saleAmount");
        }
        missing
    }
}
