//! Translation of tracker column values into project field updates.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{MigrateError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldType {
    Number,
    Iteration,
    SingleSelect,
    Text,
    Date,
}

/// A resolved value, ready to go under the field type's value key.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    Number(i64),
    Text(String),
    Null,
}

type Converter = fn(&FieldValue, Option<&str>) -> Result<Option<TypedValue>>;

impl FieldType {
    /// Key of the `value` object in `updateProjectV2ItemFieldValue`.
    pub fn value_key(self) -> &'static str {
        match self {
            FieldType::Number => "number",
            FieldType::Iteration => "iterationId",
            FieldType::SingleSelect => "singleSelectOptionId",
            FieldType::Text => "text",
            FieldType::Date => "date",
        }
    }

    fn converter(self) -> Converter {
        match self {
            FieldType::Number => convert_number,
            FieldType::SingleSelect => convert_single_select,
            FieldType::Iteration | FieldType::Text | FieldType::Date => convert_passthrough,
        }
    }
}

/// Target project field for one tracker column.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldValue {
    #[serde(default)]
    pub github_field_id: Option<String>,
    pub github_field_type: FieldType,
    #[serde(default)]
    pub mappings: IndexMap<String, String>,
    /// Column name, filled in after loading for error messages.
    #[serde(skip)]
    pub column: String,
}

impl FieldValue {
    /// Resolve a raw column value. `None` means the update is skipped.
    pub fn resolve(&self, raw: Option<&str>) -> Result<Option<TypedValue>> {
        if self.github_field_id.is_none() {
            return Ok(None);
        }
        (self.github_field_type.converter())(self, raw)
    }

    /// The `value` object for the update mutation.
    pub fn payload(&self, value: &TypedValue) -> Value {
        let inner = match value {
            TypedValue::Number(n) => json!(n),
            TypedValue::Text(s) => json!(s),
            TypedValue::Null => Value::Null,
        };
        let mut value = serde_json::Map::new();
        value.insert(self.github_field_type.value_key().to_string(), inner);
        Value::Object(value)
    }
}

fn raw_value(raw: Option<&str>) -> TypedValue {
    raw.map_or(TypedValue::Null, |s| TypedValue::Text(s.to_string()))
}

fn convert_passthrough(_field: &FieldValue, raw: Option<&str>) -> Result<Option<TypedValue>> {
    Ok(Some(raw_value(raw)))
}

// 2^63 itself is out of range, hence the half-open interval.
const I64_LOWER: f64 = i64::MIN as f64;
const I64_UPPER: f64 = i64::MAX as f64;

fn convert_number(field: &FieldValue, raw: Option<&str>) -> Result<Option<TypedValue>> {
    let Some(s) = raw.filter(|s| !s.is_empty()) else {
        return Ok(Some(raw_value(raw)));
    };
    let trimmed = s.trim();
    let parsed = trimmed.parse::<i64>().ok().or_else(|| {
        // Exports sometimes carry integral estimates as "3.0".
        trimmed
            .parse::<f64>()
            .ok()
            .filter(|f| f.fract() == 0.0 && (I64_LOWER..I64_UPPER).contains(f))
            .map(|f| f as i64)
    });
    parsed
        .map(|n| Some(TypedValue::Number(n)))
        .ok_or_else(|| MigrateError::InvalidNumber {
            field: field.column.clone(),
            value: s.to_string(),
        })
}

fn convert_single_select(field: &FieldValue, raw: Option<&str>) -> Result<Option<TypedValue>> {
    Ok(raw
        .and_then(|key| field.mappings.get(key))
        .map(|option| TypedValue::Text(option.clone())))
}
