// ABOUTME: Food detail record fetched from the detail service
// ABOUTME: Keeps name, energy and description typed and passes any other fields through
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Descriptive and nutritional data for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodDetail {
    /// Display name
    pub name: String,
    /// Energy per serving in kilocalories
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub kcal: f64,
    /// Free-text description
    #[serde(default)]
    pub description: String,
    /// Any further service-provided fields, untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FoodDetail {
    /// Look up a passthrough field by name
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}

// Decimal columns often come back serialized as strings ("52.00")
fn number_or_numeric_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| de::Error::custom("kcal is not representable as f64")),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| de::Error::custom(format!("kcal is not numeric: {e}"))),
        other => Err(de::Error::custom(format!(
            "kcal must be a number, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extra_fields_pass_through() {
        let detail: FoodDetail = serde_json::from_value(json!({
            "id": 3,
            "name": "Apple",
            "kcal": 52,
            "description": "Crisp and sweet",
            "protein": 0.3
        }))
        .unwrap();

        assert_eq!(detail.name, "Apple");
        assert!((detail.kcal - 52.0).abs() < f64::EPSILON);
        assert_eq!(detail.field("protein"), Some(&json!(0.3)));
        assert_eq!(detail.field("id"), Some(&json!(3)));
        assert!(detail.field("name").is_none());
    }

    #[test]
    fn test_decimal_string_kcal() {
        let detail: FoodDetail =
            serde_json::from_value(json!({"name": "Rice", "kcal": "130.50"})).unwrap();
        assert!((detail.kcal - 130.5).abs() < f64::EPSILON);
        assert_eq!(detail.description, "");
    }

    #[test]
    fn test_missing_kcal_is_rejected() {
        let result: Result<FoodDetail, _> =
            serde_json::from_value(json!({"name": "Mystery", "description": "?"}));
        assert!(result.is_err());
    }
}
