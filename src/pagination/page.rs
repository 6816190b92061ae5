//! Response body normalization
//!
//! List endpoints answer either with a bare JSON array or with
//! `{ "data": [...] }`. Both become a [`NormalizedPage`].

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which response form a page arrived in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseShape {
    /// `[ ... ]`
    Bare,
    /// `{ "data": [ ... ] }`
    Wrapped,
}

/// Entities of one page, independent of the response form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPage {
    pub items: Vec<Value>,
    pub shape: ResponseShape,
}

impl NormalizedPage {
    /// Normalize a raw response body
    pub fn from_body(body: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| Error::unexpected_format(format!("body is not JSON: {e}")))?;
        Self::from_value(value)
    }

    /// Normalize a parsed response body
    pub fn from_value(value: Value) -> Result<Self> {
        let found = match value {
            Value::Array(items) => {
                return Ok(Self {
                    items,
                    shape: ResponseShape::Bare,
                })
            }
            Value::Object(mut map) => match map.remove("data") {
                Some(Value::Array(items)) => {
                    return Ok(Self {
                        items,
                        shape: ResponseShape::Wrapped,
                    })
                }
                Some(other) => format!("object whose 'data' is {}", type_name(&other)),
                None => "object without a 'data' field".to_string(),
            },
            other => type_name(&other).to_string(),
        };

        Err(Error::unexpected_format(format!(
            "expected a JSON array or {{\"data\": [...]}}, got {found}"
        )))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Deserialize the entities into caller types
    pub fn items_as<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        self.items
            .iter()
            .map(|item| T::deserialize(item).map_err(Error::from))
            .collect()
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
