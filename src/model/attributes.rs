//! # Category Attributes
//!
//! Each category declares typed attributes (e.g. a camera's "mount" as a
//! select, its "weight" as a number). Items store one typed value per
//! attribute. Untyped JSON from forms is converted and checked here, once,
//! at the boundary.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::AttributeError;

/// Declared type of an attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttributeKind {
    Text,
    Number,
    Select { options: Vec<String> },
    Date,
    Boolean,
}

impl AttributeKind {
    /// Select kind from a comma-separated option list (`"EF,RF,PL"`).
    pub fn select_from_csv(key: &str, options: &str) -> Result<Self, AttributeError> {
        let options: Vec<String> = options
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();
        if options.is_empty() {
            return Err(AttributeError::NoOptions(key.to_string()));
        }
        Ok(Self::Select { options })
    }

    fn expected(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "a number",
            Self::Select { .. } => "one of the listed options",
            Self::Date => "a date",
            Self::Boolean => "true or false",
        }
    }
}

/// A typed attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttributeValue {
    Text(String),
    Number(f64),
    Select(String),
    Date(NaiveDate),
    Boolean(bool),
}

impl AttributeValue {
    /// Display form used in generated names.
    pub fn display(&self) -> String {
        match self {
            Self::Text(s) | Self::Select(s) => s.clone(),
            Self::Number(n) => n.to_string(),
            Self::Date(d) => d.format("%Y-%m-%d").to_string(),
            Self::Boolean(b) => (if *b { "yes" } else { "no" }).to_string(),
        }
    }
}

/// One attribute declared by a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeDef {
    pub key: String,
    pub name: String,
    #[serde(flatten)]
    pub kind: AttributeKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub order: i32,
}

impl AttributeDef {
    /// Convert a raw form value into a typed one.
    ///
    /// `null` and empty strings count as absent and yield `Ok(None)`.
    pub fn coerce(&self, raw: &Value) -> Result<Option<AttributeValue>, AttributeError> {
        let wrong_kind = || AttributeError::WrongKind {
            key: self.key.clone(),
            expected: self.kind.expected(),
        };

        match raw {
            Value::Null => return Ok(None),
            Value::String(s) if s.trim().is_empty() => return Ok(None),
            _ => {}
        }

        let value = match (&self.kind, raw) {
            (AttributeKind::Text, Value::String(s)) => AttributeValue::Text(s.clone()),
            (AttributeKind::Number, Value::Number(n)) => {
                AttributeValue::Number(n.as_f64().ok_or_else(wrong_kind)?)
            }
            (AttributeKind::Number, Value::String(s)) => {
                AttributeValue::Number(s.trim().parse().map_err(|_| wrong_kind())?)
            }
            (AttributeKind::Select { options }, Value::String(s)) => {
                if !options.iter().any(|o| o == s) {
                    return Err(AttributeError::UnknownOption {
                        key: self.key.clone(),
                        value: s.clone(),
                    });
                }
                AttributeValue::Select(s.clone())
            }
            (AttributeKind::Date, Value::String(s)) => {
                let date = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
                    AttributeError::InvalidDate {
                        key: self.key.clone(),
                        value: s.clone(),
                    }
                })?;
                AttributeValue::Date(date)
            }
            (AttributeKind::Boolean, Value::Bool(b)) => AttributeValue::Boolean(*b),
            _ => return Err(wrong_kind()),
        };

        Ok(Some(value))
    }
}

/// An item category and its declared attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub attributes: Vec<AttributeDef>,
}

impl Category {
    /// Type-check a raw attribute map against this category.
    ///
    /// Unknown keys are rejected; required attributes must be present.
    /// A boolean attribute that is absent is stored as `false`, matching an
    /// unticked checkbox.
    pub fn coerce_attributes(
        &self,
        raw: &BTreeMap<String, Value>,
    ) -> Result<BTreeMap<String, AttributeValue>, AttributeError> {
        if let Some(unknown) = raw.keys().find(|k| !self.attributes.iter().any(|a| &a.key == *k)) {
            return Err(AttributeError::Unknown(unknown.clone()));
        }

        let mut typed = BTreeMap::new();
        for def in &self.attributes {
            let value = match raw.get(&def.key) {
                Some(v) => def.coerce(v)?,
                None => None,
            };
            match value {
                Some(v) => {
                    typed.insert(def.key.clone(), v);
                }
                None if def.kind == AttributeKind::Boolean => {
                    typed.insert(def.key.clone(), AttributeValue::Boolean(false));
                }
                None if def.required => return Err(AttributeError::Missing(def.key.clone())),
                None => {}
            }
        }
        Ok(typed)
    }

    /// Item name derived from the category and its first filled select.
    ///
    /// `"Cameras > Sony FX3"` when the lowest-order select attribute has a
    /// value, otherwise just `"Cameras"`.
    pub fn auto_name(&self, values: &BTreeMap<String, AttributeValue>) -> String {
        let mut selects: Vec<&AttributeDef> = self
            .attributes
            .iter()
            .filter(|a| matches!(a.kind, AttributeKind::Select { .. }))
            .filter(|a| values.contains_key(&a.key))
            .collect();
        selects.sort_by_key(|a| a.order);

        match selects.first().and_then(|a| values.get(&a.key)) {
            Some(value) => format!("{} > {}", self.name, value.display()),
            None => self.name.clone(),
        }
    }
}
