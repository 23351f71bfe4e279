use crate::error::ValidationError;
use crate::validation::{Validate, impl_try_from_value, validated};
use dataverse_domain::EntityId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Scalar carried by an option of an `option` attribute.
///
/// Typed input keeps its JSON type. Untyped text goes through [`OptionValue::parse`],
/// which resolves boolean first, then integer, then real, and falls back to text, so
/// `"true"` never turns into a number and `"1"` never turns into a boolean.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Boolean(bool),
    Integer(i64),
    Real(f64),
    Text(String),
}

impl OptionValue {
    /// Resolves untyped text: `true`/`false` (any ASCII case), then `i64`, then finite `f64`,
    /// otherwise the text itself.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("true") {
            return Self::Boolean(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return Self::Boolean(false);
        }
        if let Ok(integer) = trimmed.parse::<i64>() {
            return Self::Integer(integer);
        }
        match trimmed.parse::<f64>() {
            Ok(real) if real.is_finite() => Self::Real(real),
            _ => Self::Text(raw.to_owned()),
        }
    }

    /// Converts a JSON scalar, keeping its JSON type.
    ///
    /// # Errors
    /// Fails for `null`, arrays and objects.
    pub fn from_json(value: &Value) -> Result<Self, ValidationError> {
        match value {
            Value::Bool(flag) => Ok(Self::Boolean(*flag)),
            Value::Number(number) => number
                .as_i64()
                .map(Self::Integer)
                .or_else(|| number.as_f64().map(Self::Real))
                .ok_or_else(|| ValidationError::new("value", format!("unsupported number {number}"))),
            Value::String(text) => Ok(Self::Text(text.clone())),
            other => Err(ValidationError::new(
                "value",
                format!("expected a string, number or boolean, got: {other}"),
            )),
        }
    }

    /// Wire name of the scalar kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Boolean(_) => "boolean",
            Self::Integer(_) | Self::Real(_) => "number",
            Self::Text(_) => "string",
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(flag) => write!(f, "{flag}"),
            Self::Integer(integer) => write!(f, "{integer}"),
            Self::Real(real) => write!(f, "{real}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(flag: bool) -> Self {
        Self::Boolean(flag)
    }
}

impl From<i64> for OptionValue {
    fn from(integer: i64) -> Self {
        Self::Integer(integer)
    }
}

impl From<i32> for OptionValue {
    fn from(integer: i32) -> Self {
        Self::Integer(integer.into())
    }
}

impl From<f64> for OptionValue {
    fn from(real: f64) -> Self {
        Self::Real(real)
    }
}

impl From<&str> for OptionValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for OptionValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// A selectable value of an `option` attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AttributeOptionRecord")]
pub struct AttributeOption {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<EntityId>,
    value: OptionValue,
}

impl AttributeOption {
    /// # Errors
    /// Rejects non-finite reals.
    pub fn new(value: impl Into<OptionValue>) -> Result<Self, ValidationError> {
        validated(Self { id: None, value: value.into() })
    }

    #[must_use]
    pub const fn id(&self) -> Option<EntityId> {
        self.id
    }

    #[must_use]
    pub const fn value(&self) -> &OptionValue {
        &self.value
    }
}

impl Validate for AttributeOption {
    fn validate(&self) -> Result<(), ValidationError> {
        match self.value {
            OptionValue::Real(real) if !real.is_finite() => {
                Err(ValidationError::new("value", format!("expected a finite number, got: {real}")))
            },
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AttributeOptionRecord {
    #[serde(default)]
    id: Option<EntityId>,
    value: Value,
}

impl TryFrom<AttributeOptionRecord> for AttributeOption {
    type Error = ValidationError;

    fn try_from(record: AttributeOptionRecord) -> Result<Self, Self::Error> {
        let value = OptionValue::from_json(&record.value)?;
        validated(Self { id: record.id, value })
    }
}

impl_try_from_value!(AttributeOption, AttributeOptionRecord, "attribute option");
