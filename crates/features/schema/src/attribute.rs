use crate::error::ValidationError;
use crate::option::{AttributeOption, AttributeOptionRecord};
use crate::validation::{Validate, convert_optional, impl_try_from_value, parse_kind, validated};
use dataverse_domain::EntityId;
use dataverse_domain::kinds::AttributeKind;
use serde::{Deserialize, Serialize};

/// A typed metadata field attachable to an ontology class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AttributeRecord")]
pub struct Attribute {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<EntityId>,
    name: String,
    #[serde(rename = "type")]
    kind: AttributeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<Vec<AttributeOption>>,
}

impl Attribute {
    /// Builds an attribute; `option` attributes must come with at least one option.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] on `options` when `kind` is [`AttributeKind::Option`]
    /// and `options` is absent or empty.
    pub fn new(
        name: impl Into<String>,
        kind: AttributeKind,
        options: Option<Vec<AttributeOption>>,
    ) -> Result<Self, ValidationError> {
        validated(Self { id: None, name: name.into(), kind, options })
    }

    /// Shorthand for an [`AttributeKind::Option`] attribute.
    ///
    /// # Errors
    /// Same as [`Attribute::new`].
    pub fn with_options(
        name: impl Into<String>,
        options: impl IntoIterator<Item = AttributeOption>,
    ) -> Result<Self, ValidationError> {
        Self::new(name, AttributeKind::Option, Some(options.into_iter().collect()))
    }

    #[must_use]
    pub const fn id(&self) -> Option<EntityId> {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn kind(&self) -> AttributeKind {
        self.kind
    }

    #[must_use]
    pub fn options(&self) -> Option<&[AttributeOption]> {
        self.options.as_deref()
    }
}

impl Validate for Attribute {
    fn validate(&self) -> Result<(), ValidationError> {
        let has_options = self.options.as_ref().is_some_and(|options| !options.is_empty());
        if self.kind == AttributeKind::Option && !has_options {
            return Err(ValidationError::new("options", "options required when type is OPTION"));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AttributeRecord {
    #[serde(default)]
    id: Option<EntityId>,
    name: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    options: Option<Vec<AttributeOptionRecord>>,
}

impl TryFrom<AttributeRecord> for Attribute {
    type Error = ValidationError;

    fn try_from(record: AttributeRecord) -> Result<Self, Self::Error> {
        let options = convert_optional("options", record.options)?;
        let kind = parse_kind("type", &record.kind)?;
        validated(Self { id: record.id, name: record.name, kind, options })
    }
}

impl_try_from_value!(Attribute, AttributeRecord, "attribute");
