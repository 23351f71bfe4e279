use crate::attribute::{Attribute, AttributeRecord};
use crate::error::ValidationError;
use crate::validation::{
    Validate, convert_optional, impl_try_from_value, parse_optional_kind, validated,
};
use dataverse_domain::EntityId;
use dataverse_domain::kinds::{OntologyImageKind, OntologyPcdKind};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use typed_builder::TypedBuilder;

/// `#` followed by six alphanumerics. Not restricted to hex digits.
static COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9A-Za-z]{6}$").expect("color pattern is valid"));

/// A labeled, colored, ranked class of an ontology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "OntologyClassRecord")]
pub struct OntologyClass {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<EntityId>,
    name: String,
    color: String,
    rank: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    attributes: Option<Vec<Attribute>>,
}

impl OntologyClass {
    /// # Errors
    /// Returns a [`ValidationError`] on `color` unless it matches `#XXXXXX` with six
    /// ASCII alphanumerics.
    pub fn new(
        name: impl Into<String>,
        color: impl Into<String>,
        rank: i64,
    ) -> Result<Self, ValidationError> {
        validated(Self { id: None, name: name.into(), color: color.into(), rank, attributes: None })
    }

    /// Returns a copy carrying `attributes`.
    #[must_use]
    pub fn with_attributes(self, attributes: impl IntoIterator<Item = Attribute>) -> Self {
        Self { attributes: Some(attributes.into_iter().collect()), ..self }
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
    pub fn color(&self) -> &str {
        &self.color
    }

    #[must_use]
    pub const fn rank(&self) -> i64 {
        self.rank
    }

    #[must_use]
    pub fn attributes(&self) -> Option<&[Attribute]> {
        self.attributes.as_deref()
    }
}

impl Validate for OntologyClass {
    fn validate(&self) -> Result<(), ValidationError> {
        if COLOR.is_match(&self.color) {
            return Ok(());
        }
        Err(ValidationError::new(
            "color",
            format!(
                "color needs to start with `#` followed by 6 alphanumeric characters, got: {}",
                self.color
            ),
        ))
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct OntologyClassRecord {
    #[serde(default)]
    id: Option<EntityId>,
    name: String,
    color: String,
    rank: i64,
    #[serde(default)]
    attributes: Option<Vec<AttributeRecord>>,
}

impl TryFrom<OntologyClassRecord> for OntologyClass {
    type Error = ValidationError;

    fn try_from(record: OntologyClassRecord) -> Result<Self, Self::Error> {
        let attributes = convert_optional("attributes", record.attributes)?;
        validated(Self {
            id: record.id,
            name: record.name,
            color: record.color,
            rank: record.rank,
            attributes,
        })
    }
}

impl_try_from_value!(OntologyClass, OntologyClassRecord, "ontology class");

/// The taxonomy of classes used to label a project's data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[serde(try_from = "OntologyRecord")]
pub struct Ontology {
    #[builder(default, setter(skip))]
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<EntityId>,
    #[builder(setter(into))]
    name: String,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    image_type: Option<OntologyImageKind>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pcd_type: Option<OntologyPcdKind>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    classes: Option<Vec<OntologyClass>>,
}

impl Ontology {
    #[must_use]
    pub const fn id(&self) -> Option<EntityId> {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn image_type(&self) -> Option<OntologyImageKind> {
        self.image_type
    }

    #[must_use]
    pub const fn pcd_type(&self) -> Option<OntologyPcdKind> {
        self.pcd_type
    }

    #[must_use]
    pub fn classes(&self) -> &[OntologyClass] {
        self.classes.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct OntologyRecord {
    #[serde(default)]
    id: Option<EntityId>,
    name: String,
    #[serde(default)]
    image_type: Option<String>,
    #[serde(default)]
    pcd_type: Option<String>,
    #[serde(default)]
    classes: Option<Vec<OntologyClassRecord>>,
}

impl TryFrom<OntologyRecord> for Ontology {
    type Error = ValidationError;

    fn try_from(record: OntologyRecord) -> Result<Self, Self::Error> {
        let classes = record
            .classes
            .map(|classes| {
                classes
                    .into_iter()
                    .enumerate()
                    .map(|(index, class)| {
                        let name = class.name.clone();
                        OntologyClass::try_from(class).map_err(|e| {
                            let message = format!("{} (class `{name}`)", e.message());
                            ValidationError::new(e.field(), message).at_index("classes", index)
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        Ok(Self {
            id: record.id,
            name: record.name,
            image_type: parse_optional_kind("image_type", record.image_type.as_deref())?,
            pcd_type: parse_optional_kind("pcd_type", record.pcd_type.as_deref())?,
            classes,
        })
    }
}

impl_try_from_value!(Ontology, OntologyRecord, "ontology");
