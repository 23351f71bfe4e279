use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use typed_builder::TypedBuilder;

/// Storage settings describing where a dataset's files live.
///
/// The schema is open: keys this type does not know about are kept in
/// [`DataConfig::extra`] and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TypedBuilder)]
pub struct DataConfig {
    #[builder(setter(into))]
    storage_url: String,
    #[builder(default, setter(into, strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    container_name: Option<String>,
    #[builder(default, setter(into, strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sas_token: Option<String>,
    #[builder(setter(into))]
    data_folder: String,
    #[builder(default)]
    sequential: bool,
    #[builder(default)]
    generate_metadata: bool,
    #[builder(default, setter(into, strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[builder(setter(into))]
    #[serde(rename = "type")]
    kind: String,
    #[builder(setter(into))]
    annotation_format: String,
    #[builder(default)]
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl DataConfig {
    #[must_use]
    pub fn storage_url(&self) -> &str {
        &self.storage_url
    }

    #[must_use]
    pub fn container_name(&self) -> Option<&str> {
        self.container_name.as_deref()
    }

    #[must_use]
    pub fn sas_token(&self) -> Option<&str> {
        self.sas_token.as_deref()
    }

    #[must_use]
    pub fn data_folder(&self) -> &str {
        &self.data_folder
    }

    #[must_use]
    pub const fn sequential(&self) -> bool {
        self.sequential
    }

    #[must_use]
    pub const fn generate_metadata(&self) -> bool {
        self.generate_metadata
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Raw dataset type, checked when the config becomes a [`crate::NewDataset`].
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    #[must_use]
    pub fn annotation_format(&self) -> &str {
        &self.annotation_format
    }

    /// Keys outside the known schema.
    #[must_use]
    pub const fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }
}

impl TryFrom<Value> for DataConfig {
    type Error = ValidationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        serde_json::from_value(value).map_err(|e| ValidationError::new("data config", e.to_string()))
    }
}
