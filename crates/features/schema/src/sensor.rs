use crate::error::ValidationError;
use crate::validation::{impl_try_from_value, parse_kind};
use dataverse_domain::EntityId;
use dataverse_domain::kinds::SensorKind;
use serde::{Deserialize, Serialize};

/// A named data-capture channel of a project.
///
/// Two sensors are the same sensor when id, name and type all match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "SensorRecord")]
pub struct Sensor {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<EntityId>,
    name: String,
    #[serde(rename = "type")]
    kind: SensorKind,
}

impl Sensor {
    pub fn new(name: impl Into<String>, kind: SensorKind) -> Self {
        Self { id: None, name: name.into(), kind }
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
    pub const fn kind(&self) -> SensorKind {
        self.kind
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SensorRecord {
    #[serde(default)]
    id: Option<EntityId>,
    name: String,
    #[serde(rename = "type")]
    kind: String,
}

impl TryFrom<SensorRecord> for Sensor {
    type Error = ValidationError;

    fn try_from(record: SensorRecord) -> Result<Self, Self::Error> {
        Ok(Self { id: record.id, name: record.name, kind: parse_kind("type", &record.kind)? })
    }
}

impl_try_from_value!(Sensor, SensorRecord, "sensor");
