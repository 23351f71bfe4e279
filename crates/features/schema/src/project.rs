use crate::dataset::{Dataset, DatasetClient, DatasetRequest, NewDataset};
use crate::error::{DataverseError, ValidationError};
use crate::ontology::{Ontology, OntologyRecord};
use crate::sensor::{Sensor, SensorRecord};
use crate::validation::{convert_all, impl_try_from_value};
use dataverse_domain::EntityId;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};
use typed_builder::TypedBuilder;

/// A labeling project: one ontology and the sensors that feed it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[serde(try_from = "ProjectRecord")]
pub struct Project {
    #[builder(default, setter(skip))]
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<EntityId>,
    #[builder(setter(into))]
    name: String,
    #[builder(default, setter(into, strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[builder(default, setter(into, strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    ego_car: Option<String>,
    ontology: Ontology,
    sensors: Vec<Sensor>,
}

impl Project {
    #[must_use]
    pub const fn id(&self) -> Option<EntityId> {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn ego_car(&self) -> Option<&str> {
        self.ego_car.as_deref()
    }

    #[must_use]
    pub const fn ontology(&self) -> &Ontology {
        &self.ontology
    }

    #[must_use]
    pub fn sensors(&self) -> &[Sensor] {
        &self.sensors
    }

    /// Creates a dataset in this project through `client`.
    ///
    /// The request is checked first: it must name at least one sensor, every sensor
    /// must belong to this project and no extra key may shadow a request field. Only then is `client` called, exactly once. Its
    /// answer is returned as is.
    ///
    /// # Errors
    /// * [`DataverseError::Validation`] when the request is rejected locally; `client` is
    ///   not touched.
    /// * [`DataverseError::ClientConnection`] when `client` fails, with its error as the
    ///   source.
    #[instrument(
        skip_all,
        fields(project = %self.name, dataset = %dataset.name(), sensors = dataset.sensors().len())
    )]
    pub fn create_dataset<C>(&self, client: &C, dataset: &NewDataset) -> Result<Dataset, DataverseError>
    where
        C: DatasetClient + ?Sized,
    {
        if let Err(e) = self.check_sensors(dataset.sensors()).and_then(|()| dataset.check_extra()) {
            let err = DataverseError::from(e);
            warn!(error.kind = err.kind(), error = %err, "dataset request rejected");
            return Err(err);
        }

        let request = DatasetRequest::new(self, dataset);
        let created = client.create_dataset(&request).map_err(|e| {
            let err = DataverseError::connection(e, "Failed to create the dataset");
            warn!(error.kind = err.kind(), error = %err, "dataset creation failed");
            err
        })?;

        debug!(id = ?created.id(), status = %created.status(), "dataset created");
        Ok(created)
    }

    fn check_sensors(&self, requested: &[Sensor]) -> Result<(), ValidationError> {
        if requested.is_empty() {
            return Err(ValidationError::new("sensors", "at least one sensor is required"));
        }

        for (index, sensor) in requested.iter().enumerate() {
            if !self.sensors.contains(sensor) {
                return Err(ValidationError::new(
                    "",
                    format!(
                        "sensor `{}` ({}) is not part of project `{}`",
                        sensor.name(),
                        sensor.kind(),
                        self.name
                    ),
                )
                .at_index("sensors", index));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProjectRecord {
    #[serde(default)]
    id: Option<EntityId>,
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    ego_car: Option<String>,
    ontology: OntologyRecord,
    sensors: Vec<SensorRecord>,
}

impl TryFrom<ProjectRecord> for Project {
    type Error = ValidationError;

    fn try_from(record: ProjectRecord) -> Result<Self, Self::Error> {
        let ontology = Ontology::try_from(record.ontology).map_err(|e| e.nested("ontology"))?;
        let sensors = convert_all("sensors", record.sensors)?;
        Ok(Self {
            id: record.id,
            name: record.name,
            description: record.description,
            ego_car: record.ego_car,
            ontology,
            sensors,
        })
    }
}

impl_try_from_value!(Project, ProjectRecord, "project");
