//! Request bodies sent to the platform.
//!
//! Payloads borrow from the entities they describe. Local ids are never sent for
//! entities being created; existing entities are referenced by their remote id only.

use dataverse_domain::EntityId;
use crate::upload::LocalFile;
use dataverse_domain::kinds::{
    AnnotationFormat, AttributeKind, DataSource, DatasetKind, DatasetStatus, OntologyImageKind, OntologyPcdKind,
    SensorKind,
};
use dataverse_schema::{
    Attribute, AttributeOption, DatasetRequest, Ontology, OntologyClass, OptionValue, Sensor, ValidationError,
};
use serde::Serialize;
use serde_json::{Map, Value};

/// Body of a project creation call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectPayload<'a> {
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    pub ontology_data: OntologyPayload<'a>,
    pub sensor_data: Vec<SensorPayload<'a>>,
}

impl<'a> ProjectPayload<'a> {
    #[must_use]
    pub fn compose(
        name: &'a str,
        ontology: &'a Ontology,
        sensors: &'a [Sensor],
        description: Option<&'a str>,
    ) -> Self {
        Self {
            name,
            description,
            ontology_data: OntologyPayload::from(ontology),
            sensor_data: sensors.iter().map(SensorPayload::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OntologyPayload<'a> {
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_type: Option<OntologyImageKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pcd_type: Option<OntologyPcdKind>,
    pub ontology_classes_data: Vec<ClassPayload<'a>>,
}

impl<'a> From<&'a Ontology> for OntologyPayload<'a> {
    fn from(ontology: &'a Ontology) -> Self {
        Self {
            name: ontology.name(),
            image_type: ontology.image_type(),
            pcd_type: ontology.pcd_type(),
            ontology_classes_data: (1..)
                .zip(ontology.classes())
                .map(|(rank, class)| ClassPayload::ranked(class, rank))
                .collect(),
        }
    }
}

/// An ontology class. New classes are ranked by their position in the ontology,
/// starting at 1; the rank a class was built with is not sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassPayload<'a> {
    pub name: &'a str,
    pub color: &'a str,
    pub rank: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_data: Option<Vec<AttributePayload<'a>>>,
}

impl<'a> ClassPayload<'a> {
    #[must_use]
    pub fn ranked(class: &'a OntologyClass, rank: i64) -> Self {
        Self {
            name: class.name(),
            color: class.color(),
            rank,
            attribute_data: class
                .attributes()
                .map(|attributes| attributes.iter().map(AttributePayload::from).collect()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributePayload<'a> {
    pub name: &'a str,
    #[serde(rename = "type")]
    pub kind: AttributeKind,
    /// Raw option values; only present for `option` attributes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option_data: Option<Vec<&'a OptionValue>>,
}

impl<'a> From<&'a Attribute> for AttributePayload<'a> {
    fn from(attribute: &'a Attribute) -> Self {
        let option_data = match (attribute.kind(), attribute.options()) {
            (AttributeKind::Option, Some(options)) => {
                Some(options.iter().map(AttributeOption::value).collect())
            },
            _ => None,
        };
        Self { name: attribute.name(), kind: attribute.kind(), option_data }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SensorPayload<'a> {
    pub name: &'a str,
    #[serde(rename = "type")]
    pub kind: SensorKind,
}

impl<'a> From<&'a Sensor> for SensorPayload<'a> {
    fn from(sensor: &'a Sensor) -> Self {
        Self { name: sensor.name(), kind: sensor.kind() }
    }
}

/// Body of a dataset creation call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetPayload<'a> {
    pub name: &'a str,
    pub project_id: EntityId,
    pub sensor_ids: Vec<EntityId>,
    pub data_source: DataSource,
    #[serde(rename = "type")]
    pub kind: DatasetKind,
    pub annotation_format: AnnotationFormat,
    pub storage_url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_name: Option<&'a str>,
    pub data_folder: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sas_token: Option<&'a str>,
    pub sequential: bool,
    pub generate_metadata: bool,
    pub render_pcd: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation_folder: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calibration_folder: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lidar_folder: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation_file: Option<&'a str>,
    /// Never shares a key with the fields above; [`dataverse_schema::NewDataset::check_extra`] runs first.
    #[serde(flatten)]
    pub extra: &'a Map<String, Value>,
}

impl<'a> DatasetPayload<'a> {
    /// Resolves the remote ids the platform needs to place the dataset.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] on `project.id` or `sensors[i].id` when the project
    /// or a sensor has not been created remotely yet.
    pub fn compose(request: &DatasetRequest<'a>) -> Result<Self, ValidationError> {
        let project = request.project();
        let dataset = request.dataset();

        let project_id = project.id().ok_or_else(|| {
            ValidationError::new("id", format!("project `{}` has no remote id", project.name()))
                .nested("project")
        })?;

        let sensor_ids = dataset
            .sensors()
            .iter()
            .enumerate()
            .map(|(index, sensor)| {
                sensor.id().ok_or_else(|| {
                    ValidationError::new("id", format!("sensor `{}` has no remote id", sensor.name()))
                        .at_index("sensors", index)
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name: dataset.name(),
            project_id,
            sensor_ids,
            data_source: dataset.data_source(),
            kind: dataset.kind(),
            annotation_format: dataset.annotation_format(),
            storage_url: dataset.storage_url(),
            container_name: dataset.container_name(),
            data_folder: dataset.data_folder(),
            sas_token: dataset.sas_token(),
            sequential: dataset.sequential(),
            generate_metadata: dataset.generate_metadata(),
            render_pcd: dataset.render_pcd(),
            description: dataset.description(),
            annotation_folder: dataset.annotation_folder(),
            calibration_folder: dataset.calibration_folder(),
            lidar_folder: dataset.lidar_folder(),
            annotation_file: dataset.annotation_file(),
            extra: dataset.extra(),
        })
    }
}

/// One call of the local upload of an `sdk` dataset.
///
/// The last call of an upload carries no files and `is_finished` set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadBatch<'a> {
    pub dataset_id: EntityId,
    pub container_name: &'a str,
    pub files: Vec<LocalFile>,
    pub is_finished: bool,
}

/// Body of a dataset status update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetUpdate<'a> {
    pub status: DatasetStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<&'a str>,
}
