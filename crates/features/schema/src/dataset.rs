use crate::data_config::DataConfig;
use crate::error::{BoxError, ValidationError};
use crate::project::{Project, ProjectRecord};
use crate::sensor::{Sensor, SensorRecord};
use crate::validation::{convert_all, impl_try_from_value, parse_kind};
use dataverse_domain::EntityId;
use dataverse_domain::kinds::{AnnotationFormat, DataSource, DatasetKind, DatasetStatus};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use typed_builder::TypedBuilder;

/// Creates datasets on behalf of a [`Project`].
///
/// Implementations talk to the remote platform (or stand in for it in tests). Any
/// failure is reported as a boxed error and surfaces to the caller as
/// [`crate::DataverseError::ClientConnection`].
pub trait DatasetClient {
    fn create_dataset(&self, request: &DatasetRequest<'_>) -> Result<Dataset, BoxError>;
}

impl<T: DatasetClient + ?Sized> DatasetClient for &T {
    fn create_dataset(&self, request: &DatasetRequest<'_>) -> Result<Dataset, BoxError> {
        (**self).create_dataset(request)
    }
}

impl<T: DatasetClient + ?Sized> DatasetClient for std::sync::Arc<T> {
    fn create_dataset(&self, request: &DatasetRequest<'_>) -> Result<Dataset, BoxError> {
        (**self).create_dataset(request)
    }
}

/// Parameters of a dataset that does not exist yet.
#[derive(Debug, Clone, PartialEq, Serialize, TypedBuilder)]
pub struct NewDataset {
    #[builder(setter(into))]
    name: String,
    data_source: DataSource,
    sensors: Vec<Sensor>,
    #[serde(rename = "type")]
    kind: DatasetKind,
    annotation_format: AnnotationFormat,
    #[builder(setter(into))]
    storage_url: String,
    #[builder(setter(into))]
    data_folder: String,
    #[builder(default, setter(into, strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    container_name: Option<String>,
    #[builder(default, setter(into, strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    sas_token: Option<String>,
    #[builder(default)]
    sequential: bool,
    #[builder(default)]
    generate_metadata: bool,
    /// Ask the platform to render point-cloud previews.
    #[builder(default)]
    render_pcd: bool,
    #[builder(default, setter(into, strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    /// Local annotation files, uploaded with `data_folder` for `sdk` datasets.
    #[builder(default, setter(into, strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    annotation_folder: Option<String>,
    #[builder(default, setter(into, strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    calibration_folder: Option<String>,
    #[builder(default, setter(into, strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    lidar_folder: Option<String>,
    /// A single annotation file; must point at a regular file.
    #[builder(default, setter(into, strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    annotation_file: Option<String>,
    /// Additional keys forwarded to the platform untouched.
    ///
    /// Keys of the request itself are refused, see [`NewDataset::RESERVED_KEYS`].
    #[builder(default)]
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// Local folder settings that a [`DataConfig`] carries among its extra keys.
const LOCAL_FOLDER_KEYS: [&str; 3] = ["annotation_folder", "calibration_folder", "lidar_folder"];

impl NewDataset {
    /// Keys the request body is made of. None of them may appear in `extra`.
    pub const RESERVED_KEYS: &'static [&'static str] = &[
        "name",
        "project_id",
        "sensor_ids",
        "sensors",
        "data_source",
        "type",
        "annotation_format",
        "storage_url",
        "container_name",
        "data_folder",
        "sas_token",
        "sequential",
        "generate_metadata",
        "render_pcd",
        "description",
        "annotation_folder",
        "calibration_folder",
        "lidar_folder",
        "annotation_file",
    ];

    /// Builds a request from stored storage settings.
    ///
    /// Local folder keys found among the config's extra keys are picked up as the
    /// matching request fields.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] on `type` or `annotation_format` when the config
    /// holds a value outside the known vocabulary, on a local folder key that is not a
    /// string, or on an extra key that shadows a request field.
    pub fn from_config(
        name: impl Into<String>,
        data_source: DataSource,
        sensors: Vec<Sensor>,
        config: DataConfig,
    ) -> Result<Self, ValidationError> {
        let mut extra = config.extra().clone();
        let [annotation_folder, calibration_folder, lidar_folder] =
            LOCAL_FOLDER_KEYS.map(|key| take_string(&mut extra, key));

        let dataset = Self {
            name: name.into(),
            data_source,
            sensors,
            kind: parse_kind("type", config.kind())?,
            annotation_format: parse_kind("annotation_format", config.annotation_format())?,
            storage_url: config.storage_url().to_owned(),
            data_folder: config.data_folder().to_owned(),
            container_name: config.container_name().map(str::to_owned),
            sas_token: config.sas_token().map(str::to_owned),
            sequential: config.sequential(),
            generate_metadata: config.generate_metadata(),
            render_pcd: false,
            description: config.description().map(str::to_owned),
            annotation_folder: annotation_folder?,
            calibration_folder: calibration_folder?,
            lidar_folder: lidar_folder?,
            annotation_file: take_string(&mut extra, "annotation_file")?,
            extra,
        };
        dataset.check_extra()?;
        Ok(dataset)
    }

    /// Refuses extra keys that would shadow a field of the request body.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] on `extra.<key>` for the first reserved key found.
    pub fn check_extra(&self) -> Result<(), ValidationError> {
        match Self::RESERVED_KEYS.iter().find(|key| self.extra.contains_key(**key)) {
            Some(key) => Err(ValidationError::new(
                *key,
                format!("`{key}` is a field of the dataset request and cannot be passed as an extra key"),
            )
            .nested("extra")),
            None => Ok(()),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn data_source(&self) -> DataSource {
        self.data_source
    }

    #[must_use]
    pub fn sensors(&self) -> &[Sensor] {
        &self.sensors
    }

    #[must_use]
    pub const fn kind(&self) -> DatasetKind {
        self.kind
    }

    #[must_use]
    pub const fn annotation_format(&self) -> AnnotationFormat {
        self.annotation_format
    }

    #[must_use]
    pub fn storage_url(&self) -> &str {
        &self.storage_url
    }

    #[must_use]
    pub fn data_folder(&self) -> &str {
        &self.data_folder
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
    pub const fn sequential(&self) -> bool {
        self.sequential
    }

    #[must_use]
    pub const fn generate_metadata(&self) -> bool {
        self.generate_metadata
    }

    #[must_use]
    pub const fn render_pcd(&self) -> bool {
        self.render_pcd
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn annotation_folder(&self) -> Option<&str> {
        self.annotation_folder.as_deref()
    }

    #[must_use]
    pub fn calibration_folder(&self) -> Option<&str> {
        self.calibration_folder.as_deref()
    }

    #[must_use]
    pub fn lidar_folder(&self) -> Option<&str> {
        self.lidar_folder.as_deref()
    }

    #[must_use]
    pub fn annotation_file(&self) -> Option<&str> {
        self.annotation_file.as_deref()
    }

    #[must_use]
    pub const fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }
}

fn take_string(extra: &mut Map<String, Value>, key: &str) -> Result<Option<String>, ValidationError> {
    match extra.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value)),
        Some(other) => Err(ValidationError::new(key, format!("expected a path, got: {other}"))),
    }
}

/// A checked dataset request handed to a [`DatasetClient`].
///
/// Only [`Project::create_dataset`] builds one, after the requested sensors have been
/// matched against the project.
#[derive(Debug, Clone, Copy)]
pub struct DatasetRequest<'a> {
    project: &'a Project,
    dataset: &'a NewDataset,
}

impl<'a> DatasetRequest<'a> {
    pub(crate) const fn new(project: &'a Project, dataset: &'a NewDataset) -> Self {
        Self { project, dataset }
    }

    #[must_use]
    pub const fn project(&self) -> &'a Project {
        self.project
    }

    #[must_use]
    pub const fn dataset(&self) -> &'a NewDataset {
        self.dataset
    }
}

/// A dataset as reported by the platform.
///
/// Unknown keys are kept in [`Dataset::extra`] and serialized back as they came in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DatasetRecord")]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<EntityId>,
    project: Project,
    sensors: Vec<Sensor>,
    name: String,
    #[serde(rename = "type")]
    kind: DatasetKind,
    data_source: DataSource,
    annotation_format: AnnotationFormat,
    status: DatasetStatus,
    sequential: bool,
    generate_metadata: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    file_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pcd_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    created_by: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    container_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    storage_url: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Dataset {
    #[must_use]
    pub const fn id(&self) -> Option<EntityId> {
        self.id
    }

    #[must_use]
    pub const fn project(&self) -> &Project {
        &self.project
    }

    #[must_use]
    pub fn sensors(&self) -> &[Sensor] {
        &self.sensors
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn kind(&self) -> DatasetKind {
        self.kind
    }

    #[must_use]
    pub const fn data_source(&self) -> DataSource {
        self.data_source
    }

    #[must_use]
    pub const fn annotation_format(&self) -> AnnotationFormat {
        self.annotation_format
    }

    #[must_use]
    pub const fn status(&self) -> DatasetStatus {
        self.status
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

    #[must_use]
    pub const fn file_count(&self) -> Option<u64> {
        self.file_count
    }

    #[must_use]
    pub const fn image_count(&self) -> Option<u64> {
        self.image_count
    }

    #[must_use]
    pub const fn pcd_count(&self) -> Option<u64> {
        self.pcd_count
    }

    #[must_use]
    pub const fn created_by(&self) -> Option<EntityId> {
        self.created_by
    }

    #[must_use]
    pub fn container_name(&self) -> Option<&str> {
        self.container_name.as_deref()
    }

    #[must_use]
    pub fn storage_url(&self) -> Option<&str> {
        self.storage_url.as_deref()
    }

    #[must_use]
    pub const fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct DatasetRecord {
    #[serde(default)]
    id: Option<EntityId>,
    project: ProjectRecord,
    sensors: Vec<SensorRecord>,
    name: String,
    #[serde(rename = "type")]
    kind: String,
    data_source: String,
    annotation_format: String,
    status: String,
    #[serde(default)]
    sequential: bool,
    #[serde(default)]
    generate_metadata: bool,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    file_count: Option<u64>,
    #[serde(default)]
    image_count: Option<u64>,
    #[serde(default)]
    pcd_count: Option<u64>,
    #[serde(default)]
    created_by: Option<EntityId>,
    #[serde(default)]
    container_name: Option<String>,
    #[serde(default)]
    storage_url: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl TryFrom<DatasetRecord> for Dataset {
    type Error = ValidationError;

    fn try_from(record: DatasetRecord) -> Result<Self, Self::Error> {
        let project = Project::try_from(record.project).map_err(|e| e.nested("project"))?;
        let sensors = convert_all("sensors", record.sensors)?;
        Ok(Self {
            id: record.id,
            project,
            sensors,
            name: record.name,
            kind: parse_kind("type", &record.kind)?,
            data_source: parse_kind("data_source", &record.data_source)?,
            annotation_format: parse_kind("annotation_format", &record.annotation_format)?,
            status: parse_kind("status", &record.status)?,
            sequential: record.sequential,
            generate_metadata: record.generate_metadata,
            description: record.description,
            file_count: record.file_count,
            image_count: record.image_count,
            pcd_count: record.pcd_count,
            created_by: record.created_by,
            container_name: record.container_name,
            storage_url: record.storage_url,
            extra: record.extra,
        })
    }
}

impl_try_from_value!(Dataset, DatasetRecord, "dataset");

#[cfg(test)]
mod tests {
    use super::*;
    use dataverse_domain::kinds::SensorKind;
    use serde_json::json;

    fn dataset() -> Value {
        json!({
            "id": 7,
            "project": {
                "id": 11,
                "name": "urban",
                "ontology": { "name": "traffic", "classes": [] },
                "sensors": [{ "id": 1, "name": "cam0", "type": "camera" }]
            },
            "sensors": [{ "id": 1, "name": "cam0", "type": "camera" }],
            "name": "ds1",
            "type": "annotated_data",
            "data_source": "aws",
            "annotation_format": "coco",
            "status": "ready",
            "sequential": false,
            "generate_metadata": true,
            "image_count": 120
        })
    }

    #[test]
    fn extra_keys_round_trip() {
        let mut raw = dataset();
        raw["upload_session"] = json!("a1b2");
        raw["labels"] = json!({ "car": 3, "nested": [1, 2] });

        let dataset = Dataset::try_from(raw.clone()).unwrap();
        assert_eq!(dataset.extra().len(), 2);
        assert_eq!(dataset.image_count(), Some(120));
        assert_eq!(serde_json::to_value(&dataset).unwrap(), raw);
    }

    #[test]
    fn status_is_required() {
        let mut raw = dataset();
        raw.as_object_mut().unwrap().remove("status");
        let err = Dataset::try_from(raw).unwrap_err();
        assert_eq!(err.field(), "dataset");
        assert!(err.message().contains("status"));
    }

    #[test]
    fn unknown_status_is_named() {
        let mut raw = dataset();
        raw["status"] = json!("archived");
        let err = Dataset::try_from(raw).unwrap_err();
        assert_eq!(err.field(), "status");
    }

    #[test]
    fn nested_project_failures_are_prefixed() {
        let mut raw = dataset();
        raw["project"]["sensors"][0]["type"] = json!("sonar");
        let err = Dataset::try_from(raw).unwrap_err();
        assert_eq!(err.field(), "project.sensors[0].type");
    }

    #[test]
    fn new_dataset_from_config() {
        let config = DataConfig::try_from(json!({
            "storage_url": "https://acct.blob.core.windows.net",
            "container_name": "frames",
            "sas_token": "sv=2024",
            "data_folder": "run-3",
            "sequential": true,
            "generate_metadata": false,
            "type": "raw_data",
            "annotation_format": "vision_ai",
            "region": "westeurope"
        }))
        .unwrap();

        let sensors = vec![Sensor::new("cam0", SensorKind::Camera)];
        let dataset = NewDataset::from_config("ds2", DataSource::Azure, sensors, config).unwrap();

        assert_eq!(dataset.kind(), DatasetKind::RawData);
        assert_eq!(dataset.annotation_format(), AnnotationFormat::VisionAi);
        assert_eq!(dataset.container_name(), Some("frames"));
        assert!(dataset.sequential());
        assert!(!dataset.render_pcd());
        assert_eq!(dataset.extra().get("region"), Some(&json!("westeurope")));
    }

    #[test]
    fn config_with_unknown_format_is_rejected() {
        let config = DataConfig::builder()
            .storage_url("s3://bucket")
            .data_folder("raw/")
            .kind("raw_data")
            .annotation_format("pascal_voc")
            .build();

        let err = NewDataset::from_config("ds", DataSource::Aws, Vec::new(), config).unwrap_err();
        assert_eq!(err.field(), "annotation_format");
    }

    #[test]
    fn config_folders_become_request_fields() {
        let config = DataConfig::builder()
            .storage_url("local")
            .data_folder("frames/")
            .kind("annotated_data")
            .annotation_format("coco")
            .extra(serde_json::Map::from_iter([
                ("annotation_folder".to_owned(), json!("labels/")),
                ("annotation_file".to_owned(), json!("labels/instances.json")),
                ("region".to_owned(), json!("eu")),
            ]))
            .build();

        let dataset = NewDataset::from_config("ds3", DataSource::Sdk, Vec::new(), config).unwrap();

        assert_eq!(dataset.annotation_folder(), Some("labels/"));
        assert_eq!(dataset.annotation_file(), Some("labels/instances.json"));
        assert_eq!(dataset.lidar_folder(), None);
        assert_eq!(dataset.extra().keys().collect::<Vec<_>>(), ["region"]);
    }

    #[test]
    fn config_extras_cannot_shadow_request_fields() {
        let config = DataConfig::builder()
            .storage_url("s3://bucket")
            .data_folder("raw/")
            .kind("raw_data")
            .annotation_format("image")
            .extra(serde_json::Map::from_iter([("sensor_ids".to_owned(), json!([1, 2]))]))
            .build();

        let err = NewDataset::from_config("ds", DataSource::Aws, Vec::new(), config).unwrap_err();
        assert_eq!(err.field(), "extra.sensor_ids");
    }

    #[test]
    fn built_extras_cannot_shadow_request_fields() {
        for key in ["project_id", "name", "render_pcd", "type"] {
            let dataset = NewDataset::builder()
                .name("ds")
                .data_source(DataSource::Aws)
                .sensors(Vec::new())
                .kind(DatasetKind::RawData)
                .annotation_format(AnnotationFormat::Image)
                .storage_url("s3://bucket")
                .data_folder("raw/")
                .extra(serde_json::Map::from_iter([(key.to_owned(), json!(999))]))
                .build();

            let err = dataset.check_extra().unwrap_err();
            assert_eq!(err.field(), format!("extra.{key}"));
        }
    }

    #[test]
    fn new_dataset_serializes_wire_names() {
        let dataset = NewDataset::builder()
            .name("ds1")
            .data_source(DataSource::Sdk)
            .sensors(Vec::new())
            .kind(DatasetKind::BoundingBox2d)
            .annotation_format(AnnotationFormat::Coco)
            .storage_url("s3://bucket")
            .data_folder("raw/")
            .build();

        let value = serde_json::to_value(&dataset).unwrap();
        assert_eq!(value["type"], json!("2d_bounding_box"));
        assert_eq!(value["render_pcd"], json!(false));
        assert!(value.get("description").is_none());
    }
}
