use dataverse::client::payload::{DatasetPayload, DatasetUpdate, ProjectPayload, UploadBatch};
use dataverse::prelude::*;
use dataverse::{Backend, BoxError, Connections, DataverseClient, EntityId, load_sdk_config};
use serde_json::{Value, json};
use serial_test::serial;
use std::fs;
use std::sync::{Arc, Mutex};
use tempfile::tempdir;

/// In-memory platform: remembers created projects and uploaded files, accepts every dataset.
#[derive(Debug, Default)]
struct InMemory {
    projects: Mutex<Vec<Value>>,
    uploaded: Mutex<Vec<String>>,
}

impl Backend for InMemory {
    fn create_project(&self, payload: &ProjectPayload<'_>) -> Result<Value, BoxError> {
        let ontology = &payload.ontology_data;
        let classes = ontology
            .ontology_classes_data
            .iter()
            .enumerate()
            .map(|(i, class)| json!({ "id": 100 + i, "name": class.name, "color": class.color, "rank": class.rank }))
            .collect::<Vec<_>>();
        let sensors = payload
            .sensor_data
            .iter()
            .enumerate()
            .map(|(i, sensor)| json!({ "id": 200 + i, "name": sensor.name, "type": sensor.kind }))
            .collect::<Vec<_>>();

        let mut project = json!({
            "name": payload.name,
            "ontology": { "name": ontology.name, "image_type": ontology.image_type, "classes": classes },
            "sensors": sensors
        });
        let mut projects = self.projects.lock().unwrap();
        projects.push(project.clone());
        project["id"] = json!(projects.len());
        Ok(project)
    }

    fn get_project(&self, project_id: EntityId) -> Result<Value, BoxError> {
        let index = usize::try_from(project_id)?.checked_sub(1).ok_or("project not found")?;
        let mut project = self.projects.lock().unwrap().get(index).cloned().ok_or("project not found")?;
        project["id"] = json!(project_id);
        Ok(project)
    }

    fn create_dataset(&self, payload: &DatasetPayload<'_>) -> Result<Value, BoxError> {
        let mut dataset = serde_json::to_value(payload)?;
        dataset["id"] = json!(7);
        dataset["status"] = json!("processing");
        Ok(dataset)
    }

    fn get_dataset(&self, dataset_id: EntityId) -> Result<Value, BoxError> {
        Ok(json!({ "id": dataset_id, "client_container_name": "c-7" }))
    }

    fn update_dataset(&self, _dataset_id: EntityId, _update: &DatasetUpdate<'_>) -> Result<Value, BoxError> {
        Err("no dataset is expected to fail".into())
    }

    fn upload_files(&self, batch: &UploadBatch<'_>) -> Result<(), BoxError> {
        let names = batch.files.iter().filter_map(|file| file.path.file_name());
        self.uploaded.lock().unwrap().extend(names.map(|name| name.to_string_lossy().into_owned()));
        Ok(())
    }
}

#[test]
#[serial]
fn ds1_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("dataverse.toml");
    fs::write(&path, "[client]\nhost = \"https://dataverse.example.com\"\n")?;
    let raw = dir.path().join("raw");
    fs::create_dir(&raw)?;
    fs::write(raw.join("0001.jpg"), b"jpeg")?;
    let config = load_sdk_config(Some(&path))?;

    let client = Arc::new(DataverseClient::new(&config.client, InMemory::default())?);
    let ontology = Ontology::builder()
        .name("O")
        .image_type(OntologyImageKind::BoundingBox2d)
        .classes(vec![OntologyClass::new("car", "#FF0000", 1)?])
        .build();
    let project = client.create_project("P", &ontology, &[Sensor::new("cam0", SensorKind::Camera)], None)?;
    assert_eq!(client.get_project(1)?, project);

    let connections = Connections::new();
    connections.add(config.client.alias.clone(), client.clone());

    let cam0 = project.sensors()[0].clone();
    let request = NewDataset::builder()
        .name("ds1")
        .data_source(DataSource::Sdk)
        .sensors(vec![cam0])
        .kind(DatasetKind::BoundingBox2d)
        .annotation_format(AnnotationFormat::Coco)
        .storage_url("s3://bucket")
        .data_folder(raw.to_string_lossy())
        .build();

    let shared = connections.get(dataverse::DEFAULT_ALIAS)?;
    let dataset = project.create_dataset(&shared, &request)?;

    assert_eq!(dataset.id(), Some(7));
    assert_eq!(dataset.status(), DatasetStatus::Processing);
    assert_eq!(dataset.kind(), DatasetKind::BoundingBox2d);
    assert_eq!(dataset.project(), &project);
    assert_eq!(*client.backend().uploaded.lock().unwrap(), ["0001.jpg"]);
    Ok(())
}

#[test]
fn empty_sensor_request_is_rejected_locally() {
    let project = Project::builder()
        .name("P")
        .ontology(Ontology::builder().name("O").build())
        .sensors(vec![Sensor::new("cam0", SensorKind::Camera)])
        .build();
    let client = DataverseClient::new(&dataverse::ClientConfig::default(), InMemory::default()).unwrap();
    let request = NewDataset::builder()
        .name("ds1")
        .data_source(DataSource::Aws)
        .sensors(Vec::new())
        .kind(DatasetKind::RawData)
        .annotation_format(AnnotationFormat::Image)
        .storage_url("s3://bucket")
        .data_folder("raw/")
        .build();

    let err = project.create_dataset(&client, &request).unwrap_err();
    assert_eq!(err.as_validation().map(ValidationError::field), Some("sensors"));
}

#[test]
fn default_features_are_reported() {
    assert!(dataverse::features::is_enabled("logger"));
    assert!(dataverse::features::is_enabled("config"));
    assert!(!dataverse::features::is_enabled("server"));
}
