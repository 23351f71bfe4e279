use crate::payload::{DatasetPayload, DatasetUpdate, ProjectPayload, UploadBatch};
use dataverse_domain::EntityId;
use dataverse_schema::BoxError;
use serde_json::Value;

/// Raw access to the platform API.
///
/// Implementations own transport and authentication. Responses are handed back as JSON
/// and decoded by [`crate::DataverseClient`].
pub trait Backend {
    fn create_project(&self, payload: &ProjectPayload<'_>) -> Result<Value, BoxError>;

    fn get_project(&self, project_id: EntityId) -> Result<Value, BoxError>;

    fn create_dataset(&self, payload: &DatasetPayload<'_>) -> Result<Value, BoxError>;

    /// Dataset details, including the `client_container_name` local uploads go to.
    fn get_dataset(&self, dataset_id: EntityId) -> Result<Value, BoxError>;

    fn update_dataset(&self, dataset_id: EntityId, update: &DatasetUpdate<'_>) -> Result<Value, BoxError>;

    fn upload_files(&self, batch: &UploadBatch<'_>) -> Result<(), BoxError>;
}

impl<T: Backend + ?Sized> Backend for Box<T> {
    fn create_project(&self, payload: &ProjectPayload<'_>) -> Result<Value, BoxError> {
        (**self).create_project(payload)
    }

    fn get_project(&self, project_id: EntityId) -> Result<Value, BoxError> {
        (**self).get_project(project_id)
    }

    fn create_dataset(&self, payload: &DatasetPayload<'_>) -> Result<Value, BoxError> {
        (**self).create_dataset(payload)
    }

    fn get_dataset(&self, dataset_id: EntityId) -> Result<Value, BoxError> {
        (**self).get_dataset(dataset_id)
    }

    fn update_dataset(&self, dataset_id: EntityId, update: &DatasetUpdate<'_>) -> Result<Value, BoxError> {
        (**self).update_dataset(dataset_id, update)
    }

    fn upload_files(&self, batch: &UploadBatch<'_>) -> Result<(), BoxError> {
        (**self).upload_files(batch)
    }
}
