use crate::backend::Backend;
use crate::payload::{DatasetPayload, ProjectPayload};
use crate::upload::upload_local_files;
use dataverse_domain::EntityId;
use dataverse_domain::config::ClientConfig;
use dataverse_domain::kinds::DataSource;
use dataverse_schema::{
    BoxError, Dataset, DatasetClient, DatasetRequest, DataverseError, DataverseErrorExt, Ontology, Project,
    Sensor,
};
use serde_json::Value;
use tracing::{debug, instrument, warn};

/// Talks to one platform host through a [`Backend`].
#[derive(Debug)]
pub struct DataverseClient<B> {
    host: String,
    alias: String,
    backend: B,
}

impl<B: Backend> DataverseClient<B> {
    /// # Errors
    /// Returns [`DataverseError::ClientConnection`] when the configured host is empty or
    /// does not use `http://` or `https://`.
    pub fn new(config: &ClientConfig, backend: B) -> Result<Self, DataverseError> {
        let host = config.host.trim().trim_end_matches('/');
        if host.is_empty() {
            return Err(DataverseError::connection("host is empty", "Failed to set up the client"));
        }
        if !(host.starts_with("http://") || host.starts_with("https://")) {
            return Err(DataverseError::connection(
                format!("host `{host}` must start with http:// or https://"),
                "Failed to set up the client",
            ));
        }

        debug!(host, alias = %config.alias, "client configured");
        Ok(Self { host: host.to_owned(), alias: config.alias.clone(), backend })
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub fn alias(&self) -> &str {
        &self.alias
    }

    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Creates a project with its ontology and sensors.
    ///
    /// # Errors
    /// * [`DataverseError::ClientConnection`] when the backend call fails.
    /// * [`DataverseError::Validation`] when the response is not a valid project.
    #[instrument(skip_all, fields(host = %self.host, project = name))]
    pub fn create_project(
        &self,
        name: &str,
        ontology: &Ontology,
        sensors: &[Sensor],
        description: Option<&str>,
    ) -> Result<Project, DataverseError> {
        let payload = ProjectPayload::compose(name, ontology, sensors, description);
        let response = self
            .backend
            .create_project(&payload)
            .context("Failed to create the project")
            .inspect_err(log_failure)?;

        decode_project(response)
    }

    /// Fetches a project by remote id.
    ///
    /// # Errors
    /// Same as [`DataverseClient::create_project`].
    #[instrument(skip(self), fields(host = %self.host))]
    pub fn get_project(&self, project_id: EntityId) -> Result<Project, DataverseError> {
        let response = self
            .backend
            .get_project(project_id)
            .context("Failed to get the project")
            .inspect_err(log_failure)?;

        decode_project(response)
    }
}

impl<B: Backend> DatasetClient for DataverseClient<B> {
    #[instrument(skip_all, fields(host = %self.host, dataset = request.dataset().name()))]
    fn create_dataset(&self, request: &DatasetRequest<'_>) -> Result<Dataset, BoxError> {
        let payload = DatasetPayload::compose(request)?;
        let mut fields = match self.backend.create_dataset(&payload)? {
            Value::Object(fields) => fields,
            other => return Err(format!("expected a dataset object, got: {other}").into()),
        };
        fields.insert("project".to_owned(), serde_json::to_value(request.project())?);
        fields.insert("sensors".to_owned(), serde_json::to_value(request.dataset().sensors())?);

        let dataset = Dataset::try_from(Value::Object(fields))?;
        debug!(id = ?dataset.id(), status = %dataset.status(), "dataset accepted");

        if request.dataset().data_source() == DataSource::Sdk {
            let dataset_id = dataset.id().ok_or("the platform returned a dataset without an id")?;
            upload_local_files(&self.backend, dataset_id, request.dataset())?;
        }
        Ok(dataset)
    }
}

fn decode_project(response: Value) -> Result<Project, DataverseError> {
    Project::try_from(response).context("Failed to decode the project").inspect_err(log_failure)
}

fn log_failure(err: &DataverseError) {
    warn!(error.kind = err.kind(), error = %err, "request failed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::{DatasetUpdate, UploadBatch};

    #[derive(Debug)]
    struct Offline;

    impl Backend for Offline {
        fn create_project(&self, _payload: &ProjectPayload<'_>) -> Result<Value, BoxError> {
            Err("offline".into())
        }

        fn get_project(&self, _project_id: EntityId) -> Result<Value, BoxError> {
            Err("offline".into())
        }

        fn create_dataset(&self, _payload: &DatasetPayload<'_>) -> Result<Value, BoxError> {
            Err("offline".into())
        }

        fn get_dataset(&self, _dataset_id: EntityId) -> Result<Value, BoxError> {
            Err("offline".into())
        }

        fn update_dataset(&self, _dataset_id: EntityId, _update: &DatasetUpdate<'_>) -> Result<Value, BoxError> {
            Err("offline".into())
        }

        fn upload_files(&self, _batch: &UploadBatch<'_>) -> Result<(), BoxError> {
            Err("offline".into())
        }
    }

    fn config(host: &str) -> ClientConfig {
        ClientConfig { host: host.to_owned(), ..ClientConfig::default() }
    }

    #[test]
    fn rejects_hosts_without_scheme() {
        for host in ["", "   ", "dataverse.local", "ftp://dataverse.local"] {
            let err = DataverseClient::new(&config(host), Offline).unwrap_err();
            assert_eq!(err.kind(), "ClientConnection", "host `{host}`");
        }
    }

    #[test]
    fn trailing_slash_is_dropped() {
        let client = DataverseClient::new(&config("https://dataverse.local/"), Offline).unwrap();
        assert_eq!(client.host(), "https://dataverse.local");
        assert_eq!(client.alias(), "default");
    }

    #[test]
    fn backend_failures_keep_their_message() {
        let client = DataverseClient::new(&config("http://localhost:8000"), Offline).unwrap();
        let err = client.get_project(1).unwrap_err();
        assert_eq!(err.to_string(), "Client connection error (Failed to get the project): offline");
    }
}
