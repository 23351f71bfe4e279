//! Local files of `sdk` datasets.

use crate::backend::Backend;
use crate::error::{UploadError, UploadErrorExt};
use crate::payload::{DatasetUpdate, UploadBatch};
use dataverse_domain::EntityId;
use dataverse_domain::kinds::DatasetStatus;
use dataverse_schema::NewDataset;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, trace, warn};
use walkdir::WalkDir;

/// Files sent per upload call.
pub const UPLOAD_BATCH_SIZE: usize = 5;

/// A local file read into memory, keyed by the path it was found at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    pub path: PathBuf,
    pub content: Vec<u8>,
}

impl LocalFile {
    pub(crate) fn read(path: &Path) -> Result<Self, UploadError> {
        let content = fs::read(path).context(format!("Reading `{}`", path.display()))?;
        Ok(Self { path: path.to_path_buf(), content })
    }
}

/// Lists every file the dataset asks to upload.
///
/// Folders are walked recursively in the order `data_folder`, `annotation_folder`,
/// `calibration_folder`, `lidar_folder`, entries sorted by name; `annotation_file` comes
/// last.
pub(crate) fn collect_files(dataset: &NewDataset) -> Result<Vec<PathBuf>, UploadError> {
    let folders = [
        Some(dataset.data_folder()),
        dataset.annotation_folder(),
        dataset.calibration_folder(),
        dataset.lidar_folder(),
    ];

    let mut files = Vec::new();
    for folder in folders.into_iter().flatten() {
        for entry in WalkDir::new(folder).sort_by_file_name() {
            let entry = entry.context(format!("Listing `{folder}`"))?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
    }

    if let Some(file) = dataset.annotation_file() {
        let path = Path::new(file);
        if !path.is_file() {
            return Err(UploadError::invalid_source(format!(
                "annotation_file expects a file destination, got: {file}"
            )));
        }
        files.push(path.to_path_buf());
    }

    Ok(files)
}

/// Sends the local files of a freshly created `sdk` dataset.
///
/// Failures while sending mark the dataset as `fail` on the platform before they are
/// returned. Failures while collecting files or looking up the container leave the
/// dataset untouched.
#[instrument(skip(backend, dataset))]
pub(crate) fn upload_local_files<B>(backend: &B, dataset_id: EntityId, dataset: &NewDataset) -> Result<(), UploadError>
where
    B: Backend + ?Sized,
{
    let files = collect_files(dataset)?;
    let details = backend.get_dataset(dataset_id).context("Failed to look up the upload container")?;
    let container_name = details
        .get("client_container_name")
        .and_then(Value::as_str)
        .ok_or("dataset details carry no `client_container_name`")?;

    debug!(files = files.len(), container_name, "uploading local files");
    send_batches(backend, dataset_id, container_name, &files)
        .context("Failed to upload files")
        .inspect_err(|err| mark_failed(backend, dataset_id, err))
}

fn send_batches<B>(backend: &B, dataset_id: EntityId, container_name: &str, files: &[PathBuf]) -> Result<(), UploadError>
where
    B: Backend + ?Sized,
{
    for chunk in files.chunks(UPLOAD_BATCH_SIZE) {
        let files = chunk.iter().map(|path| LocalFile::read(path)).collect::<Result<Vec<_>, _>>()?;
        backend.upload_files(&UploadBatch { dataset_id, container_name, files, is_finished: false })?;
        trace!(count = chunk.len(), "batch uploaded");
    }

    backend.upload_files(&UploadBatch { dataset_id, container_name, files: Vec::new(), is_finished: true })?;
    Ok(())
}

fn mark_failed<B>(backend: &B, dataset_id: EntityId, err: &UploadError)
where
    B: Backend + ?Sized,
{
    warn!(error.kind = err.kind(), error = %err, "upload failed");
    let memo = err.to_string();
    let update = DatasetUpdate { status: DatasetStatus::Fail, memo: Some(&memo) };
    if let Err(e) = backend.update_dataset(dataset_id, &update) {
        warn!(error = %e, "could not mark the dataset as failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataverse_domain::kinds::{AnnotationFormat, DataSource, DatasetKind};
    use tempfile::tempdir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, path.to_string_lossy().as_bytes()).unwrap();
    }

    #[test]
    fn folders_are_walked_in_request_order() {
        let root = tempdir().unwrap();
        let frames = root.path().join("frames");
        let labels = root.path().join("labels");
        touch(&frames.join("b.jpg"));
        touch(&frames.join("a.jpg"));
        touch(&frames.join("night/c.jpg"));
        touch(&labels.join("a.json"));
        let annotation_file = root.path().join("instances.json");
        touch(&annotation_file);

        let dataset = NewDataset::builder()
            .name("local")
            .data_source(DataSource::Sdk)
            .sensors(Vec::new())
            .kind(DatasetKind::AnnotatedData)
            .annotation_format(AnnotationFormat::Coco)
            .storage_url("local")
            .data_folder(frames.to_string_lossy())
            .annotation_folder(labels.to_string_lossy())
            .annotation_file(annotation_file.to_string_lossy())
            .build();

        let files = collect_files(&dataset).unwrap();

        assert_eq!(
            files,
            [
                frames.join("a.jpg"),
                frames.join("b.jpg"),
                frames.join("night/c.jpg"),
                labels.join("a.json"),
                annotation_file,
            ]
        );
    }

    #[test]
    fn annotation_file_must_be_a_file() {
        let root = tempdir().unwrap();
        touch(&root.path().join("frames/a.jpg"));

        let dataset = NewDataset::builder()
            .name("local")
            .data_source(DataSource::Sdk)
            .sensors(Vec::new())
            .kind(DatasetKind::AnnotatedData)
            .annotation_format(AnnotationFormat::Coco)
            .storage_url("local")
            .data_folder(root.path().join("frames").to_string_lossy())
            .annotation_file(root.path().to_string_lossy())
            .build();

        let err = collect_files(&dataset).unwrap_err();
        assert_eq!(err.kind(), "InvalidSource");
    }

    #[test]
    fn missing_folder_is_reported() {
        let root = tempdir().unwrap();
        let dataset = NewDataset::builder()
            .name("local")
            .data_source(DataSource::Sdk)
            .sensors(Vec::new())
            .kind(DatasetKind::RawData)
            .annotation_format(AnnotationFormat::Image)
            .storage_url("local")
            .data_folder(root.path().join("absent").to_string_lossy())
            .build();

        let err = collect_files(&dataset).unwrap_err();
        assert_eq!(err.kind(), "Walk");
        assert!(err.to_string().contains("absent"));
    }
}
