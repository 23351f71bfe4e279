//! Platform-facing side of the SDK.
//!
//! [`DataverseClient`] turns validated entities into request bodies and hands them to a
//! [`Backend`]. It implements [`dataverse_schema::DatasetClient`], so it can be passed
//! straight to [`dataverse_schema::Project::create_dataset`]. [`Connections`] keeps
//! several clients apart by alias.
//!
//! Datasets with an `sdk` data source are uploaded from local folders right after they
//! are created, in batches of [`UPLOAD_BATCH_SIZE`] files.

mod backend;
mod client;
mod connections;
mod error;
pub mod payload;
mod upload;

pub use backend::Backend;
pub use client::DataverseClient;
pub use connections::{Connections, DEFAULT_ALIAS, SharedClient};
pub use error::{UploadError, UploadErrorExt};
pub use upload::{LocalFile, UPLOAD_BATCH_SIZE};
