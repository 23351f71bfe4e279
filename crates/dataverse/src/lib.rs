//! Facade crate for the Dataverse SDK.
//! Re-exports the entity model, the platform client and the host integrations.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Add `dataverse-sdk` (imported as `dataverse`); `logger` and `config` are on by default.
//! - Load settings with [`load_config`], start logging with [`init_logging`], then build a
//!   [`DataverseClient`] over your [`Backend`] and pass it to [`Project::create_dataset`].

pub use dataverse_client as client;
pub use dataverse_domain as domain;
pub use dataverse_schema as schema;

pub use dataverse_client::{Backend, Connections, DEFAULT_ALIAS, DataverseClient, SharedClient, UploadError};
pub use dataverse_domain::config::{ClientConfig, LoggingConfig, SdkConfig};
pub use dataverse_schema::{
    Attribute, AttributeOption, BoxError, DataConfig, Dataset, DatasetClient, DatasetRequest, DataverseError,
    DataverseErrorExt, EntityId, NewDataset, Ontology, OntologyClass, OptionValue, Project, Sensor,
    ValidationError, kinds,
};

#[cfg(feature = "config")]
pub use dataverse_kernel::config::{ConfigError, load_config, load_sdk_config};
#[cfg(feature = "logger")]
pub use dataverse_logger::{Logger, LoggerError};

/// Everything needed to describe projects and create datasets.
pub mod prelude {
    pub use dataverse_schema::kinds::{
        AnnotationFormat, AttributeKind, DataSource, DatasetKind, DatasetStatus, OntologyImageKind,
        OntologyPcdKind, SensorKind,
    };
    pub use dataverse_schema::{
        Attribute, AttributeOption, Dataset, DatasetClient, DataverseError, NewDataset, Ontology, OntologyClass,
        Project, Sensor, ValidationError,
    };
}

/// Build-time feature introspection.
pub mod features {
    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        #[cfg(feature = "logger")]
        "logger",
        #[cfg(feature = "config")]
        "config",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Installs the global `tracing` subscriber described by `config`.
///
/// Keep the returned [`Logger`] alive for as long as file output should be flushed.
///
/// # Errors
/// Returns [`LoggerError`] when the settings are invalid or a subscriber is already set.
#[cfg(feature = "logger")]
pub fn init_logging(config: &LoggingConfig) -> Result<Logger, LoggerError> {
    Logger::from_config(config)
}
