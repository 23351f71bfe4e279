//! Validated entity model of the Dataverse platform.
//!
//! Every entity can be built from typed arguments or decoded from a JSON mapping; both
//! paths run the same checks and report the first violation as a [`ValidationError`]
//! whose `field` is the path to the offending value. Dataset creation goes through
//! [`Project::create_dataset`] with an explicitly passed [`DatasetClient`].

mod attribute;
mod data_config;
mod dataset;
mod error;
mod ontology;
mod option;
mod project;
mod sensor;
mod validation;

pub use attribute::Attribute;
pub use data_config::DataConfig;
pub use dataset::{Dataset, DatasetClient, DatasetRequest, NewDataset};
pub use error::{BoxError, DataverseError, DataverseErrorExt, ValidationError};
pub use ontology::{Ontology, OntologyClass};
pub use option::{AttributeOption, OptionValue};
pub use project::Project;
pub use sensor::Sensor;

pub use dataverse_domain::EntityId;
pub use dataverse_domain::kinds;
