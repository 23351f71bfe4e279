//! Closed vocabularies exchanged with the annotation platform.
//!
//! Every enum renders to and parses from its lowercase wire string. Parsing an unknown
//! value yields [`strum::ParseError`]; the schema layer turns that into a validation
//! error naming the offending field.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// Shared behavior of the closed vocabularies.
pub trait Vocabulary: Copy + FromStr + Into<&'static str> + IntoEnumIterator + 'static {
    /// Human readable name of the vocabulary, used in error messages.
    const NAME: &'static str;

    /// Wire representation of the value.
    fn as_str(self) -> &'static str {
        self.into()
    }

    /// Comma separated list of accepted wire values.
    #[must_use]
    fn expected() -> String {
        Self::iter().map(Self::as_str).collect::<Vec<_>>().join(", ")
    }
}

/// Value type of an ontology attribute.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, IntoStaticStr, AsRefStr, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AttributeKind {
    Boolean,
    /// Single or multi choice; requires at least one option.
    Option,
    Number,
    Text,
}

/// Data-capture channel type.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, IntoStaticStr, AsRefStr, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SensorKind {
    Camera,
    Lidar,
}

/// Labeling geometry used for image data.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, IntoStaticStr, AsRefStr, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OntologyImageKind {
    #[serde(rename = "2d_bounding_box")]
    #[strum(serialize = "2d_bounding_box")]
    BoundingBox2d,
    SemanticSegmentation,
    Classification,
    Point,
    Polygon,
    Polyline,
}

/// Labeling geometry used for point-cloud data.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, IntoStaticStr, AsRefStr, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OntologyPcdKind {
    Cuboid,
}

/// Where the raw data of a dataset is pulled from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, IntoStaticStr, AsRefStr, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DataSource {
    Azure,
    Aws,
    /// Files uploaded from the local machine through the SDK.
    Sdk,
}

/// Kind of dataset being created.
///
/// Besides the coarse `annotated_data`/`raw_data` split the platform also accepts the
/// labeling geometry of the dataset directly.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, IntoStaticStr, AsRefStr, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DatasetKind {
    AnnotatedData,
    RawData,
    #[serde(rename = "2d_bounding_box")]
    #[strum(serialize = "2d_bounding_box")]
    BoundingBox2d,
    SemanticSegmentation,
    Classification,
    Point,
    Polygon,
    Polyline,
    Cuboid,
}

/// Processing state reported by the platform. Never set by the SDK.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, IntoStaticStr, AsRefStr, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DatasetStatus {
    Pending,
    Processing,
    Ready,
    Fail,
}

/// Layout of annotation files accompanying a dataset.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, IntoStaticStr, AsRefStr, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AnnotationFormat {
    VisionAi,
    Kitti,
    Coco,
    Yolo,
    Image,
}

impl Vocabulary for AttributeKind {
    const NAME: &'static str = "attribute type";
}

impl Vocabulary for SensorKind {
    const NAME: &'static str = "sensor type";
}

impl Vocabulary for OntologyImageKind {
    const NAME: &'static str = "ontology image type";
}

impl Vocabulary for OntologyPcdKind {
    const NAME: &'static str = "ontology point-cloud type";
}

impl Vocabulary for DataSource {
    const NAME: &'static str = "data source";
}

impl Vocabulary for DatasetKind {
    const NAME: &'static str = "dataset type";
}

impl Vocabulary for DatasetStatus {
    const NAME: &'static str = "dataset status";
}

impl Vocabulary for AnnotationFormat {
    const NAME: &'static str = "annotation format";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_strings_round_trip_through_strum() {
        assert_eq!(OntologyImageKind::BoundingBox2d.to_string(), "2d_bounding_box");
        assert_eq!("2d_bounding_box".parse::<DatasetKind>(), Ok(DatasetKind::BoundingBox2d));
        assert_eq!(AnnotationFormat::VisionAi.as_str(), "vision_ai");
        assert_eq!("sdk".parse::<DataSource>(), Ok(DataSource::Sdk));
    }

    #[test]
    fn unknown_values_do_not_parse() {
        assert!("radar".parse::<SensorKind>().is_err());
        assert!("OPTION".parse::<AttributeKind>().is_err());
        assert!("gcp".parse::<DataSource>().is_err());
    }

    #[test]
    fn expected_lists_every_wire_value() {
        assert_eq!(DataSource::expected(), "azure, aws, sdk");
        assert_eq!(AttributeKind::expected(), "boolean, option, number, text");
    }
}
