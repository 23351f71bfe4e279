//! Shared construction helpers.
//!
//! Entities are decoded in two steps: serde fills a loosely typed record (enum fields are
//! plain strings, nested entities are nested records), then `TryFrom<Record>` converts
//! field by field and runs the entity's own checks over the finished value. Nested
//! failures are re-labelled with their path on the way up.

use crate::error::ValidationError;
use dataverse_domain::kinds::Vocabulary;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Invariant check over a fully assembled entity.
pub(crate) trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Runs [`Validate::validate`] and hands the value back on success.
pub(crate) fn validated<T: Validate>(value: T) -> Result<T, ValidationError> {
    value.validate()?;
    Ok(value)
}

/// Parses a wire string into a closed vocabulary.
pub(crate) fn parse_kind<K: Vocabulary>(field: &str, raw: &str) -> Result<K, ValidationError> {
    raw.parse::<K>().map_err(|_| {
        ValidationError::new(
            field,
            format!("unknown {} `{raw}`, expected one of: {}", K::NAME, K::expected()),
        )
    })
}

/// [`parse_kind`] for optional fields.
pub(crate) fn parse_optional_kind<K: Vocabulary>(
    field: &str,
    raw: Option<&str>,
) -> Result<Option<K>, ValidationError> {
    raw.map(|raw| parse_kind(field, raw)).transpose()
}

/// Converts every record of a list, labelling failures with `field[index]`.
pub(crate) fn convert_all<R, T>(field: &str, records: Vec<R>) -> Result<Vec<T>, ValidationError>
where
    T: TryFrom<R, Error = ValidationError>,
{
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| T::try_from(record).map_err(|e| e.at_index(field, index)))
        .collect()
}

/// [`convert_all`] for optional lists.
pub(crate) fn convert_optional<R, T>(
    field: &str,
    records: Option<Vec<R>>,
) -> Result<Option<Vec<T>>, ValidationError>
where
    T: TryFrom<R, Error = ValidationError>,
{
    records.map(|records| convert_all(field, records)).transpose()
}

/// Decodes a JSON mapping into an entity through its record.
///
/// Shape errors (missing keys, wrong JSON types) are reported against `entity`.
pub(crate) fn decode<R, T>(entity: &str, value: Value) -> Result<T, ValidationError>
where
    R: DeserializeOwned,
    T: TryFrom<R, Error = ValidationError>,
{
    let record: R =
        serde_json::from_value(value).map_err(|e| ValidationError::new(entity, e.to_string()))?;
    T::try_from(record)
}

/// Implements `TryFrom<serde_json::Value>` for an entity decoded through `$record`.
macro_rules! impl_try_from_value {
    ($entity:ty, $record:ty, $label:literal) => {
        impl TryFrom<serde_json::Value> for $entity {
            type Error = $crate::error::ValidationError;

            fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
                $crate::validation::decode::<$record, Self>($label, value)
            }
        }
    };
}

pub(crate) use impl_try_from_value;

#[cfg(test)]
mod tests {
    use super::*;
    use dataverse_domain::kinds::SensorKind;

    #[test]
    fn unknown_kind_names_field_and_value() {
        let err = parse_kind::<SensorKind>("type", "radar").unwrap_err();
        assert_eq!(err.field(), "type");
        assert_eq!(
            err.message(),
            "unknown sensor type `radar`, expected one of: camera, lidar"
        );
    }

    #[test]
    fn optional_kind_passes_absence_through() {
        assert_eq!(parse_optional_kind::<SensorKind>("type", None), Ok(None));
        assert_eq!(parse_optional_kind("type", Some("lidar")), Ok(Some(SensorKind::Lidar)));
    }
}
