use dataverse_domain::kinds::{AttributeKind, DatasetKind, DatasetStatus, OntologyImageKind, SensorKind};
use serde_json::json;

#[test]
fn serde_uses_wire_strings() {
    assert_eq!(serde_json::to_value(AttributeKind::Option).unwrap(), json!("option"));
    assert_eq!(serde_json::to_value(OntologyImageKind::BoundingBox2d).unwrap(), json!("2d_bounding_box"));
    assert_eq!(serde_json::to_value(DatasetKind::RawData).unwrap(), json!("raw_data"));

    let status: DatasetStatus = serde_json::from_value(json!("processing")).unwrap();
    assert_eq!(status, DatasetStatus::Processing);
}

#[test]
fn serde_rejects_unknown_values() {
    assert!(serde_json::from_value::<SensorKind>(json!("radar")).is_err());
    assert!(serde_json::from_value::<DatasetStatus>(json!("done")).is_err());
}
