use dataverse_domain::config::{ClientConfig, LoggingConfig, SdkConfig};
use serde_json::json;

#[test]
fn config_defaults_are_sane() {
    let client = ClientConfig::default();
    assert_eq!(client.host, "http://localhost:8000");
    assert_eq!(client.alias, "default");

    let logging = LoggingConfig::default();
    assert_eq!(logging.name, "dataverse-sdk");
    assert_eq!(logging.level, "info");
    assert!(logging.console);
    assert!(!logging.json);
    assert!(logging.path.is_none());
    assert_eq!(logging.max_files, 10);
}

#[test]
fn sdk_config_deserializes_partial_documents() {
    let raw = json!({
        "client": { "host": "https://dataverse.example.com" },
        "logging": { "level": "debug", "path": "/tmp/dataverse-logs" }
    });

    let cfg: SdkConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.client.host, "https://dataverse.example.com");
    assert_eq!(cfg.client.alias, "default");
    assert_eq!(cfg.logging.level, "debug");
    assert_eq!(cfg.logging.path, Some(std::path::PathBuf::from("/tmp/dataverse-logs")));
    assert!(cfg.logging.console);
}
