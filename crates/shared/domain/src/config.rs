use serde::Deserialize;
use std::path::PathBuf;

/// Top-level SDK configuration, usually loaded from a `dataverse.toml` file.
#[derive(Default, Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SdkConfig {
    pub client: ClientConfig,
    pub logging: LoggingConfig,
}

/// Where the platform lives and under which alias the client is registered.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the platform API, including the `http://` or `https://` scheme.
    pub host: String,
    /// Registry alias for the client built from this config.
    pub alias: String,
}

/// Log output settings for hosts that let the SDK install the tracing subscriber.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Logger name, also the log file prefix.
    pub name: String,
    /// Minimum level (`trace`, `debug`, `info`, `warn`, `error`, `off`).
    pub level: String,
    pub console: bool,
    /// JSON lines for file output.
    pub json: bool,
    /// Directory for rolling log files. Files are disabled when absent.
    pub path: Option<PathBuf>,
    /// Extra `tracing` filter directives, e.g. `dataverse_client=debug`.
    pub env_filter: Option<String>,
    pub max_files: usize,
}

// --- Default ---

impl Default for ClientConfig {
    fn default() -> Self {
        Self { host: "http://localhost:8000".to_owned(), alias: "default".to_owned() }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            name: "dataverse-sdk".to_owned(),
            level: "info".to_owned(),
            console: true,
            json: false,
            path: None,
            env_filter: None,
            max_files: 10,
        }
    }
}
