use config::{Config, Environment, File};
use dataverse_domain::config::SdkConfig;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Default configuration file stem, resolved relative to the working directory.
pub const DEFAULT_CONFIG: &str = "dataverse";
/// Prefix of environment overrides (e.g. `DATAVERSE__CLIENT__HOST`).
pub const ENV_PREFIX: &str = "DATAVERSE";

/// Custom error type for config loading.
#[dataverse_derive::dataverse_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads configuration by layering a file with environment overrides.
///
/// 1. **Base File**: `path` (extension optional, `toml`/`json` are detected). Defaults to
///    [`DEFAULT_CONFIG`] in the working directory. The file is required.
/// 2. **Environment Overrides**: variables prefixed with `DATAVERSE__`; nested keys are
///    separated by double underscores (`DATAVERSE__LOGGING__LEVEL` maps to `logging.level`).
///
/// # Errors
/// Returns [`ConfigError::Config`] if the file is missing or its content does not match `T`.
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path =
        path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG), |p| p.as_ref().to_path_buf());

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(true))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .convert_case(config::Case::Snake),
        );

    info!("Loading config from {}", effective_path.display());

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}

/// Loads the SDK's own [`SdkConfig`]; see [`load_config`].
///
/// # Errors
/// Same as [`load_config`].
pub fn load_sdk_config(path: Option<impl AsRef<Path>>) -> Result<SdkConfig, ConfigError> {
    load_config::<SdkConfig>(path)
}
