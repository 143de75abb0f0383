//! Build a settings for an object that implements `Deserialize`
//!
//! ---
//! The configuration is composed from several layers, later layers overriding
//! earlier ones when keys collide:
//!
//! 1. the file at the path given by `HMOVE_CONFIG_PATH`, `base_config/config.toml`
//!    by default. This file is required.
//! 2. the file at the path given by `HMOVE_CONFIG_OVERRIDE_PATH`,
//!    `config/config.toml` by default, when it exists.
//! 3. the portable user configuration `config.toml` in the project directory
//!    of the application, when it exists.
//! 4. environment variables prefixed with the given prefix, nested keys
//!    separated by `__` (with prefix `HMOVE`, `HMOVE__TOKEN__CHAIN_ID`).
//!
use crate::error::ModelsError;
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use std::path::Path;

/// environment variable holding the base configuration path
pub const CONFIG_PATH_ENV: &str = "HMOVE_CONFIG_PATH";
/// environment variable holding the override configuration path
pub const CONFIG_OVERRIDE_PATH_ENV: &str = "HMOVE_CONFIG_OVERRIDE_PATH";
/// base configuration used when `HMOVE_CONFIG_PATH` is not set
pub const DEFAULT_CONFIG_PATH: &str = "base_config/config.toml";
/// override configuration used when `HMOVE_CONFIG_OVERRIDE_PATH` is not set
pub const DEFAULT_CONFIG_OVERRIDE_PATH: &str = "config/config.toml";

/// Merge the settings layers and deserialize them into `T`
#[inline]
pub fn build_hmove_settings<T: DeserializeOwned>(
    app_name: &str,
    env_prefix: &str,
) -> Result<T, ModelsError> {
    let mut builder = config::Config::builder();
    let config_path =
        std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    builder = builder.add_source(config::File::from(Path::new(&config_path)));

    let config_override_path = std::env::var(CONFIG_OVERRIDE_PATH_ENV)
        .unwrap_or_else(|_| DEFAULT_CONFIG_OVERRIDE_PATH.to_string());

    if Path::new(&config_override_path).is_file() {
        builder = builder.add_source(config::File::from(Path::new(&config_override_path)));
    }

    if let Some(proj_dirs) = ProjectDirs::from("io", "HyperMove", app_name) {
        // Portable user config loading
        let user_config_path = proj_dirs.config_dir().join("config.toml");
        if user_config_path.is_file() {
            builder = builder.add_source(config::File::from(user_config_path));
        }
    }

    let settings = builder
        .add_source(config::Environment::with_prefix(env_prefix).separator("__"))
        .build()
        .map_err(|err| ModelsError::ConfigError(err.to_string()))?;

    settings
        .try_deserialize()
        .map_err(|err| ModelsError::ConfigError(err.to_string()))
}
