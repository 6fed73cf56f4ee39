//! Deprecate Configuration
//!
//! Controls where deprecation notices go and how callers are resolved:
//! - Output sink selection and terminal colors
//! - Facility type name skipped during stack walks
//! - Dynamic dispatch hook names for the host language
//!
//! # Configuration Hierarchy
//!
//! Later sources override earlier ones:
//! 1. Built-in defaults
//! 2. Project config (./deprecate.toml, searched upwards)
//! 3. Environment variables (DEPRECATE_*)
//!
//! # Example
//!
//! ```no_run
//! use deprecate_config::ConfigLoader;
//! use std::path::Path;
//!
//! let loader = ConfigLoader::new();
//! let config = loader.load_from_directory(Path::new(".")).unwrap();
//! ```

pub mod config;
pub mod loader;

use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax in {file}: {error}")]
    TomlParseError {
        file: PathBuf,
        error: toml::de::Error,
    },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

pub use config::{ColorSetting, DeprecateConfig, HookNames, OutputConfig, ResolverConfig, SinkKind};
pub use loader::{ConfigLoader, CONFIG_FILE_NAME};
