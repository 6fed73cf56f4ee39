//! Configuration Loader
//!
//! Finds `deprecate.toml` and applies environment overrides on top of it.

use crate::config::{ColorSetting, DeprecateConfig, SinkKind};
use crate::ConfigResult;
use std::env;
use std::path::{Path, PathBuf};

/// File name searched for by [`ConfigLoader::load_from_directory`]
pub const CONFIG_FILE_NAME: &str = "deprecate.toml";

/// Configuration loader
///
/// Precedence, lowest first:
/// 1. Defaults
/// 2. deprecate.toml - nearest one walking up from the start directory
/// 3. Environment variables (DEPRECATE_SINK, DEPRECATE_COLOR)
#[derive(Debug, Default)]
pub struct ConfigLoader;

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self
    }

    /// Load configuration starting from the given directory
    pub fn load_from_directory(&self, start_dir: &Path) -> ConfigResult<DeprecateConfig> {
        let config = match self.find_config_file(start_dir) {
            Some(path) => {
                tracing::debug!("Loading deprecation config from {}", path.display());
                DeprecateConfig::load_from_file(&path)?
            }
            None => DeprecateConfig::default(),
        };

        self.apply_env_overrides(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(&self, config_path: &Path) -> ConfigResult<DeprecateConfig> {
        let config = DeprecateConfig::load_from_file(config_path)?;
        self.apply_env_overrides(config)
    }

    /// Walk up the directory tree looking for deprecate.toml
    fn find_config_file(&self, start_dir: &Path) -> Option<PathBuf> {
        start_dir
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILE_NAME))
            .find(|path| path.exists())
    }

    /// Environment variables follow the pattern DEPRECATE_<KEY>
    fn apply_env_overrides(&self, mut config: DeprecateConfig) -> ConfigResult<DeprecateConfig> {
        if let Ok(sink) = env::var("DEPRECATE_SINK") {
            config.output.sink = SinkKind::parse("DEPRECATE_SINK", &sink.to_lowercase())?;
        }

        if let Ok(color) = env::var("DEPRECATE_COLOR") {
            config.output.color = ColorSetting::parse("DEPRECATE_COLOR", &color.to_lowercase())?;
        }

        Ok(config)
    }
}
