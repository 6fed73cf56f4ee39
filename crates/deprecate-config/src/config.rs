//! Deprecation settings (deprecate.toml)

use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level `deprecate.toml` contents
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct DeprecateConfig {
    /// Where notices are written
    #[serde(default)]
    pub output: OutputConfig,

    /// Caller resolution settings
    #[serde(default)]
    pub resolver: ResolverConfig,
}

/// Output sink selection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default)]
    pub sink: SinkKind,

    /// Only used by the stderr sink
    #[serde(default)]
    pub color: ColorSetting,
}

/// Built-in sink kinds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    /// Colored lines on standard error
    #[default]
    Stderr,
    /// `tracing` events with target `deprecation`
    Tracing,
}

impl SinkKind {
    pub fn parse(field: &str, value: &str) -> ConfigResult<Self> {
        match value {
            "stderr" => Ok(SinkKind::Stderr),
            "tracing" => Ok(SinkKind::Tracing),
            other => Err(ConfigError::InvalidValue {
                field: field.to_string(),
                reason: format!("must be 'stderr' or 'tracing', got '{}'", other),
            }),
        }
    }
}

/// Terminal color preference
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorSetting {
    pub fn parse(field: &str, value: &str) -> ConfigResult<Self> {
        match value {
            "auto" => Ok(ColorSetting::Auto),
            "always" => Ok(ColorSetting::Always),
            "never" => Ok(ColorSetting::Never),
            other => Err(ConfigError::InvalidValue {
                field: field.to_string(),
                reason: format!("must be 'auto', 'always', or 'never', got '{}'", other),
            }),
        }
    }
}

/// Caller resolution settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ResolverConfig {
    /// Type name owning the facility's own entry frames
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facility: Option<String>,

    /// Overrides for dynamic dispatch hook names
    #[serde(default)]
    pub hooks: HookNames,
}

/// Hook name overrides; unset entries keep their defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct HookNames {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_static: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub construct: Option<String>,
}

impl HookNames {
    /// Built-in hook names, in field order
    pub const DEFAULTS: [(&'static str, &'static str); 7] = [
        ("get", "__get"),
        ("set", "__set"),
        ("isset", "__isset"),
        ("unset", "__unset"),
        ("call", "__call"),
        ("call_static", "__callStatic"),
        ("construct", "__construct"),
    ];

    /// `(field, name, overridden)` for every hook, defaults filled in
    pub fn effective(&self) -> Vec<(&'static str, &str, bool)> {
        Self::DEFAULTS
            .iter()
            .map(|(field, default)| match self.get_field(field) {
                Some(name) => (*field, name, true),
                None => (*field, *default, false),
            })
            .collect()
    }

    fn get_field(&self, field: &str) -> Option<&str> {
        self.entries()
            .find(|(name, _)| *name == field)
            .map(|(_, value)| value)
    }

    /// Iterate over `(field, name)` pairs that were set
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("get", &self.get),
            ("set", &self.set),
            ("isset", &self.isset),
            ("unset", &self.unset),
            ("call", &self.call),
            ("call_static", &self.call_static),
            ("construct", &self.construct),
        ]
        .into_iter()
        .filter_map(|(field, name)| name.as_deref().map(|n| (field, n)))
    }
}

impl DeprecateConfig {
    /// Load configuration from a file
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::IoError(e)
            }
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::TomlParseError {
            file: path.to_path_buf(),
            error: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate names; sink and color are checked by serde
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(facility) = &self.resolver.facility {
            validate_identifier("resolver.facility", facility)?;
        }

        for (field, name) in self.resolver.hooks.entries() {
            validate_identifier(&format!("resolver.hooks.{}", field), name)?;
        }

        // Overrides must not collide with each other or with remaining defaults
        let effective = self.resolver.hooks.effective();
        for (i, (field, name, overridden)) in effective.iter().enumerate() {
            let Some((other, _, _)) = effective[..i].iter().find(|(_, n, _)| n == name) else {
                continue;
            };
            let (field, other) = if *overridden {
                (field, other)
            } else {
                (other, field)
            };
            return Err(ConfigError::InvalidValue {
                field: format!("resolver.hooks.{}", field),
                reason: format!("hook name '{}' is already used by '{}'", name, other),
            });
        }

        Ok(())
    }

    /// Facility type name, if overridden
    pub fn facility(&self) -> Option<&str> {
        self.resolver.facility.as_deref()
    }
}

fn validate_identifier(field: &str, value: &str) -> ConfigResult<()> {
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: format!("must be a non-empty name without whitespace, got '{}'", value),
        });
    }
    Ok(())
}
