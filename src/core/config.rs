use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::algorithm::AlgorithmId;
use crate::encoders::algorithms::dictionary::DictionaryParams;

const BUILTIN_CONFIG: &str = include_str!("../../codecs.toml");
const CONFIG_FILE_NAME: &str = "codecs.toml";
const CONFIG_DIR_NAME: &str = "text-codec";

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Global settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Algorithm used when the caller names none
    pub default_algorithm: AlgorithmId,
}

/// Match-finder settings for the dictionary compressor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionarySettings {
    pub window: usize,
    pub min_match: usize,
    pub max_match: usize,
}

/// Resource bounds applied by decompressors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    /// Largest decompressed result, in Unicode scalar values
    pub max_output: usize,
}

/// Engine configuration loaded from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub settings: Settings,
    pub dictionary: DictionarySettings,
    pub limits: Limits,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let defaults = DictionaryParams::default();
        Self {
            settings: Settings {
                default_algorithm: AlgorithmId::Base64,
            },
            dictionary: DictionarySettings {
                window: defaults.window,
                min_match: defaults.min_match,
                max_match: defaults.max_match,
            },
            limits: Limits {
                max_output: defaults.max_output,
            },
        }
    }
}

impl EngineConfig {
    /// Parses a complete configuration from TOML content.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the built-in configuration bundled with the library.
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::from_toml(BUILTIN_CONFIG)
    }

    /// Loads the built-in configuration overlaid with a single file.
    ///
    /// Keys absent from the file keep their built-in values.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let mut table = builtin_table()?;
        merge_tables(&mut table, read_table(path)?);
        Self::from_table(table)
    }

    /// Loads configuration with user overrides from standard locations.
    ///
    /// Searches in priority order:
    /// 1. Built-in configuration (from library)
    /// 2. `~/.config/text-codec/codecs.toml` (user overrides)
    /// 3. `./codecs.toml` (project-local overrides)
    ///
    /// Later files override individual keys of earlier ones. A file that
    /// fails to load is skipped with a warning.
    pub fn load_with_overrides() -> Result<Self, ConfigError> {
        let mut table = builtin_table()?;

        let mut candidates = Vec::new();
        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME));
        }
        candidates.push(PathBuf::from(CONFIG_FILE_NAME));

        for path in candidates {
            if !path.exists() {
                continue;
            }
            match read_table(&path) {
                Ok(overlay) => {
                    log::debug!("applying config overrides from {:?}", path);
                    let mut merged = table.clone();
                    merge_tables(&mut merged, overlay);
                    // Only keep a layer that still yields a valid config
                    match Self::from_table(merged.clone()) {
                        Ok(_) => table = merged,
                        Err(e) => log::warn!("ignoring config {:?}: {}", path, e),
                    }
                }
                Err(e) => log::warn!("failed to load config from {:?}: {}", path, e),
            }
        }

        Self::from_table(table)
    }

    /// Checks cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let dict = &self.dictionary;
        if dict.window == 0 {
            return Err(ConfigError::Invalid(
                "dictionary.window must be at least 1".to_string(),
            ));
        }
        if dict.min_match == 0 {
            return Err(ConfigError::Invalid(
                "dictionary.min_match must be at least 1".to_string(),
            ));
        }
        if dict.max_match < dict.min_match {
            return Err(ConfigError::Invalid(format!(
                "dictionary.max_match ({}) must be >= min_match ({})",
                dict.max_match, dict.min_match
            )));
        }
        if self.limits.max_output == 0 {
            return Err(ConfigError::Invalid(
                "limits.max_output must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Parameters for the dictionary compressor.
    pub fn dictionary_params(&self) -> DictionaryParams {
        DictionaryParams {
            window: self.dictionary.window,
            min_match: self.dictionary.min_match,
            max_match: self.dictionary.max_match,
            max_output: self.limits.max_output,
        }
    }

    /// Renders the configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    fn from_table(table: toml::Table) -> Result<Self, ConfigError> {
        let config: Self = toml::Value::Table(table).try_into()?;
        config.validate()?;
        Ok(config)
    }
}

fn builtin_table() -> Result<toml::Table, ConfigError> {
    Ok(BUILTIN_CONFIG.parse::<toml::Table>()?)
}

fn read_table(path: &Path) -> Result<toml::Table, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(content.parse::<toml::Table>()?)
}

/// Deep-merge `overlay` into `base`; overlay values win.
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        let toml::Value::Table(incoming) = value else {
            base.insert(key, value);
            continue;
        };
        if let Some(toml::Value::Table(existing)) = base.get_mut(&key) {
            merge_tables(existing, incoming);
            continue;
        }
        base.insert(key, toml::Value::Table(incoming));
    }
}
