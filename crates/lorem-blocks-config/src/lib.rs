//! Settings for the `lorem-blocks` tool, read from a TOML file.
//!
//! Every key is optional. The file is looked up at `$LOREM_BLOCKS_CONFIG` when
//! set (shell variables and `~` expanded), otherwise at
//! `~/.config/lorem-blocks/config.toml`.

use lorem_blocks_engine::lorem::{DEFAULT_COUNT, MAX_COUNT};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV: &str = "LOREM_BLOCKS_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("default_count = {value} in {path} exceeds the limit of {max} sentences", max = MAX_COUNT)]
    DefaultCountTooLarge { path: PathBuf, value: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Sentences generated when a `lorem` macro has no `num` attribute.
    pub default_count: usize,
    /// Render HTML instead of source text.
    pub html: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_count: DEFAULT_COUNT,
            html: false,
        }
    }
}

impl Config {
    /// Parse settings, attributing errors to `path`.
    pub fn from_toml(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if config.default_count > MAX_COUNT {
            return Err(ConfigError::DefaultCountTooLarge {
                path: path.to_path_buf(),
                value: config.default_count,
            });
        }
        Ok(config)
    }

    /// Read settings from `path`. A missing file is `Ok(None)`.
    pub fn load_from_path(path: &Path) -> Result<Option<Self>, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Self::from_toml(&content, path).map(Some)
    }

    /// Settings from the default location, or defaults when there is no file.
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self::load_from_path(&Self::config_path())?.unwrap_or_default())
    }

    pub fn config_path() -> PathBuf {
        resolve_config_path(std::env::var(CONFIG_ENV).ok().as_deref())
    }
}

fn resolve_config_path(override_path: Option<&str>) -> PathBuf {
    match override_path.filter(|p| !p.trim().is_empty()) {
        Some(raw) => match shellexpand::full(raw) {
            Ok(expanded) => PathBuf::from(expanded.as_ref()),
            Err(_) => PathBuf::from(raw),
        },
        None => PathBuf::from(shellexpand::tilde("~/.config/lorem-blocks/config.toml").as_ref()),
    }
}
