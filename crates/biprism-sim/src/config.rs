use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use biprism_core::SynthesisOpts;
use biprism_store::DEFAULT_PARAMS_FILE;
use biprism_view::FigureConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "biprism.toml";

fn default_params_file() -> PathBuf {
    PathBuf::from(DEFAULT_PARAMS_FILE)
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {1:?}")]
    Read(#[source] io::Error, PathBuf),
    #[error("invalid config {1:?}: {0}")]
    Parse(#[source] toml::de::Error, PathBuf),
}

/// Host settings; every field falls back to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimConfig {
    #[serde(default = "default_params_file")]
    pub params_file: PathBuf,
    #[serde(default)]
    pub synthesis: SynthesisOpts,
    #[serde(default)]
    pub figure: FigureConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            params_file: default_params_file(),
            synthesis: SynthesisOpts::default(),
            figure: FigureConfig::default(),
        }
    }
}

impl SimConfig {
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|err| ConfigError::Parse(err, origin.to_path_buf()))
    }

    /// Reads `path`, or the default file when it exists, or nothing.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !fallback.exists() {
                    return Ok(Self::default());
                }
                fallback
            }
        };
        let text =
            fs::read_to_string(&path).map_err(|err| ConfigError::Read(err, path.clone()))?;
        let config = Self::from_toml_str(&text, &path)?;
        debug!("loaded config from {}", path.display());
        Ok(config)
    }
}
