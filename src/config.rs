use crate::animations::{DeleteSpeed, TypewriterTiming};
use crate::portfolio::{PortfolioContent, PortfolioError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE_NAME: &str = "config.yaml";

/// Errors that can occur when loading the configuration file
#[derive(thiserror::Error, Debug)]
pub enum ConfigLoadError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] serde_yaml::Error),
}

#[derive(Clone, Debug, Default, Deserialize)]
#[cfg_attr(feature = "json-schema", derive(schemars::JsonSchema))]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// The API server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Where the profile content comes from.
    #[serde(default)]
    pub portfolio: PortfolioConfig,

    /// The hero typewriter configuration.
    #[serde(default)]
    pub typewriter: TypewriterConfig,
}

impl Config {
    /// Load the configuration.
    ///
    /// An explicitly given path must exist. Otherwise the file in the user's config directory is
    /// used if present, and the defaults if not.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigLoadError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) if path.exists() => path,
                _ => {
                    tracing::debug!("no configuration file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };
        let contents = std::fs::read_to_string(&path)?;
        let config = Self::from_yaml(&contents)?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, ConfigLoadError> {
        // an empty file is a valid, empty configuration
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }

    /// `<config dir>/folio/config.yaml` for the current platform
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "folio").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

#[derive(Clone, Debug, Deserialize)]
#[cfg_attr(feature = "json-schema", derive(schemars::JsonSchema))]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// The address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// The port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

fn default_host() -> String {
    "127.0.0.1".into()
}

fn default_port() -> u16 {
    8001
}

#[derive(Clone, Debug, Default, Deserialize)]
#[cfg_attr(feature = "json-schema", derive(schemars::JsonSchema))]
#[serde(deny_unknown_fields)]
pub struct PortfolioConfig {
    /// A YAML or JSON profile file. The bundled profile is used when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl PortfolioConfig {
    pub fn load_content(&self) -> Result<PortfolioContent, PortfolioError> {
        match &self.path {
            Some(path) => PortfolioContent::from_path(path),
            None => PortfolioContent::embedded(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "json-schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum DeleteMode {
    /// Every deleted character halves the previous delay.
    #[default]
    Halving,

    /// Every deleted character waits `delete_interval_ms`.
    Constant,
}

#[derive(Clone, Debug, Deserialize)]
#[cfg_attr(feature = "json-schema", derive(schemars::JsonSchema))]
#[serde(deny_unknown_fields)]
pub struct TypewriterConfig {
    /// The phrases to cycle through, in order.
    #[serde(default = "default_phrases")]
    pub phrases: Vec<String>,

    /// The delay between typed characters, in milliseconds.
    #[serde(default = "default_typing_interval")]
    pub typing_interval_ms: u64,

    /// How long a fully typed phrase stays on screen, in milliseconds.
    #[serde(default = "default_pause")]
    pub pause_ms: u64,

    /// The shortest delay ever scheduled, in milliseconds.
    #[serde(default = "default_min_interval")]
    pub min_interval_ms: u64,

    /// How the delete speed evolves.
    #[serde(default)]
    pub delete: DeleteMode,

    /// The delay between deleted characters when using the constant delete mode.
    #[serde(default = "default_delete_interval")]
    pub delete_interval_ms: u64,
}

impl TypewriterConfig {
    pub fn timing(&self) -> TypewriterTiming {
        let delete = match self.delete {
            DeleteMode::Halving => DeleteSpeed::Halving,
            DeleteMode::Constant => DeleteSpeed::Constant(Duration::from_millis(self.delete_interval_ms)),
        };
        TypewriterTiming {
            typing: Duration::from_millis(self.typing_interval_ms),
            pause: Duration::from_millis(self.pause_ms),
            // a zero delay would spin the timer loop
            min_interval: Duration::from_millis(self.min_interval_ms.max(1)),
            delete,
        }
    }
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            phrases: default_phrases(),
            typing_interval_ms: default_typing_interval(),
            pause_ms: default_pause(),
            min_interval_ms: default_min_interval(),
            delete: DeleteMode::default(),
            delete_interval_ms: default_delete_interval(),
        }
    }
}

fn default_phrases() -> Vec<String> {
    ["AI/ML Developer", "Full-Stack Enthusiast", "Data Scientist", "Problem Solver"].map(String::from).to_vec()
}

fn default_typing_interval() -> u64 {
    TypewriterTiming::DEFAULT_TYPING.as_millis() as u64
}

fn default_pause() -> u64 {
    TypewriterTiming::DEFAULT_PAUSE.as_millis() as u64
}

fn default_min_interval() -> u64 {
    TypewriterTiming::DEFAULT_MIN_INTERVAL.as_millis() as u64
}

fn default_delete_interval() -> u64 {
    50
}
