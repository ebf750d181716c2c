//! Settings file describing where catalogs live and which language to use.
//!
//! ```toml
//! language = "hr_HR"
//! translations_dir = "locale"
//! file_prefix = "digiwage_"
//! include_unfinished = true
//! ```
//!
//! Every key is optional. A relative `translations_dir` is resolved against
//! the directory of the settings file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use toml::{de, ser};

use crate::runtime::{LoadOptions, Translator, resolve_locale};

/// Default directory holding `.ts` files.
pub const DEFAULT_TRANSLATIONS_DIR: &str = "locale";

/// Errors that occur while reading or writing settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid settings in '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: de::Error,
    },

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] ser::Error),
}

/// Translation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Saved UI language. The command line overrides it and it overrides
    /// the system locale.
    pub language: Option<String>,
    pub translations_dir: PathBuf,
    /// Prepended to the locale name to form file names.
    pub file_prefix: String,
    pub include_unfinished: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            language: None,
            translations_dir: PathBuf::from(DEFAULT_TRANSLATIONS_DIR),
            file_prefix: String::new(),
            include_unfinished: true,
        }
    }
}

impl Config {
    /// Read settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        if config.translations_dir.is_relative() {
            let parent = path.parent().unwrap_or(Path::new(""));
            config.translations_dir = parent.join(&config.translations_dir);
        }
        tracing::debug!(path = %path.display(), ?config, "loaded settings");
        Ok(config)
    }

    /// Parse settings from TOML text. Relative paths are kept as written.
    ///
    /// ```
    /// use tscat::Config;
    ///
    /// let config = Config::from_toml_str(r#"language = "pl""#).unwrap();
    /// assert_eq!(config.language.as_deref(), Some("pl"));
    /// assert!(config.include_unfinished);
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self, de::Error> {
        toml::from_str(content)
    }

    /// Write settings as TOML, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let io_error = |e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(io_error)
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions::builder()
            .include_unfinished(self.include_unfinished)
            .build()
    }

    /// Build a translator for the resolved UI locale.
    ///
    /// `cli_language` takes precedence over [`Config::language`], which
    /// takes precedence over the system locale.
    pub fn translator(&self, cli_language: Option<&str>) -> Translator {
        let locale = resolve_locale(cli_language, self.language.as_deref());
        Translator::for_locale(
            &self.translations_dir,
            &self.file_prefix,
            &locale,
            self.load_options(),
        )
    }
}
