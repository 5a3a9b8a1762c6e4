//! Configuration for the `signa` pipeline.
//!
//! Loaded from TOML; every section and field has a built-in default, so an
//! empty file is a valid configuration.
//!
//! ```toml
//! [assets]
//! roots = ["static/assets"]
//! extension = "mp4"
//! cache = true
//! cache_capacity = 4096
//! cache_ttl_secs = 60
//!
//! [input]
//! max_length = 65535
//! language = "english"
//! reject_controls = false
//!
//! [resources]
//! dir = "/opt/signa/resources"
//! ```
//!
//! # Settings Sources Priority
//!
//! 1. Command-line arguments (`--assets`, `--resources`)
//! 2. Environment variables (`SIGNA_ASSET_ROOT`, `SIGNA_RESOURCE_DIR`)
//! 3. TOML configuration file
//! 4. Built-in defaults

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use signa_types::{DEFAULT_ASSET_EXTENSION, MAX_INPUT_LENGTH};
use tracing::debug;

use crate::error::{Error, Result};
use crate::pipeline::assets::{DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL};
use crate::pipeline::{PipelineOptions, DEFAULT_LANGUAGE};

/// Environment variable overriding the asset roots with a single directory.
pub const ENV_ASSET_ROOT: &str = "SIGNA_ASSET_ROOT";
/// Environment variable overriding the resource directory.
pub const ENV_RESOURCE_DIR: &str = "SIGNA_RESOURCE_DIR";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Where animation clips live.
    pub assets: AssetConfig,
    /// Input limits and language.
    pub input: InputConfig,
    /// Analyzer resource overrides.
    pub resources: ResourceConfig,
}

/// `[assets]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetConfig {
    /// Directories searched in order for `<word>.<extension>`.
    pub roots: Vec<PathBuf>,
    /// Clip file extension, without the dot.
    pub extension: String,
    /// Cache positive lookup answers.
    pub cache: bool,
    /// Most clip names held by the cache.
    pub cache_capacity: usize,
    /// Seconds a cached answer stays valid.
    pub cache_ttl_secs: u64,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            roots: vec![PathBuf::from("static/assets")],
            extension: DEFAULT_ASSET_EXTENSION.to_string(),
            cache: true,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            cache_ttl_secs: DEFAULT_CACHE_TTL.as_secs(),
        }
    }
}

/// `[input]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    /// Maximum raw input size in bytes.
    pub max_length: usize,
    /// Stopword language.
    pub language: String,
    /// Reject sentences containing non-whitespace control characters.
    pub reject_controls: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            max_length: MAX_INPUT_LENGTH,
            language: DEFAULT_LANGUAGE.to_string(),
            reject_controls: false,
        }
    }
}

/// `[resources]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResourceConfig {
    /// Directory overriding the embedded lexicon, exceptions and stopwords.
    pub dir: Option<PathBuf>,
}

impl Config {
    /// Parses TOML text.
    ///
    /// # Errors
    ///
    /// `Error::Config` on malformed TOML, unknown keys, or invalid values.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(source).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// `Error::Io` if the file cannot be read, `Error::Config` if it is invalid.
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source).map_err(|e| match e {
            Error::Config(msg) => Error::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })?;
        debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Applies `SIGNA_ASSET_ROOT` and `SIGNA_RESOURCE_DIR` from the process
    /// environment.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var_os(key).map(PathBuf::from));
    }

    /// Applies environment overrides read through `var`.
    pub fn apply_env_from<F>(&mut self, mut var: F)
    where
        F: FnMut(&str) -> Option<PathBuf>,
    {
        if let Some(root) = var(ENV_ASSET_ROOT).filter(|p| !p.as_os_str().is_empty()) {
            debug!(root = %root.display(), "asset root from environment");
            self.assets.roots = vec![root];
        }
        if let Some(dir) = var(ENV_RESOURCE_DIR).filter(|p| !p.as_os_str().is_empty()) {
            debug!(dir = %dir.display(), "resource dir from environment");
            self.resources.dir = Some(dir);
        }
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// `Error::Config` naming the first offending key.
    pub fn validate(&self) -> Result<()> {
        let ext = &self.assets.extension;
        if ext.is_empty() {
            return Err(Error::Config("assets.extension must not be empty".into()));
        }
        if ext.contains(['.', '/', '\\']) {
            return Err(Error::Config(format!(
                "assets.extension {:?} must be a bare extension such as \"mp4\"",
                ext
            )));
        }
        if self.assets.cache && self.assets.cache_capacity == 0 {
            return Err(Error::Config(
                "assets.cache_capacity must be at least 1 when caching is enabled".into(),
            ));
        }
        if self.input.max_length == 0 {
            return Err(Error::Config("input.max_length must be at least 1".into()));
        }
        if self.input.language.trim().is_empty() {
            return Err(Error::Config("input.language must not be empty".into()));
        }
        Ok(())
    }

    /// Pipeline options derived from this configuration.
    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            language: self.input.language.clone(),
            extension: self.assets.extension.clone(),
            max_input_length: self.input.max_length,
            reject_control_chars: self.input.reject_controls,
        }
    }
}

impl AssetConfig {
    /// Cache entry lifetime.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}
