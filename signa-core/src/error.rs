//! Error types for signa-core.

use std::io;
use std::path::PathBuf;

use signa_types::InputError;
use thiserror::Error;

/// Failure of the asset-existence lookup.
///
/// Aborts the current request; the pipeline never treats it as "not found".
#[derive(Error, Debug)]
#[error("asset lookup failed for {asset}: {source}")]
pub struct LookupError {
    /// Asset name that was being looked up, e.g. `home.mp4`.
    pub asset: String,
    /// Underlying I/O failure.
    #[source]
    pub source: io::Error,
}

impl LookupError {
    /// Wraps an I/O error raised while looking up `asset`.
    pub fn new(asset: impl Into<String>, source: io::Error) -> Self {
        Self {
            asset: asset.into(),
            source,
        }
    }
}

/// Main error type for signa-core.
#[derive(Error, Debug)]
pub enum Error {
    /// Raw text rejected before the pipeline ran
    #[error("invalid input: {0}")]
    Input(#[from] InputError),

    /// Asset lookup failed mid-request
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// Tagger, stopword or lemmatizer resources are not ready
    #[error("capability unavailable: {0}")]
    CapabilityUnavailable(String),

    /// Malformed line in a resource file
    #[error("resource error in {file} line {line}: {reason}")]
    Resource {
        /// Resource file name.
        file: String,
        /// 1-based line number.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },

    /// Invalid or unreadable configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// File I/O outside of asset lookups
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

/// Convenience Result type using signa-core Error
pub type Result<T> = std::result::Result<T, Error>;
