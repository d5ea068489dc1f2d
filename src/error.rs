use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the ambient parts of the crate (configuration and logging).
///
/// Building and querying pattern-term trees never fails: unresolvable
/// positions are reported through `PatternTermPtr::UNDEFINED` instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid configuration in {path:?}: {source}")]
    Config {
        path: Option<PathBuf>,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to initialize logging: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, Error>;
