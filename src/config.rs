use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

const DEFAULT_INDENT_SIZE: usize = 2;

/// Settings for building and rendering pattern-term trees.
///
/// Every field has a default, so an empty JSON object is a valid configuration:
///
/// ```
/// use pattern_term_tree::config::TreeConfig;
///
/// let config = TreeConfig::from_json_str(r#"{ "indent_size": 4 }"#).unwrap();
/// assert_eq!(config.indent_size, 4);
/// assert!(!config.bind_quoted_variables);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Spaces per nesting level in `formatter::format_term_with`.
    pub indent_size: usize,

    /// Mark variables as bound even when they sit at a quoted position.
    pub bind_quoted_variables: bool,

    /// `EnvFilter` directive for stderr logging; falls back to `RUST_LOG`, then "info".
    pub log_level: Option<String>,

    /// Disable ANSI colors in stderr output.
    pub no_color: bool,

    /// Also write a debug-level session log under the user cache directory.
    pub file_logging: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        TreeConfig {
            indent_size: DEFAULT_INDENT_SIZE,
            bind_quoted_variables: false,
            log_level: None,
            no_color: false,
            file_logging: false,
        }
    }
}

impl TreeConfig {
    /// Parses a configuration from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|source| Error::Config { path: None, source })
    }

    /// Loads a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config = serde_json::from_str(&contents).map_err(|source| Error::Config {
            path: Some(path.to_path_buf()),
            source,
        })?;
        debug!("Loaded tree configuration from {:?}: {:?}", path, config);
        Ok(config)
    }
}
