//! Error types for configuration loading.
//!
//! Every failure aborts the whole load; callers never see a partially
//! validated [`ThemeConfig`](crate::ThemeConfig).

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a theme configuration document.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document does not have the expected shape.
    #[error("invalid config at '{path}': {message}")]
    InvalidConfig {
        /// Dotted location in the document (e.g. `theme.extend.colors`).
        path: String,
        /// What was wrong.
        message: String,
    },

    /// A palette shade is not a `#RRGGBB` color literal.
    #[error("invalid color '{value}' for shade '{shade}' in palette '{palette}'")]
    InvalidColor {
        palette: String,
        shade: String,
        value: String,
    },

    /// A keyframe selector is neither a percentage nor `from`/`to`.
    #[error("invalid keyframe key '{key}' in group '{group}'")]
    InvalidKeyframeKey { group: String, key: String },

    /// A content glob has malformed syntax.
    #[error("invalid content glob '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    /// The document text could not be parsed as YAML or JSON.
    #[error("failed to parse config{}: {message}", display_path(.path))]
    Parse {
        path: Option<PathBuf>,
        message: String,
    },

    /// The config file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" {}", p.display()))
        .unwrap_or_default()
}

impl ConfigError {
    pub(crate) fn invalid(path: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::InvalidConfig {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type for configuration loading.
pub type Result<T> = std::result::Result<T, ConfigError>;
