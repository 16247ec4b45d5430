//! Error types for configuration operations.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::validation::ValidationError;

/// File operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    /// Reading a preset file.
    Read,
    /// Writing a preset file.
    Write,
    /// Creating a preset directory.
    CreateDir,
}

impl fmt::Display for FileAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FileAction::Read => "read",
            FileAction::Write => "write",
            FileAction::CreateDir => "create directory",
        })
    }
}

/// Errors from loading, saving or applying presets.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A preset file or directory could not be accessed.
    #[error("cannot {action} '{}': {source}", .path.display())]
    Io {
        /// What was being attempted.
        action: FileAction,
        /// The file or directory involved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Malformed preset TOML.
    #[error("invalid preset TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A preset could not be rendered as TOML.
    #[error("cannot serialize preset: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// No file, user preset or factory preset matches the name.
    #[error("preset not found: {0}")]
    PresetNotFound(String),

    /// A `key=value` assignment that could not be split.
    #[error("invalid parameter assignment '{0}': expected key=value")]
    InvalidAssignment(String),

    /// One or more parameter values were rejected.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ConfigError {
    pub(crate) fn read_file(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::io(FileAction::Read, path, source)
    }

    pub(crate) fn write_file(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::io(FileAction::Write, path, source)
    }

    pub(crate) fn create_dir(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::io(FileAction::CreateDir, path, source)
    }

    fn io(action: FileAction, path: impl Into<PathBuf>, source: io::Error) -> Self {
        ConfigError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}
