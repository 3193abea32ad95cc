//! ``src/error.rs``
//! ============================================================================
//! # `AppError`: Unified Error Type for the Commander
//!
//! Every fallible operation in the library returns `Result<T, AppError>`.
//! Filesystem failures are mapped to path-carrying variants so that the
//! status line can name what went wrong without extra bookkeeping.

use std::{
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Unified error type for all commander operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Standard IO error without a known path.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Requested file or directory does not exist.
    #[error("not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Permissions error for file/directory access.
    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    /// Destination already exists and would be overwritten.
    #[error("destination already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    /// A directory was expected.
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// A directory copy whose destination lies inside the source tree.
    #[error("cannot copy {} into itself: {}", src.display(), dst.display())]
    DestinationInsideSource { src: PathBuf, dst: PathBuf },

    /// Any other failure of a file operation.
    #[error("{operation} failed on {}: {reason}", path.display())]
    FileOperationFailed {
        operation: String,
        path: PathBuf,
        reason: String,
    },

    /// TOML config parsing error.
    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// Config file I/O error with path.
    #[error("Failed to read config file {path:?}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Terminal I/O or rendering error.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Any other error, with description.
    #[error("Unexpected error: {0}")]
    Other(String),
}

impl AppError {
    /// Map an `io::Error` raised while touching `path` onto the closest variant.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            ErrorKind::AlreadyExists => Self::AlreadyExists(path.to_path_buf()),
            ErrorKind::NotADirectory => Self::NotADirectory(path.to_path_buf()),
            _ => Self::FileOperationFailed {
                operation: "io".to_string(),
                path: path.to_path_buf(),
                reason: err.to_string(),
            },
        }
    }

    /// Create a file operation failure error
    pub fn file_operation_failed<S1, P, S2>(operation: S1, path: P, reason: S2) -> Self
    where
        S1: Into<String>,
        P: Into<PathBuf>,
        S2: Into<String>,
    {
        Self::FileOperationFailed {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }
}

// Manual Clone implementation to handle non-Clone fields
impl Clone for AppError {
    fn clone(&self) -> Self {
        match self {
            Self::Io(e) => Self::Io(io::Error::new(e.kind(), e.to_string())),
            Self::NotFound(path) => Self::NotFound(path.clone()),
            Self::PermissionDenied(path) => Self::PermissionDenied(path.clone()),
            Self::AlreadyExists(path) => Self::AlreadyExists(path.clone()),
            Self::NotADirectory(path) => Self::NotADirectory(path.clone()),
            Self::DestinationInsideSource { src, dst } => Self::DestinationInsideSource {
                src: src.clone(),
                dst: dst.clone(),
            },
            Self::FileOperationFailed {
                operation,
                path,
                reason,
            } => Self::FileOperationFailed {
                operation: operation.clone(),
                path: path.clone(),
                reason: reason.clone(),
            },
            Self::Config(e) => Self::Other(format!("Config error: {e}")),
            Self::ConfigIo { path, source } => Self::ConfigIo {
                path: path.clone(),
                source: io::Error::new(source.kind(), source.to_string()),
            },
            Self::Terminal(msg) => Self::Terminal(msg.clone()),
            Self::Other(msg) => Self::Other(msg.clone()),
        }
    }
}
