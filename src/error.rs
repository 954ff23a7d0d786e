use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiftError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Source directory not found: {path}")]
    SourceNotFound { path: PathBuf },

    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to copy {from} to {to}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to remove {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Permission denied: {path}")]
    Permission { path: PathBuf },

    #[error("Path validation failed: {path}")]
    InvalidPath { path: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to read {what} from the terminal: {source}")]
    Prompt {
        what: String,
        #[source]
        source: std::io::Error,
    },
}

impl SiftError {
    /// Wrap an I/O error raised while creating `path`.
    pub fn create_dir(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::PermissionDenied {
            return SiftError::Permission { path: path.to_path_buf() };
        }
        SiftError::CreateDir { path: path.to_path_buf(), source }
    }

    pub fn copy(from: &Path, to: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::PermissionDenied {
            return SiftError::Permission { path: to.to_path_buf() };
        }
        SiftError::Copy {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            source,
        }
    }

    pub fn remove(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::PermissionDenied {
            return SiftError::Permission { path: path.to_path_buf() };
        }
        SiftError::Remove { path: path.to_path_buf(), source }
    }

    pub fn walk(root: &Path, source: walkdir::Error) -> Self {
        let path = source
            .path()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| root.to_path_buf());

        if source
            .io_error()
            .is_some_and(|e| e.kind() == std::io::ErrorKind::PermissionDenied)
        {
            return SiftError::Permission { path };
        }
        SiftError::Walk { path, source }
    }
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for SiftError {
    fn user_message(&self) -> String {
        match self {
            SiftError::SourceNotFound { path } => {
                format!("Source directory does not exist: {}", path.display())
            }
            SiftError::NotADirectory { path } => {
                format!("Source is not a directory: {}", path.display())
            }
            SiftError::Permission { path } => {
                format!("Permission denied accessing: {}", path.display())
            }
            SiftError::Copy { from, to, source } => {
                format!(
                    "Could not copy {} to {}: {}",
                    from.display(),
                    to.display(),
                    source
                )
            }
            SiftError::Remove { path, source } => {
                format!(
                    "Copied but could not delete the original {}: {}",
                    path.display(),
                    source
                )
            }
            SiftError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            SiftError::SourceNotFound { .. } | SiftError::NotADirectory { .. } => Some(
                "Check the source path; it must point to an existing directory.".to_string()
            ),
            SiftError::Permission { .. } => Some(
                "Ensure you have read access to the source tree and write access to the destination.".to_string()
            ),
            SiftError::Remove { .. } => Some(
                "The copy at the destination is complete. Delete the original by hand or re-run once it is writable.".to_string()
            ),
            SiftError::Copy { .. } | SiftError::CreateDir { .. } => Some(
                "Files moved before this one are already at the destination; re-running continues with the rest.".to_string()
            ),
            SiftError::Config { .. } => Some(
                "Check the configuration file syntax and the --extensions list.".to_string()
            ),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SiftError>;
