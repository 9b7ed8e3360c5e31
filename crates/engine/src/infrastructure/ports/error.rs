//! Error types for port operations.

use std::path::PathBuf;

use talkbook_domain::DomainError;

/// Dataset loading/writing errors with file context.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// A file the dataset cannot do without is absent.
    #[error("required file '{file}' not found in {dir}")]
    MissingRequired { file: &'static str, dir: PathBuf },

    /// A file exists but does not hold the expected document.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// Reading or writing a file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The loaded dataset breaks a structural rule.
    #[error("invalid dialogue data: {0}")]
    Invalid(#[from] DomainError),
}

impl SourceError {
    pub fn parse(file: impl Into<PathBuf>, detail: impl ToString) -> Self {
        Self::Parse {
            file: file.into(),
            detail: detail.to_string(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::MissingRequired { .. })
    }
}

/// Save file errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }
}
