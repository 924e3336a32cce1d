use std::path::PathBuf;

/// Comply error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Previous-run report file is missing
    #[error("'{}' not found", .path.display())]
    PriorRunMissing { path: PathBuf },

    /// Git operation failed
    #[error("git error: {0}")]
    Git(#[from] git2::Error),

    /// File I/O error
    #[error("io error: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Report could not be read or written
    #[error("report error: {0}")]
    Report(String),
}

/// Result type using comply Error
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
