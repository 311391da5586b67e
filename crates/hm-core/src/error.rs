use std::path::PathBuf;

/// Alias for `Result<T, CatalogError>`.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur when reading or mutating the catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// A service with the same normalized name already exists.
    #[error("service already exists: \"{0}\"")]
    DuplicateEntry(String),

    /// The name is empty or contains characters that cannot be guessed.
    #[error("invalid service name: \"{0}\" (use letters and digits only)")]
    InvalidName(String),

    /// The difficulty string is not one of Easy, Medium, Hard.
    #[error("invalid difficulty: \"{0}\" (expected easy, medium, or hard)")]
    InvalidDifficulty(String),

    /// Reading or writing a snapshot failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// The file that was being accessed.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },

    /// A snapshot or feed document was not valid JSON of the expected shape.
    #[error("malformed document: {0}")]
    Json(#[from] serde_json::Error),
}

impl CatalogError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
