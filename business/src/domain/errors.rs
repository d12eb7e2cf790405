/// Storage errors for the paper workspace.
/// Use code-style identifiers for all error variants for i18n compatibility.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage.not_found")]
    NotFound,
    #[error("storage.io")]
    Io,
}

impl StorageError {
    pub fn not_found() -> Self {
        StorageError::NotFound
    }
    pub fn io() -> Self {
        StorageError::Io
    }
}
