/// Library-specific errors
use thiserror::Error;

/// Result type alias using `LibraryError`
pub type Result<T> = std::result::Result<T, LibraryError>;

#[derive(Error, Debug)]
pub enum LibraryError {
    /// The configured music directory does not exist
    #[error("Music directory not found: {0}")]
    MusicDirMissing(String),

    /// The persisted song store could not be parsed or written
    #[error("Song store is unreadable: {0}")]
    Store(#[from] serde_json::Error),

    /// Tag reading error
    #[error("Tag reading error: {0}")]
    Metadata(#[from] lofty::error::LoftyError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
