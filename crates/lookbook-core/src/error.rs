use thiserror::Error;

/// Why the outfit catalog could not be loaded
///
/// Either variant leaves the gallery without cards; the page shell keeps
/// working and shows the message instead.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Could not reach {source_name}: {reason}")]
    Unreachable { source_name: String, reason: String },

    #[error("Could not parse {source_name}: {reason}")]
    Malformed { source_name: String, reason: String },
}

/// All the ways things can go wrong in Lookbook
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Storage error: {0}")]
    Storage(#[from] lookbook_cache::CacheError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Export error: {0}")]
    ExportError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
