/// Error types for the localization controller
///
/// None of these are fatal to the host page: the controller catches them at
/// its boundary and degrades to displaying raw keys.
#[derive(Debug, thiserror::Error)]
pub enum I18nError {
    /// The catalog request could not be sent or its body could not be read
    #[error("Network error: {0}")]
    Network(String),
    /// The catalog endpoint answered with a non-success status
    #[error("HTTP error: catalog endpoint returned status {status}")]
    Http { status: u16 },
    /// The catalog payload is not a `{ locale: { key: string } }` mapping
    #[error("Malformed catalog: {0}")]
    MalformedCatalog(String),
    /// Filesystem error while reading a catalog or preference file
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// The supported/RTL/fallback locale configuration breaks an invariant
    #[error("Invalid locale set: {0}")]
    InvalidLocaleSet(String),
    /// Configuration could not be parsed
    #[error("Configuration error: {0}")]
    Config(String),
    /// The preference store rejected a write
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<reqwest::Error> for I18nError {
    fn from(err: reqwest::Error) -> Self {
        I18nError::Network(err.to_string())
    }
}

/// Result type for localization operations
pub type I18nResult<T> = Result<T, I18nError>;
