use thiserror::Error;

/// Failures at the word source boundary. Callers normalise these to an
/// empty word sequence, see [`crate::word_source::fetch_or_empty`].
#[derive(Debug, Error)]
pub enum WordSourceError {
    #[error("word request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("word service answered with status {0}")]
    Status(u16),

    #[error("malformed word list: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("embedded word list unavailable: {0}")]
    EmbeddedList(String),

    #[error("no words of length {0} available")]
    NoWords(usize),
}

/// Failures while writing the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
