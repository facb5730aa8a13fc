use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DigestError {
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No PDF files found in {}", .0.display())]
    NoInputFound(PathBuf),

    #[error("Malformed model response: missing '{marker}' marker")]
    MalformedResponse { marker: &'static str },

    #[error("Failed to extract text from PDF {}: {message}", path.display())]
    Pdf { path: PathBuf, message: String },

    #[error("Summarization service error: {0}")]
    Service(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl DigestError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DigestError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, DigestError>;
