use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Document not found in parse store: {0}")]
    UnknownDocument(String),

    #[error("Token reference out of range in document {doc_id}: sentence {sentence}, word {word}")]
    TokenOutOfRange {
        doc_id: String,
        sentence: usize,
        word: usize,
    },

    #[error("Malformed relation record: {0}")]
    MalformedRecord(String),

    #[error("Invalid vector dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// True for the failures that mean the record itself is corrupt
    /// (unresolvable coordinates, missing fields) rather than misconfiguration.
    pub fn is_malformed_record(&self) -> bool {
        matches!(
            self,
            Error::UnknownDocument(_) | Error::TokenOutOfRange { .. } | Error::MalformedRecord(_)
        )
    }
}
