use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeekvaultError {
    #[error("Unsupported hash algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Derived key length {requested} is too short: need at least {minimum} bytes for the cipher key and IV")]
    InsufficientKeyLength { requested: usize, minimum: usize },

    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("Document data is not text and no keyword extractor was supplied")]
    MissingKeywordExtractor,

    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),
}

pub type Result<T> = std::result::Result<T, SeekvaultError>;
