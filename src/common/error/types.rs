//! Unified error types for the sniffer.
//!
//! Malformed or non-XML input is never reported through this type: sniffing
//! arbitrary bytes yields a negative classification instead. Errors are
//! reserved for failures of the byte source itself.
use thiserror::Error;

/// Main error type for sniffing operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error raised by the underlying byte source
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// XML tokenizer error surfaced outside of classification
    #[error("XML error: {0}")]
    XmlError(String),

    /// Text could not be decoded with the detected encoding
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Invalid input format
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Result type for sniffing operations.
pub type Result<T> = std::result::Result<T, Error>;
