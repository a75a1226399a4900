//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert from
//! third-party error types to the unified Error type.

use super::types::Error;

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        match err {
            quick_xml::Error::Io(e) => Error::Io(std::io::Error::new(e.kind(), e.to_string())),
            quick_xml::Error::Encoding(e) => Error::Encoding(e.to_string()),
            other => Error::XmlError(other.to_string()),
        }
    }
}
