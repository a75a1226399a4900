//! xml-sniffer - Identify XML-based file formats from a byte stream
//!
//! This library decides whether content is XML and, if so, which XML-based
//! format it represents, without buffering or fully parsing the document.
//! It is meant to run as one detector among many in a content-type sniffing
//! pipeline.
//!
//! # Features
//!
//! - **Prologue sniffing**: Recognises `<?xml ` declarations in UTF-8 and
//!   UTF-16 (big and little endian), with or without a byte order mark
//! - **Streaming classification**: Decodes the stream chunk by chunk and stops
//!   as soon as the root element identifies the format
//! - **Namespace-aware lookup**: Maps the root element namespace (or its name
//!   for non-namespaced documents) to an extension and MIME type
//! - **Full scan mode**: Optionally verifies that the root element balances
//! - **DOCTYPE parsing**: Extracts root name, public and system identifiers
//!
//! # Example - Detecting a file
//!
//! ```no_run
//! use xml_sniffer::detect_xml_file;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! match detect_xml_file("drawing.svg")? {
//!     Some(format) => println!("{} ({})", format.extension(), format.mime_type()),
//!     None => println!("not XML"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Detecting bytes
//!
//! ```
//! use xml_sniffer::detect_xml_from_bytes;
//!
//! let rss = b"<?xml version=\"1.0\"?><rss version=\"2.0\"><channel/></rss>";
//! let format = detect_xml_from_bytes(rss).unwrap();
//! assert_eq!(format.extension(), "rss");
//! assert_eq!(format.mime_type(), "application/rss+xml");
//! ```
//!
//! # Example - Feeding the classifier directly
//!
//! ```
//! use xml_sniffer::detection::RootClassifier;
//!
//! let mut classifier = RootClassifier::new(true);
//! classifier.feed("<svg><div></svg>");
//! classifier.finish();
//! assert!(classifier.result().is_none());
//! ```

#[macro_use]
mod macros;

/// Shared error, byte order mark and text encoding primitives
pub mod common;

/// Prologue sniffing, root-element classification and the detector itself
pub mod detection;

/// DOCTYPE declaration parsing
pub mod doctype;

// Re-export commonly used types for convenience
pub use common::{Error, Result, TextEncoding};
pub use detection::{
    ByteSource, Detector, DetectorOptions, FormatDescriptor, PeekReader, RootClassifier,
    SliceSource, XmlDetector, detect_xml, detect_xml_file, detect_xml_from_bytes, detect_xml_with,
    sniff_prologue,
};
pub use doctype::{DoctypeKind, ParsedDoctype, parse_doctype};
