//! XML format detection.
//!
//! This module identifies, from a byte stream alone, whether content is XML
//! and which XML-based format it carries. Only the prologue sample and as
//! much of the document as is needed to see the root element are read.
//!
//! The detection runs in two stages:
//! - the prologue sniffer checks the first bytes for an `<?xml ` declaration
//!   in UTF-8 or UTF-16, with or without a byte order mark
//! - the root classifier decodes the rest of the stream chunk by chunk and
//!   maps the first element to a format by namespace or by name

// Submodule declarations
pub mod classifier;
pub mod detector;
pub mod options;
pub mod prologue;
pub mod signature;
pub mod source;
pub mod tables;
pub mod types;

// Re-exports
pub use classifier::{ClassifierState, RootClassifier, RootResolution};
pub use detector::{
    Detector, XML_DETECTOR_ID, XmlDetector, detect_xml, detect_xml_file, detect_xml_from_bytes,
    detect_xml_with,
};
pub use options::DetectorOptions;
pub use prologue::{PrologueDetection, sniff_prologue};
pub use source::{ByteSource, PeekReader, SliceSource};
pub use types::FormatDescriptor;
