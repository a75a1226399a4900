//! XML detection orchestrator.
//!
//! Ties a byte source to the prologue sniffer and the streaming classifier:
//! the prologue is peeked, the BOM skipped, and the rest of the stream is
//! decoded chunk by chunk into the classifier until it reaches a verdict or
//! the stream ends.

use std::fs::File;
use std::path::Path;

use super::classifier::RootClassifier;
use super::options::DetectorOptions;
use super::prologue::sniff_prologue;
use super::source::{ByteSource, PeekReader, SliceSource};
use super::types::FormatDescriptor;
use crate::common::{ChunkDecoder, Result};

/// Identifier under which the XML detector registers in a pipeline.
pub const XML_DETECTOR_ID: &str = "xml";

/// A content-type detector that can take part in a sniffing pipeline.
///
/// Detectors are tried in sequence by the surrounding pipeline. A detector
/// returning `Ok(None)` declines the input, leaving it to its siblings.
pub trait Detector {
    /// Stable identifier of the detector.
    fn id(&self) -> &'static str;

    /// Inspect `source` and report the detected format, if any.
    fn detect(&self, source: &mut dyn ByteSource) -> Result<Option<FormatDescriptor>>;
}

/// Detector for XML and XML-based formats.
///
/// # Examples
///
/// ```rust
/// use xml_sniffer::detection::{Detector, SliceSource, XmlDetector};
///
/// let detectors: Vec<Box<dyn Detector>> = vec![Box::new(XmlDetector::default())];
/// let mut source = SliceSource::new(b"<?xml version=\"1.0\"?><rss version=\"2.0\"></rss>");
///
/// let format = detectors[0].detect(&mut source)?.unwrap();
/// assert_eq!(format.extension(), "rss");
/// # Ok::<(), xml_sniffer::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct XmlDetector {
    options: DetectorOptions,
}

impl XmlDetector {
    pub fn new(options: DetectorOptions) -> Self {
        Self { options }
    }

    #[inline]
    pub fn options(&self) -> &DetectorOptions {
        &self.options
    }
}

impl Detector for XmlDetector {
    fn id(&self) -> &'static str {
        XML_DETECTOR_ID
    }

    fn detect(&self, source: &mut dyn ByteSource) -> Result<Option<FormatDescriptor>> {
        detect_xml_with(source, &self.options)
    }
}

/// Detect an XML-based format with default options.
///
/// See [`detect_xml_with`].
pub fn detect_xml<S: ByteSource + ?Sized>(source: &mut S) -> Result<Option<FormatDescriptor>> {
    detect_xml_with(source, &DetectorOptions::default())
}

/// Detect an XML-based format from a byte source.
///
/// # Returns
///
/// * `Ok(None)` if the content does not start with an XML prologue; nothing
///   beyond the peeked sample has been consumed in that case
/// * `Ok(Some(format))` with the format identified by the root element, or
///   [`FormatDescriptor::GENERIC_XML`] when the root is not recognised or
///   the document turns out to be malformed
/// * `Err(_)` only when the byte source itself fails
pub fn detect_xml_with<S: ByteSource + ?Sized>(
    source: &mut S,
    options: &DetectorOptions,
) -> Result<Option<FormatDescriptor>> {
    let options = options.clamped();
    let mut buffer = vec![0u8; options.chunk_len.max(options.sample_len)];

    let sampled = source.peek(&mut buffer[..options.sample_len])?;
    let Some(prologue) = sniff_prologue(&buffer[..sampled]) else {
        return Ok(None);
    };

    source.skip(prologue.skip_offset)?;

    let mut decoder = ChunkDecoder::new(prologue.encoding);
    let mut classifier = RootClassifier::new(options.full_scan);
    let chunk = &mut buffer[..options.chunk_len];

    loop {
        let len = source.read(chunk)?;
        let end_of_stream = len < chunk.len();

        let text = decoder.decode(&chunk[..len], end_of_stream);
        classifier.feed(&text);

        if end_of_stream {
            classifier.finish();
        }
        if classifier.is_terminated() {
            break;
        }
    }

    sniff_debug!(format = ?classifier.result(), "xml detection finished");

    Ok(Some(classifier.result().unwrap_or(FormatDescriptor::GENERIC_XML)))
}

/// Detect an XML-based format from a byte slice.
///
/// # Examples
///
/// ```rust
/// use xml_sniffer::detection::detect_xml_from_bytes;
///
/// let svg = b"<?xml version=\"1.0\"?>\n<svg xmlns=\"http://www.w3.org/2000/svg\"/>";
/// assert_eq!(detect_xml_from_bytes(svg).unwrap().mime_type(), "image/svg+xml");
///
/// assert!(detect_xml_from_bytes(b"GIF89a").is_none());
/// ```
pub fn detect_xml_from_bytes(bytes: &[u8]) -> Option<FormatDescriptor> {
    let mut source = SliceSource::new(bytes);
    // Reading from a slice cannot fail
    detect_xml(&mut source).ok().flatten()
}

/// Detect an XML-based format from a file path.
///
/// Only as much of the file as the classifier needs is read.
pub fn detect_xml_file<P: AsRef<Path>>(path: P) -> Result<Option<FormatDescriptor>> {
    let mut source = PeekReader::new(File::open(path)?);
    detect_xml(&mut source)
}
