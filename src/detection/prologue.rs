//! XML prologue sniffing.
//!
//! Decides from a fixed-size byte prefix whether the content starts with an
//! `<?xml ` declaration, in which encoding it is written, and how many BOM
//! bytes precede it. No I/O happens here.

use super::signature::signature_matches_any;
use crate::common::{BomKind, TextEncoding};

/// Minimum number of bytes the orchestrator asks to peek for sniffing.
pub const MIN_SAMPLE_LEN: usize = 128;

/// Size of the peek buffer the sample is taken from.
pub const SAMPLE_BUFFER_LEN: usize = 512;

/// Length of the longest prologue signature (UTF-16 with BOM).
pub const LONGEST_SIGNATURE_LEN: usize = 14;

/// `<?xml ` in ASCII / UTF-8.
const XML_DECL: &[u8] = &[0x3C, 0x3F, 0x78, 0x6D, 0x6C, 0x20];
const XML_DECL_UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF, 0x3C, 0x3F, 0x78, 0x6D, 0x6C, 0x20];
const XML_DECL_UTF16BE_BOM: &[u8] = &[
    0xFE, 0xFF, 0x00, 0x3C, 0x00, 0x3F, 0x00, 0x78, 0x00, 0x6D, 0x00, 0x6C, 0x00, 0x20,
];
const XML_DECL_UTF16LE_BOM: &[u8] = &[
    0xFF, 0xFE, 0x3C, 0x00, 0x3F, 0x00, 0x78, 0x00, 0x6D, 0x00, 0x6C, 0x00, 0x20, 0x00,
];
const XML_DECL_UTF16BE: &[u8] = &[0x00, 0x3C, 0x00, 0x3F, 0x00, 0x78, 0x00, 0x6D, 0x00, 0x6C, 0x00, 0x20];
const XML_DECL_UTF16LE: &[u8] = &[0x3C, 0x00, 0x3F, 0x00, 0x78, 0x00, 0x6D, 0x00, 0x6C, 0x00, 0x20, 0x00];

/// Prologue signatures in priority order, paired with what a match implies.
const PROLOGUE_FORMS: [(&[u8], TextEncoding, usize); 6] = [
    (XML_DECL, TextEncoding::Utf8, 0),
    (XML_DECL_UTF8_BOM, TextEncoding::Utf8, 3),
    (XML_DECL_UTF16BE_BOM, TextEncoding::Utf16Be, 2),
    (XML_DECL_UTF16LE_BOM, TextEncoding::Utf16Le, 2),
    (XML_DECL_UTF16BE, TextEncoding::Utf16Be, 0),
    (XML_DECL_UTF16LE, TextEncoding::Utf16Le, 0),
];

/// Outcome of a successful prologue sniff.
///
/// `skip_offset` is the number of leading bytes to discard before decoding;
/// it always points just past the byte order mark, if any, and never exceeds
/// the sample it was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrologueDetection {
    pub encoding: TextEncoding,
    pub skip_offset: usize,
}

impl PrologueDetection {
    /// The byte order mark covered by `skip_offset`, if one was present.
    pub fn bom(&self) -> Option<BomKind> {
        match (self.encoding, self.skip_offset) {
            (_, 0) => None,
            (TextEncoding::Utf8, _) => Some(BomKind::Utf8),
            (TextEncoding::Utf16Be, _) => Some(BomKind::Utf16Be),
            (TextEncoding::Utf16Le, _) => Some(BomKind::Utf16Le),
        }
    }
}

/// Sniff an XML prologue from the start of `sample`.
///
/// Returns `None` when the bytes match none of the recognised prologue forms,
/// including when the sample is too short to hold one. A document that starts
/// straight with a root tag (no `<?xml ` declaration) is not recognised here.
///
/// # Examples
///
/// ```rust
/// use xml_sniffer::common::TextEncoding;
/// use xml_sniffer::detection::sniff_prologue;
///
/// let detection = sniff_prologue(b"\xEF\xBB\xBF<?xml version=\"1.0\"?><a/>").unwrap();
/// assert_eq!(detection.encoding, TextEncoding::Utf8);
/// assert_eq!(detection.skip_offset, 3);
///
/// assert!(sniff_prologue(b"<svg></svg>").is_none());
/// ```
pub fn sniff_prologue(sample: &[u8]) -> Option<PrologueDetection> {
    let signatures = PROLOGUE_FORMS.map(|(signature, _, _)| signature);
    let index = signature_matches_any(sample, &signatures)?;
    let (_, encoding, skip_offset) = PROLOGUE_FORMS[index];

    sniff_debug!(encoding = encoding.name(), skip_offset, "xml prologue detected");
    Some(PrologueDetection {
        encoding,
        skip_offset,
    })
}
