//! Byte Order Mark (BOM) constants and helpers.
//!
//! Only the Unicode forms an XML prologue may legitimately start with are
//! covered: UTF-8 and both byte orders of UTF-16.

/// Supported BOM encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BomKind {
    Utf8,
    Utf16Le,
    Utf16Be,
}

impl BomKind {
    /// Returns the byte representation of the BOM.
    #[inline]
    pub const fn as_bytes(&self) -> &'static [u8] {
        match self {
            BomKind::Utf8 => &UTF8_BOM,
            BomKind::Utf16Le => &UTF16_LE_BOM,
            BomKind::Utf16Be => &UTF16_BE_BOM,
        }
    }

    /// Returns the length in bytes of the BOM.
    #[inline]
    #[allow(clippy::len_without_is_empty)] // No need to check for empty BOMs
    pub const fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Identifies the BOM of a given length that prefixes `data`, if any.
    ///
    /// The length disambiguates the UTF-16 forms from a UTF-8 mark, since the
    /// prologue sniffer already knows how many bytes it intends to skip.
    pub fn from_prefix(data: &[u8], len: usize) -> Option<Self> {
        [BomKind::Utf8, BomKind::Utf16Be, BomKind::Utf16Le]
            .into_iter()
            .find(|kind| kind.len() == len && data.starts_with(kind.as_bytes()))
    }
}

/// UTF-8 BOM bytes.
pub const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
/// UTF-16 little-endian BOM bytes.
pub const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];
/// UTF-16 big-endian BOM bytes.
pub const UTF16_BE_BOM: [u8; 2] = [0xFE, 0xFF];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bom_lengths() {
        assert_eq!(BomKind::Utf8.len(), 3);
        assert_eq!(BomKind::Utf16Le.len(), 2);
        assert_eq!(BomKind::Utf16Be.len(), 2);
    }

    #[test]
    fn test_from_prefix() {
        assert_eq!(BomKind::from_prefix(&[0xEF, 0xBB, 0xBF, b'<'], 3), Some(BomKind::Utf8));
        assert_eq!(BomKind::from_prefix(&[0xFE, 0xFF, 0x00, b'<'], 2), Some(BomKind::Utf16Be));
        assert_eq!(BomKind::from_prefix(&[0xFF, 0xFE, b'<', 0x00], 2), Some(BomKind::Utf16Le));
        assert_eq!(BomKind::from_prefix(b"<?xml ", 0), None);
        // Length must agree with the mark actually present
        assert_eq!(BomKind::from_prefix(&[0xEF, 0xBB, 0xBF], 2), None);
    }
}
