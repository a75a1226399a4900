//! Byte signature matching helpers.

/// Check if a byte slice starts with a given signature.
///
/// A slice shorter than the signature never matches.
///
/// # Examples
///
/// ```rust
/// use xml_sniffer::detection::signature::signature_matches;
///
/// assert!(signature_matches(b"<?xml version=\"1.0\"?>", b"<?xml "));
/// assert!(!signature_matches(b"<?x", b"<?xml "));
/// ```
#[inline]
pub fn signature_matches(data: &[u8], signature: &[u8]) -> bool {
    data.len() >= signature.len() && &data[..signature.len()] == signature
}

/// Check if data matches any of multiple signatures.
///
/// Signatures are tried in order; the index of the first match is returned,
/// so callers encode priority through the ordering of `signatures`.
///
/// # Examples
///
/// ```rust
/// use xml_sniffer::detection::signature::signature_matches_any;
///
/// let data = &[0xEF, 0xBB, 0xBF, b'<'];
/// let signatures = [&b"<"[..], &[0xEF, 0xBB, 0xBF][..]];
///
/// assert_eq!(signature_matches_any(data, &signatures), Some(1));
/// ```
pub fn signature_matches_any(data: &[u8], signatures: &[&[u8]]) -> Option<usize> {
    signatures
        .iter()
        .position(|signature| signature_matches(data, signature))
}
