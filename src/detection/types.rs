//! Format descriptor returned by the detector.

/// File extension and MIME type of a detected XML-based format.
///
/// Descriptors only come from the static lookup tables; they are never built
/// from input data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FormatDescriptor {
    extension: &'static str,
    mime_type: &'static str,
}

impl FormatDescriptor {
    /// Plain XML, reported when a prologue was found but neither the root
    /// namespace nor the root name identifies a more specific format.
    pub const GENERIC_XML: FormatDescriptor = FormatDescriptor::new("xml", "application/xml");

    pub(crate) const fn new(extension: &'static str, mime_type: &'static str) -> Self {
        Self {
            extension,
            mime_type,
        }
    }

    /// File extension without the leading dot, e.g. `svg`.
    #[inline]
    pub const fn extension(&self) -> &'static str {
        self.extension
    }

    /// MIME type, e.g. `image/svg+xml`.
    #[inline]
    pub const fn mime_type(&self) -> &'static str {
        self.mime_type
    }

    /// Whether this is the generic XML fallback.
    #[inline]
    pub fn is_generic(&self) -> bool {
        *self == Self::GENERIC_XML
    }
}

impl std::fmt::Display for FormatDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.extension, self.mime_type)
    }
}
