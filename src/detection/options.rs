/// Configuration for an XML detection attempt.
///
/// This struct controls the classifier policy and the number of bytes
/// sampled and streamed from the byte source.
///
/// # Examples
///
/// ```rust
/// use xml_sniffer::detection::DetectorOptions;
///
/// // Create with defaults
/// let options = DetectorOptions::default();
/// assert!(!options.full_scan);
///
/// // Or customize
/// let options = DetectorOptions::new()
///     .with_full_scan(true)
///     .with_chunk_len(4096);
/// assert_eq!(options.chunk_len, 4096);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectorOptions {
    /// Verify that the root element balances instead of stopping at the
    /// first recognised tag
    pub full_scan: bool,
    /// Minimum number of bytes requested when peeking the prologue
    pub sample_len: usize,
    /// Number of bytes read and decoded per classifier feed
    pub chunk_len: usize,
}

/// Smallest sample able to hold every prologue form.
pub(crate) const MIN_SAMPLE_LEN: usize = super::prologue::LONGEST_SIGNATURE_LEN;

/// Smallest chunk able to hold a UTF-16 code unit.
pub(crate) const MIN_CHUNK_LEN: usize = 2;

impl Default for DetectorOptions {
    fn default() -> Self {
        Self {
            full_scan: false,
            sample_len: super::prologue::MIN_SAMPLE_LEN,
            chunk_len: super::prologue::SAMPLE_BUFFER_LEN,
        }
    }
}

impl DetectorOptions {
    /// Copy of these options with lengths raised to their minimums, for
    /// values assigned directly to the public fields.
    pub(crate) fn clamped(&self) -> Self {
        self.clone()
            .with_sample_len(self.sample_len)
            .with_chunk_len(self.chunk_len)
    }

    /// Create a new `DetectorOptions` with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether the classifier runs in full-scan mode.
    ///
    /// Full scan costs reading the whole root element but rejects inputs
    /// whose first tag never balances.
    #[inline]
    pub fn with_full_scan(mut self, full_scan: bool) -> Self {
        self.full_scan = full_scan;
        self
    }

    /// Set the minimum prologue sample length.
    ///
    /// Clamped to at least the longest prologue signature.
    #[inline]
    pub fn with_sample_len(mut self, sample_len: usize) -> Self {
        self.sample_len = sample_len.max(MIN_SAMPLE_LEN);
        self
    }

    /// Set the read chunk size.
    #[inline]
    pub fn with_chunk_len(mut self, chunk_len: usize) -> Self {
        self.chunk_len = chunk_len.max(MIN_CHUNK_LEN);
        self
    }
}
