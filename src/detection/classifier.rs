//! Streaming root-element classifier.
//!
//! The classifier is fed decoded text chunk by chunk and drives a
//! namespace-aware quick-xml reader only as far as needed to see the first
//! element of the document. That element is mapped to a format through the
//! lookup tables; in full-scan mode the classifier keeps consuming until the
//! root element closes, so that a tag sampled from the middle of non-XML
//! text is not mistaken for a document root.
//!
//! quick-xml pulls events out of a complete buffer, while chunks arrive with
//! arbitrary boundaries. Unconsumed text is therefore kept in a pending
//! buffer: every feed tokenizes the pending text up to the first construct
//! that is cut off by the end of the chunk (an unclosed tag, comment, CDATA
//! section, processing instruction or DOCTYPE) and retains that tail for the
//! next feed. Until the tail's terminator shows up in newly fed text, the
//! tail is not tokenized again, and the body of a held comment, CDATA
//! section or processing instruction is dropped once it grows past a few
//! hundred bytes. Element nesting is tracked here rather than by the reader,
//! since the reader is recreated for every feed.

use memchr::{memchr, memmem};
use quick_xml::errors::SyntaxError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::reader::NsReader;

use super::tables::{lookup_namespace, lookup_root_name};
use super::types::FormatDescriptor;
use crate::common::Error;
use crate::doctype::{ParsedDoctype, parse_doctype};

/// Held text longer than this is compacted when its body can be dropped.
const COMPACT_THRESHOLD: usize = 256;

/// Bytes of a compacted construct kept from its start.
const HELD_HEAD_LEN: usize = 16;

/// How the first element of the document was probed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootResolution {
    /// The root element is bound to this namespace URI.
    ByNamespace(String),
    /// The root element carries no namespace; this is its local name.
    ByLocalName(String),
    /// No root element has been seen (or it could not be resolved).
    Unresolved,
}

/// Lifecycle of a classification attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierState {
    /// No element has been opened yet.
    SeekingFirstTag,
    /// The root element was seen; input is consumed until it closes.
    ScanningForBalance,
    /// Nothing more will be read, with or without a resolved format.
    Terminated,
}

/// Incremental classifier for the root element of an XML document.
///
/// One instance serves one detection attempt and is not reused.
///
/// # Examples
///
/// ```rust
/// use xml_sniffer::detection::RootClassifier;
///
/// let mut classifier = RootClassifier::new(false);
/// classifier.feed("<svg xmlns=\"http://www.w3.org/2000/svg\">");
/// assert!(classifier.is_terminated());
/// assert_eq!(classifier.resolved_format().unwrap().extension(), "svg");
/// ```
#[derive(Debug)]
pub struct RootClassifier {
    full_scan: bool,
    /// Text not yet consumed by the tokenizer.
    pending: String,
    /// Construct cut off at the end of `pending`, if any.
    held: Option<HeldConstruct>,
    /// Qualified names of currently open elements; its length is the depth.
    open_elements: Vec<Vec<u8>>,
    first_tag_seen: bool,
    terminated: bool,
    resolved_format: Option<FormatDescriptor>,
    resolution: RootResolution,
    doctype: Option<ParsedDoctype>,
    failure: Option<Error>,
}

impl Default for RootClassifier {
    fn default() -> Self {
        Self::new(false)
    }
}

impl RootClassifier {
    /// Create a classifier.
    ///
    /// With `full_scan` disabled the attempt terminates as soon as the first
    /// element resolves to a format. With it enabled, the whole root element
    /// is consumed and the result only stands if nesting balances.
    pub fn new(full_scan: bool) -> Self {
        Self {
            full_scan,
            pending: String::new(),
            held: None,
            open_elements: Vec::new(),
            first_tag_seen: false,
            terminated: false,
            resolved_format: None,
            resolution: RootResolution::Unresolved,
            doctype: None,
            failure: None,
        }
    }

    /// Feed the next chunk of decoded text.
    ///
    /// Chunks must arrive in document order. Feeding after termination is a
    /// no-op.
    pub fn feed(&mut self, text: &str) {
        if self.terminated || text.is_empty() {
            return;
        }
        self.pending.push_str(text);

        if let Some(held) = self.held.as_mut() {
            if held.terminator == Terminator::AnyClose && held.scanned < HELD_HEAD_LEN {
                // Cut off too early to tell its kind
                *held = HeldConstruct::new(&self.pending);
            }
            if !held.advance(&self.pending) {
                self.compact_pending();
                return;
            }
            self.held = None;
        }
        self.tokenize(false);
    }

    /// Signal end of input.
    ///
    /// Flushes whatever is still pending; a construct left unclosed or an
    /// element that never closed is fatal at this point.
    pub fn finish(&mut self) {
        self.held = None;
        if !self.terminated {
            self.tokenize(true);
            if !self.terminated && !self.open_elements.is_empty() {
                let depth = self.open_elements.len();
                self.fail(Error::InvalidFormat(format!(
                    "end of input with {depth} unclosed element(s)"
                )));
            }
            self.terminated = true;
        }
        self.pending = String::new();
    }

    /// Whether nesting depth is back to zero.
    ///
    /// Only meaningful after [`finish`](Self::finish) or once the attempt has
    /// terminated.
    #[inline]
    pub fn is_balanced(&self) -> bool {
        self.open_elements.is_empty()
    }

    /// Current nesting depth.
    #[inline]
    pub fn depth(&self) -> usize {
        self.open_elements.len()
    }

    /// Whether the attempt is over.
    #[inline]
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    #[inline]
    pub fn is_full_scan(&self) -> bool {
        self.full_scan
    }

    /// Format resolved from the first element, if any.
    ///
    /// In full-scan mode this may be set before balance has been verified;
    /// use [`result`](Self::result) for the final verdict.
    #[inline]
    pub fn resolved_format(&self) -> Option<FormatDescriptor> {
        self.resolved_format
    }

    /// The verdict of the attempt.
    ///
    /// Identical to [`resolved_format`](Self::resolved_format) without full
    /// scan. In full-scan mode a format is only reported once the attempt has
    /// terminated with balanced nesting.
    pub fn result(&self) -> Option<FormatDescriptor> {
        if self.full_scan && !(self.terminated && self.is_balanced()) {
            return None;
        }
        self.resolved_format
    }

    pub fn state(&self) -> ClassifierState {
        if self.terminated {
            ClassifierState::Terminated
        } else if self.first_tag_seen {
            ClassifierState::ScanningForBalance
        } else {
            ClassifierState::SeekingFirstTag
        }
    }

    /// How the first element was probed.
    #[inline]
    pub fn resolution(&self) -> &RootResolution {
        &self.resolution
    }

    /// DOCTYPE declaration seen before the root element.
    #[inline]
    pub fn doctype(&self) -> Option<&ParsedDoctype> {
        self.doctype.as_ref()
    }

    /// The error that disqualified the input, if any.
    #[inline]
    pub fn failure(&self) -> Option<&Error> {
        self.failure.as_ref()
    }

    fn tokenize(&mut self, at_eof: bool) {
        let mut pending = std::mem::take(&mut self.pending);
        let consumed = self.run_reader(&pending, at_eof);
        if !self.terminated && consumed < pending.len() {
            pending.drain(..consumed);
            let mut held = HeldConstruct::new(&pending);
            // The tokenizer already found it open, only the scan state matters
            held.advance(&pending);
            self.held = Some(held);
            self.pending = pending;
            self.compact_pending();
        }
    }

    /// Replace the body of a long held comment, CDATA section or processing
    /// instruction with a single space, keeping its opening and the bytes
    /// that may begin its terminator.
    fn compact_pending(&mut self) {
        let Some(held) = self.held.as_mut() else {
            return;
        };
        let Terminator::Sequence(terminator) = held.terminator else {
            return;
        };
        if self.pending.len() <= COMPACT_THRESHOLD {
            return;
        }

        let head_end = floor_char_boundary(&self.pending, HELD_HEAD_LEN);
        let tail_start = floor_char_boundary(&self.pending, self.pending.len() - (terminator.len() - 1));

        let mut compacted = String::with_capacity(head_end + 1 + self.pending.len() - tail_start);
        compacted.push_str(&self.pending[..head_end]);
        compacted.push(' ');
        compacted.push_str(&self.pending[tail_start..]);

        sniff_trace!(dropped = self.pending.len() - compacted.len(), "compacted held construct");
        self.pending = compacted;
        held.scanned = self.pending.len();
    }

    /// Tokenize `text`, returning how many bytes were fully consumed.
    fn run_reader(&mut self, text: &str, at_eof: bool) -> usize {
        let mut reader = NsReader::from_str(text);
        let config = reader.config_mut();
        // Nesting spans feeds, so it is checked by `close_element` instead
        config.check_end_names = false;
        config.allow_unmatched_ends = true;
        // Malformed references surface as text or `GeneralRef` events
        config.allow_dangling_amp = true;

        loop {
            let start = reader.buffer_position() as usize;
            let error = match reader.read_resolved_event() {
                Ok((_, Event::Eof)) => return text.len(),
                Ok((resolved, event)) => {
                    self.handle_event(&resolved, event);
                    None
                },
                Err(err) => Some(err),
            };

            if let Some(err) = error {
                match err {
                    quick_xml::Error::Syntax(err) if !at_eof && is_incomplete(&err, text.len() - start) => {
                        sniff_trace!(held_back = text.len() - start, "construct spans chunk boundary");
                        return start;
                    },
                    err => {
                        self.fail(err.into());
                        return text.len();
                    },
                }
            }

            if self.terminated {
                return text.len();
            }
        }
    }

    fn handle_event(&mut self, resolved: &ResolveResult<'_>, event: Event<'_>) {
        match event {
            Event::Start(e) => self.open_element(resolved, &e),
            Event::Empty(e) => {
                self.open_element(resolved, &e);
                if !self.terminated {
                    self.close_element(e.name().as_ref());
                }
            },
            Event::End(e) => self.close_element(e.name().as_ref()),
            Event::Text(e) => {
                if !self.first_tag_seen && !e.iter().all(u8::is_ascii_whitespace) {
                    self.fail(Error::InvalidFormat("non-whitespace before first tag".to_string()));
                }
            },
            Event::GeneralRef(_) => {
                if !self.first_tag_seen {
                    self.fail(Error::InvalidFormat("entity reference before first tag".to_string()));
                }
            },
            Event::DocType(e) => {
                if !self.first_tag_seen && self.doctype.is_none() {
                    let doctype = parse_doctype(&String::from_utf8_lossy(&e));
                    sniff_trace!(root = ?doctype.name, kind = doctype.kind_name(), "doctype");
                    self.doctype = Some(doctype);
                }
            },
            _ => {},
        }
    }

    fn open_element(&mut self, resolved: &ResolveResult<'_>, start: &BytesStart<'_>) {
        self.open_elements.push(start.name().as_ref().to_vec());
        if self.first_tag_seen || self.terminated {
            return;
        }
        self.first_tag_seen = true;

        match resolved {
            ResolveResult::Bound(namespace) => {
                let uri = String::from_utf8_lossy(namespace.as_ref()).into_owned();
                self.resolved_format = lookup_namespace(&uri);
                sniff_debug!(uri = %uri, format = ?self.resolved_format, "root resolved by namespace");
                self.resolution = RootResolution::ByNamespace(uri);
            },
            ResolveResult::Unbound => {
                let local_name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
                self.resolved_format = lookup_root_name(&local_name);
                sniff_debug!(name = %local_name, format = ?self.resolved_format, "root resolved by name");
                self.resolution = RootResolution::ByLocalName(local_name);
            },
            ResolveResult::Unknown(prefix) => {
                self.fail(Error::InvalidFormat(format!(
                    "unbound namespace prefix: {}",
                    String::from_utf8_lossy(prefix)
                )));
                return;
            },
        }

        if self.resolved_format.is_some() && !self.full_scan {
            sniff_trace!("first tag resolved, stopping early");
            self.terminated = true;
        }
    }

    fn close_element(&mut self, name: &[u8]) {
        match self.open_elements.pop() {
            Some(open) if open == name => {},
            Some(open) => {
                self.fail(Error::InvalidFormat(format!(
                    "unexpected close tag </{}>, expected </{}>",
                    String::from_utf8_lossy(name),
                    String::from_utf8_lossy(&open)
                )));
                return;
            },
            None => {
                self.fail(Error::InvalidFormat(format!(
                    "unmatched close tag </{}>",
                    String::from_utf8_lossy(name)
                )));
                return;
            },
        }

        if self.full_scan && self.open_elements.is_empty() {
            self.terminated = true;
        }
    }

    fn fail(&mut self, err: Error) {
        sniff_debug!(error = %err, "xml classification aborted");
        self.resolved_format = None;
        self.terminated = true;
        self.failure = Some(err);
    }
}

/// Whether a syntax error may just be a construct cut off by the chunk end.
fn is_incomplete(err: &SyntaxError, remaining: usize) -> bool {
    match err {
        // `<!` with nothing after it yet
        SyntaxError::InvalidBangMarkup => remaining <= 2,
        _ => true,
    }
}

/// Largest char boundary of `text` not above `index`.
fn floor_char_boundary(text: &str, index: usize) -> usize {
    (0..=index.min(text.len()))
        .rev()
        .find(|&i| text.is_char_boundary(i))
        .unwrap_or(0)
}

/// What has to appear in fed text before a held construct can be complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Terminator {
    /// Fixed closing sequence of a comment, CDATA section or processing
    /// instruction.
    Sequence(&'static [u8]),
    /// `>` closing a DOCTYPE declaration: any `>` until an internal subset
    /// opens, afterwards only one following `]` and optional whitespace.
    Doctype { subset: bool, after_bracket: bool },
    /// Any `>`, for tags and constructs whose kind is not known yet.
    AnyClose,
}

/// Incomplete construct at the end of the pending text.
#[derive(Debug, Clone, Copy)]
struct HeldConstruct {
    terminator: Terminator,
    /// Length of the pending text already searched for the terminator.
    scanned: usize,
}

impl HeldConstruct {
    /// Classify the construct `pending` starts with.
    fn new(pending: &str) -> Self {
        let bytes = pending.as_bytes();
        let (terminator, opener_len) = if bytes.starts_with(b"<!--") {
            (Terminator::Sequence(b"-->"), 4)
        } else if bytes.starts_with(b"<![CDATA[") {
            (Terminator::Sequence(b"]]>"), 9)
        } else if bytes.starts_with(b"<?") {
            (Terminator::Sequence(b"?>"), 2)
        } else if bytes.len() >= 9 && bytes[..9].eq_ignore_ascii_case(b"<!DOCTYPE") {
            (
                Terminator::Doctype {
                    subset: false,
                    after_bracket: false,
                },
                9,
            )
        } else {
            (Terminator::AnyClose, 0)
        };

        Self {
            terminator,
            scanned: opener_len.min(pending.len()),
        }
    }

    /// Scan the text appended since the last call.
    ///
    /// Returns true once the construct may be complete.
    fn advance(&mut self, pending: &str) -> bool {
        let bytes = pending.as_bytes();
        let closed = match self.terminator {
            Terminator::Sequence(sequence) => {
                let from = self.scanned.saturating_sub(sequence.len() - 1);
                memmem::find(&bytes[from..], sequence).is_some()
            },
            Terminator::Doctype {
                ref mut subset,
                ref mut after_bracket,
            } => {
                let mut closed = false;
                for &b in &bytes[self.scanned..] {
                    match b {
                        b'>' if !*subset || *after_bracket => {
                            closed = true;
                            break;
                        },
                        b'[' => *subset = true,
                        b']' => *after_bracket = true,
                        b if b.is_ascii_whitespace() => {},
                        _ => *after_bracket = false,
                    }
                }
                closed
            },
            Terminator::AnyClose => memchr(b'>', &bytes[self.scanned..]).is_some(),
        };
        self.scanned = bytes.len();
        closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::tables::{MUSICXML, RSS, SVG, XHTML};

    fn classify(text: &str, full_scan: bool) -> RootClassifier {
        let mut classifier = RootClassifier::new(full_scan);
        classifier.feed(text);
        classifier.finish();
        classifier
    }

    fn classify_in_chunks(text: &str, chunk_chars: usize, full_scan: bool) -> Option<FormatDescriptor> {
        let mut classifier = RootClassifier::new(full_scan);
        let chars: Vec<char> = text.chars().collect();
        for chunk in chars.chunks(chunk_chars) {
            classifier.feed(&chunk.iter().collect::<String>());
            if classifier.is_terminated() {
                break;
            }
        }
        classifier.finish();
        classifier.result()
    }

    #[test]
    fn test_namespaced_svg() {
        let mut classifier = RootClassifier::new(false);
        classifier.feed("<svg xmlns=\"http://www.w3.org/2000/svg\"><path fill=\"#00CD9F\"/></svg>");
        assert_eq!(classifier.resolved_format(), Some(SVG));
        assert!(classifier.is_terminated());
        assert_eq!(
            classifier.resolution(),
            &RootResolution::ByNamespace("http://www.w3.org/2000/svg".to_string())
        );
    }

    #[test]
    fn test_non_namespaced_svg() {
        let mut classifier = RootClassifier::new(false);
        classifier.feed("<svg width=\"100\" height=\"100\" viewBox=\"0 0 30 30\" version=\"1.1\"></svg>");
        assert_eq!(classifier.resolved_format(), Some(SVG));
        assert_eq!(classifier.resolution(), &RootResolution::ByLocalName("svg".to_string()));
    }

    #[test]
    fn test_mixed_case_svg() {
        let mut classifier = RootClassifier::new(false);
        classifier.feed("<SvG version=\"1.1\"></SvG>");
        assert_eq!(classifier.resolved_format(), Some(SVG));
    }

    #[test]
    fn test_prefixed_root_resolves_by_namespace() {
        let classifier = classify(
            "<h:html xmlns:h=\"http://www.w3.org/1999/xhtml\"><h:body/></h:html>",
            false,
        );
        assert_eq!(classifier.result(), Some(XHTML));
    }

    #[test]
    fn test_unknown_namespace_does_not_fall_back_to_name() {
        let classifier = classify("<svg xmlns=\"urn:example\"></svg>", false);
        assert_eq!(classifier.result(), None);
        assert_eq!(classifier.resolution(), &RootResolution::ByNamespace("urn:example".to_string()));
    }

    #[test]
    fn test_unbound_prefix_is_fatal() {
        let classifier = classify("<a:svg></a:svg>", false);
        assert_eq!(classifier.result(), None);
        assert!(classifier.failure().is_some());
    }

    #[test]
    fn test_text_before_first_tag() {
        for full_scan in [false, true] {
            let classifier = classify("this string contains an svg <svg></svg> in the middle", full_scan);
            assert_eq!(classifier.result(), None);
            assert_eq!(classifier.resolved_format(), None);
            assert!(!classifier.first_tag_seen);
        }
    }

    #[test]
    fn test_mismatched_close_tag_full_scan() {
        let classifier = classify("<svg><div></svg>", true);
        assert_eq!(classifier.result(), None);
        assert!(matches!(classifier.failure(), Some(Error::InvalidFormat(_))));
    }

    #[test]
    fn test_unterminated_full_scan() {
        let mut classifier = RootClassifier::new(true);
        classifier.feed("<svg> hello I am an svg oops maybe not");
        assert_eq!(classifier.resolved_format(), Some(SVG));
        assert_eq!(classifier.result(), None);
        assert_eq!(classifier.state(), ClassifierState::ScanningForBalance);

        classifier.finish();
        assert!(classifier.is_terminated());
        assert!(!classifier.is_balanced());
        assert_eq!(classifier.result(), None);
    }

    #[test]
    fn test_full_scan_balanced() {
        let mut classifier = RootClassifier::new(true);
        classifier.feed("<svg><g><rect/></g></svg>");
        // Terminates as soon as the root closes, before finish()
        assert!(classifier.is_terminated());
        assert!(classifier.is_balanced());
        assert_eq!(classifier.result(), Some(SVG));
    }

    #[test]
    fn test_full_scan_self_closing_root() {
        let classifier = classify("<svg/>", true);
        assert_eq!(classifier.result(), Some(SVG));
    }

    #[test]
    fn test_short_circuit_ignores_later_garbage() {
        let mut classifier = RootClassifier::new(false);
        classifier.feed("<rss version=\"2.0\"><channel></rss>");
        assert_eq!(classifier.result(), Some(RSS));
        classifier.feed("</nonsense>");
        assert_eq!(classifier.result(), Some(RSS));
    }

    #[test]
    fn test_unrecognised_root_keeps_scanning() {
        let mut classifier = RootClassifier::new(false);
        classifier.feed("<catalog><book/>");
        assert!(!classifier.is_terminated());
        assert_eq!(classifier.depth(), 1);
        assert_eq!(classifier.resolution(), &RootResolution::ByLocalName("catalog".to_string()));

        classifier.feed("</catalog>");
        classifier.finish();
        assert!(classifier.is_balanced());
        assert_eq!(classifier.result(), None);
        assert!(classifier.failure().is_none());
    }

    #[test]
    fn test_only_first_tag_is_classified() {
        let classifier = classify("<doc><svg></svg></doc>", false);
        assert_eq!(classifier.result(), None);
    }

    #[test]
    fn test_prologue_comment_and_doctype() {
        let text = "<?xml version=\"1.0\"?>\n<!-- generated -->\n\
                    <!DOCTYPE score-partwise PUBLIC \"-//Recordare//DTD MusicXML 3.1 Partwise//EN\" \
                    \"http://www.musicxml.org/dtds/partwise.dtd\">\n<score-partwise version=\"3.1\"/>";
        let classifier = classify(text, false);
        assert_eq!(classifier.result(), Some(MUSICXML));

        let doctype = classifier.doctype().unwrap();
        assert_eq!(doctype.name.as_deref(), Some("score-partwise"));
        assert_eq!(doctype.public_id(), Some("-//Recordare//DTD MusicXML 3.1 Partwise//EN"));
    }

    #[test]
    fn test_entities_are_tolerated() {
        let classifier = classify("<svg>&nbsp; AT&T &#xZZ; &unknown;</svg>", true);
        assert_eq!(classifier.result(), Some(SVG));
    }

    #[test]
    fn test_unmatched_close_tag() {
        let classifier = classify("</svg>", true);
        assert_eq!(classifier.result(), None);
        assert!(classifier.is_terminated());
    }

    #[test]
    fn test_unclosed_tag_at_end_is_fatal() {
        let classifier = classify("<svg", false);
        assert_eq!(classifier.result(), None);
        assert!(classifier.failure().is_some());
    }

    #[test]
    fn test_feed_after_termination_is_ignored() {
        let mut classifier = RootClassifier::new(false);
        classifier.feed("<rss>");
        assert!(classifier.is_terminated());
        classifier.feed("<<<>>>");
        classifier.finish();
        assert_eq!(classifier.result(), Some(RSS));
        assert!(classifier.failure().is_none());
    }

    #[test]
    fn test_state_transitions() {
        let mut classifier = RootClassifier::new(true);
        assert_eq!(classifier.state(), ClassifierState::SeekingFirstTag);
        classifier.feed("<?xml version=\"1.0\"?>\n");
        assert_eq!(classifier.state(), ClassifierState::SeekingFirstTag);
        classifier.feed("<svg>");
        assert_eq!(classifier.state(), ClassifierState::ScanningForBalance);
        classifier.feed("</svg>");
        assert_eq!(classifier.state(), ClassifierState::Terminated);
    }

    #[test]
    fn test_close_tag_in_later_feed() {
        let mut classifier = RootClassifier::new(true);
        classifier.feed("<svg>");
        classifier.feed("<g>");
        classifier.feed("</g>");
        classifier.feed("</svg>");
        assert!(classifier.is_terminated());
        assert!(classifier.failure().is_none());
        assert_eq!(classifier.result(), Some(SVG));

        let mut classifier = RootClassifier::new(false);
        classifier.feed("<catalog>");
        classifier.feed("</catalog>");
        classifier.finish();
        assert!(classifier.failure().is_none());
        assert!(classifier.is_balanced());
    }

    #[test]
    fn test_close_tag_in_later_feed_still_checked() {
        let mut classifier = RootClassifier::new(true);
        classifier.feed("<svg><div>");
        classifier.feed("</svg>");
        assert!(matches!(classifier.failure(), Some(Error::InvalidFormat(_))));
        assert_eq!(classifier.result(), None);
    }

    #[test]
    fn test_long_held_constructs_stay_bounded() {
        let forms = [
            ("<!--", "x".repeat(512), "-->"),
            ("<!--", "\u{20AC}".repeat(170), "-->"),
            ("<![CDATA[", "x".repeat(512), "]]>"),
            ("<?target ", "x".repeat(512), "?>"),
        ];
        for (open, body, close) in forms {
            let mut classifier = RootClassifier::new(true);
            classifier.feed("<svg>");
            classifier.feed(open);
            for _ in 0..8192 {
                classifier.feed(&body);
                assert!(
                    classifier.pending.len() <= COMPACT_THRESHOLD + body.len(),
                    "{open} held {} bytes",
                    classifier.pending.len()
                );
            }
            classifier.feed(close);
            assert!(classifier.pending.is_empty(), "{open}");

            classifier.feed("</svg>");
            assert_eq!(classifier.result(), Some(SVG), "{open}");
        }
    }

    #[test]
    fn test_bang_cut_before_kind_is_known() {
        let mut classifier = RootClassifier::new(true);
        classifier.feed("<svg><!");
        classifier.feed("--");
        for _ in 0..1024 {
            classifier.feed(&"y".repeat(512));
            assert!(classifier.pending.len() <= COMPACT_THRESHOLD + 512);
        }
        classifier.feed("--></svg>");
        assert_eq!(classifier.result(), Some(SVG));
    }

    #[test]
    fn test_held_construct_terminators() {
        let mut held = HeldConstruct::new("<!--");
        assert!(!held.advance("<!-- a -"));
        assert!(!held.advance("<!-- a --"));
        assert!(held.advance("<!-- a -->"));

        let text = "<!DOCTYPE a [ <!ENTITY e 'x'>";
        let mut held = HeldConstruct::new(text);
        assert!(!held.advance(text));
        assert!(held.advance("<!DOCTYPE a [ <!ENTITY e 'x'> ]\n>"));

        let text = "<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.0 Strict//EN\"";
        let mut held = HeldConstruct::new(text);
        assert!(!held.advance(text));
        assert!(held.advance(&format!("{text}>")));

        let held = HeldConstruct::new("<svg width='");
        assert_eq!(held.terminator, Terminator::AnyClose);
    }

    #[test]
    fn test_doctype_subset_across_feeds() {
        let mut text = String::from("<?xml version=\"1.0\"?>\n<!DOCTYPE svg [\n");
        for i in 0..200 {
            text.push_str(&format!("  <!ENTITY e{i} \"v{i}\">\n"));
        }
        text.push_str("]>\n<svg/>");

        for chunk_chars in [1, 7, 64, 512] {
            let mut classifier = RootClassifier::new(false);
            let chars: Vec<char> = text.chars().collect();
            for chunk in chars.chunks(chunk_chars) {
                classifier.feed(&chunk.iter().collect::<String>());
            }
            classifier.finish();
            assert_eq!(classifier.result(), Some(SVG), "chunk size {chunk_chars}");
            let doctype = classifier.doctype().unwrap();
            assert_eq!(doctype.name.as_deref(), Some("svg"));
            assert!(doctype.internal_subset.as_deref().unwrap().ends_with("<!ENTITY e199 \"v199\">"));
        }
    }

    #[test]
    fn test_every_chunk_split() {
        let text = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!-- a > b -->\n\
                    <!DOCTYPE svg [ <!ENTITY e \"x\"> ]>\n\
                    <svg xmlns=\"http://www.w3.org/2000/svg\" title=\"a &gt; b\">\
                    <![CDATA[ </svg> ]]><g/></svg>";
        for chunk_chars in 1..=text.len() {
            for full_scan in [false, true] {
                assert_eq!(
                    classify_in_chunks(text, chunk_chars, full_scan),
                    Some(SVG),
                    "chunk size {chunk_chars}, full scan {full_scan}"
                );
            }
        }
    }

    #[test]
    fn test_every_chunk_split_rejects_leading_text() {
        let text = "this string contains an svg <svg></svg> in the middle";
        for chunk_chars in 1..=text.len() {
            assert_eq!(classify_in_chunks(text, chunk_chars, true), None);
        }
    }

    #[test]
    fn test_every_chunk_split_mismatch() {
        let text = "<svg><div></svg>";
        for chunk_chars in 1..=text.len() {
            assert_eq!(classify_in_chunks(text, chunk_chars, true), None);
        }
    }
}
