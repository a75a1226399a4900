//! DOCTYPE declaration parsing.
//!
//! Parses the body of a `<!DOCTYPE ...>` declaration, as handed over by the
//! tokenizer, into its root name, external identifiers and internal subset.
//!
//! Examples of input:
//!  - `article PUBLIC '-//OASIS//DTD DocBook XML V4.5//EN' 'http://.../docbookx.dtd'`
//!  - `svg SYSTEM 'http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd'`
//!  - `plist SYSTEM "http://www.apple.com/DTDs/PropertyList-1.0.dtd"`
//!  - `root [ <!ENTITY ...> ]`

use memchr::memmem;

/// External identifier form of a DOCTYPE declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DoctypeKind {
    /// `PUBLIC "pubid" "sysid"`
    Public { public_id: String, system_id: String },
    /// `SYSTEM "sysid"`
    System { system_id: String },
    /// Neither form could be matched.
    Unknown,
}

/// A parsed DOCTYPE declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDoctype {
    /// The declaration body exactly as supplied.
    pub raw: String,
    /// Root element name, e.g. `article`.
    pub name: Option<String>,
    pub kind: DoctypeKind,
    /// Everything between `[` and the closing `]`, if present.
    pub internal_subset: Option<String>,
}

impl ParsedDoctype {
    /// Public identifier, only for `PUBLIC` declarations.
    pub fn public_id(&self) -> Option<&str> {
        match &self.kind {
            DoctypeKind::Public { public_id, .. } => Some(public_id),
            _ => None,
        }
    }

    /// System identifier of `PUBLIC` and `SYSTEM` declarations.
    pub fn system_id(&self) -> Option<&str> {
        match &self.kind {
            DoctypeKind::Public { system_id, .. } | DoctypeKind::System { system_id } => Some(system_id),
            DoctypeKind::Unknown => None,
        }
    }

    /// `PUBLIC`, `SYSTEM` or `UNKNOWN`.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            DoctypeKind::Public { .. } => "PUBLIC",
            DoctypeKind::System { .. } => "SYSTEM",
            DoctypeKind::Unknown => "UNKNOWN",
        }
    }
}

/// Parse a DOCTYPE declaration body.
///
/// Whitespace runs are collapsed first. A trailing `[...]` is split off as the
/// internal subset, the first token is taken as the root name, and then a
/// `PUBLIC` identifier pair is tried before a lone `SYSTEM` identifier. The
/// keywords are matched case-insensitively and literals may use either quote.
///
/// # Examples
///
/// ```rust
/// use xml_sniffer::doctype::{DoctypeKind, parse_doctype};
///
/// let doctype = parse_doctype("svg SYSTEM 'http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd'");
/// assert_eq!(doctype.name.as_deref(), Some("svg"));
/// assert_eq!(
///     doctype.kind,
///     DoctypeKind::System { system_id: "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd".into() }
/// );
/// ```
pub fn parse_doctype(raw: &str) -> ParsedDoctype {
    let normalized = raw.split_whitespace().collect::<Vec<_>>().join(" ");

    let mut head = normalized.as_str();
    let mut internal_subset = None;
    if let Some(start) = normalized.find('[')
        && normalized.ends_with(']')
    {
        head = normalized[..start].trim();
        internal_subset = Some(normalized[start + 1..normalized.len() - 1].trim().to_string());
    }

    let name = leading_name(head).map(str::to_string);
    let kind = match_public(head)
        .or_else(|| match_system(head))
        .unwrap_or(DoctypeKind::Unknown);

    ParsedDoctype {
        raw: raw.to_string(),
        name,
        kind,
        internal_subset,
    }
}

#[inline]
fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// First token of `head`, cut back to its last word boundary.
fn leading_name(head: &str) -> Option<&str> {
    let token = head.split(char::is_whitespace).next().filter(|t| !t.is_empty())?;
    let bytes = token.as_bytes();

    // The token is followed by whitespace or the end, both non-word
    (1..=bytes.len())
        .rev()
        .filter(|&end| token.is_char_boundary(end))
        .find(|&end| {
            let before = is_word_byte(bytes[end - 1]);
            let after = bytes.get(end).is_some_and(|&b| is_word_byte(b));
            before != after
        })
        .map(|end| &token[..end])
}

/// Positions where `keyword` starts at a word boundary, ignoring ASCII case.
fn keyword_positions<'a>(head: &'a str, keyword: &'a [u8]) -> impl Iterator<Item = usize> + 'a {
    let lowered = head.to_ascii_lowercase();
    let bytes = head.as_bytes();
    memmem::find_iter(lowered.as_bytes(), keyword)
        .filter(move |&pos| pos == 0 || !is_word_byte(bytes[pos - 1]))
        .collect::<Vec<_>>()
        .into_iter()
}

/// Skip at least one whitespace character.
fn skip_required_space(input: &str) -> Option<&str> {
    let rest = input.trim_start();
    (rest.len() < input.len()).then_some(rest)
}

/// Read a `'...'` or `"..."` literal, returning its content and the rest.
fn quoted_literal(input: &str) -> Option<(&str, &str)> {
    let quote = input.chars().next().filter(|c| *c == '\'' || *c == '"')?;
    let body = &input[1..];
    let end = body.find(quote)?;
    Some((&body[..end], &body[end + 1..]))
}

fn match_public(head: &str) -> Option<DoctypeKind> {
    keyword_positions(head, b"public").find_map(|pos| {
        let rest = skip_required_space(&head[pos + 6..])?;
        let (public_id, rest) = quoted_literal(rest)?;
        let rest = skip_required_space(rest)?;
        let (system_id, _) = quoted_literal(rest)?;
        Some(DoctypeKind::Public {
            public_id: public_id.to_string(),
            system_id: system_id.to_string(),
        })
    })
}

fn match_system(head: &str) -> Option<DoctypeKind> {
    keyword_positions(head, b"system").find_map(|pos| {
        let rest = skip_required_space(&head[pos + 6..])?;
        let (system_id, _) = quoted_literal(rest)?;
        Some(DoctypeKind::System {
            system_id: system_id.to_string(),
        })
    })
}
