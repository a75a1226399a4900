//! Static lookup tables mapping root elements to formats.
//!
//! Two compile-time maps are consulted for the first element of a document:
//! one keyed by namespace URI and a fallback keyed by the element's local
//! name for documents that declare no namespace. Keys are stored lower-case
//! and probes are ASCII-lowercased, so both lookups are case-insensitive.
//! Supporting a new format means adding an entry here.

use phf::phf_map;

use super::types::FormatDescriptor;

pub const SVG: FormatDescriptor = FormatDescriptor::new("svg", "image/svg+xml");
pub const XHTML: FormatDescriptor = FormatDescriptor::new("xhtml", "application/xhtml+xml");
pub const KML: FormatDescriptor = FormatDescriptor::new("kml", "application/vnd.google-earth.kml+xml");
pub const GML: FormatDescriptor = FormatDescriptor::new("gml", "application/gml+xml");
pub const RSS: FormatDescriptor = FormatDescriptor::new("rss", "application/rss+xml");
pub const MUSICXML: FormatDescriptor =
    FormatDescriptor::new("musicxml", "application/vnd.recordare.musicxml+xml");
pub const ATOM: FormatDescriptor = FormatDescriptor::new("atom", "application/atom+xml");
pub const MATHML: FormatDescriptor = FormatDescriptor::new("mml", "application/mathml+xml");
pub const XSLT: FormatDescriptor = FormatDescriptor::new("xsl", "application/xslt+xml");
pub const GPX: FormatDescriptor = FormatDescriptor::new("gpx", "application/gpx+xml");

/// Root element namespace URI to format.
static NAMESPACE_MAP: phf::Map<&'static str, FormatDescriptor> = phf_map! {
    "http://www.w3.org/2000/svg" => SVG,
    "http://www.w3.org/1999/xhtml" => XHTML,
    "http://www.opengis.net/kml/2.2" => KML,
    "http://earth.google.com/kml/2.2" => KML,
    "http://www.opengis.net/gml" => GML,
    "http://www.opengis.net/gml/3.2" => GML,
    "http://www.w3.org/2005/atom" => ATOM,
    "http://www.w3.org/1998/math/mathml" => MATHML,
    "http://www.w3.org/1999/xsl/transform" => XSLT,
    "http://www.topografix.com/gpx/1/1" => GPX,
};

/// Root element local name to format, for non-namespaced documents.
static ROOT_NAME_MAP: phf::Map<&'static str, FormatDescriptor> = phf_map! {
    "rss" => RSS,
    "score-partwise" => MUSICXML,
    "score-timewise" => MUSICXML,
    "svg" => SVG,
    "kml" => KML,
    "gpx" => GPX,
};

/// Look up the format identified by a root element namespace URI.
///
/// # Examples
///
/// ```rust
/// use xml_sniffer::detection::tables::lookup_namespace;
///
/// let svg = lookup_namespace("http://www.w3.org/2000/svg").unwrap();
/// assert_eq!(svg.extension(), "svg");
/// assert!(lookup_namespace("urn:example:unknown").is_none());
/// ```
pub fn lookup_namespace(uri: &str) -> Option<FormatDescriptor> {
    lookup(&NAMESPACE_MAP, uri)
}

/// Look up the format identified by a root element local name.
///
/// # Examples
///
/// ```rust
/// use xml_sniffer::detection::tables::lookup_root_name;
///
/// assert_eq!(lookup_root_name("RSS").unwrap().mime_type(), "application/rss+xml");
/// ```
pub fn lookup_root_name(local_name: &str) -> Option<FormatDescriptor> {
    lookup(&ROOT_NAME_MAP, local_name)
}

#[inline]
fn lookup(map: &phf::Map<&'static str, FormatDescriptor>, key: &str) -> Option<FormatDescriptor> {
    if key.bytes().any(|b| b.is_ascii_uppercase()) {
        map.get(key.to_ascii_lowercase().as_str()).copied()
    } else {
        map.get(key).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_namespaces() {
        assert_eq!(lookup_namespace("http://www.w3.org/2000/svg"), Some(SVG));
        assert_eq!(lookup_namespace("http://www.w3.org/1999/xhtml"), Some(XHTML));
        assert_eq!(lookup_namespace("http://www.opengis.net/kml/2.2"), Some(KML));
        assert_eq!(lookup_namespace("http://www.opengis.net/gml"), Some(GML));
    }

    #[test]
    fn test_required_root_names() {
        assert_eq!(lookup_root_name("rss"), Some(RSS));
        assert_eq!(lookup_root_name("score-partwise"), Some(MUSICXML));
        assert_eq!(lookup_root_name("svg"), Some(SVG));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(lookup_root_name("SvG"), Some(SVG));
        assert_eq!(lookup_root_name("Score-Partwise"), Some(MUSICXML));
        assert_eq!(lookup_namespace("HTTP://WWW.W3.ORG/2000/SVG"), Some(SVG));
        assert_eq!(lookup_namespace("http://www.w3.org/2005/Atom"), Some(ATOM));
        assert_eq!(lookup_namespace("http://www.w3.org/1999/XSL/Transform"), Some(XSLT));
    }

    #[test]
    fn test_descriptor_values() {
        assert_eq!(KML.mime_type(), "application/vnd.google-earth.kml+xml");
        assert_eq!(MUSICXML.extension(), "musicxml");
        assert_eq!(SVG.to_string(), "svg (image/svg+xml)");
        assert!(!SVG.is_generic());
        assert!(FormatDescriptor::GENERIC_XML.is_generic());
    }

    #[test]
    fn test_unknown_keys() {
        assert!(lookup_root_name("html").is_none());
        assert!(lookup_root_name("").is_none());
        assert!(lookup_namespace("").is_none());
        assert!(lookup_namespace("http://www.w3.org/2000/svg/").is_none());
    }

    #[test]
    fn test_keys_are_lowercase() {
        for key in NAMESPACE_MAP.keys().chain(ROOT_NAME_MAP.keys()) {
            assert_eq!(*key, key.to_ascii_lowercase());
        }
    }
}
