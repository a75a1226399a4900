//! Text encodings recognised in an XML prologue and their streaming decoder.
//!
//! The decoder is fed raw byte chunks exactly as they come off the byte
//! source. Chunk boundaries are arbitrary, so a multi-byte UTF-8 sequence, a
//! UTF-16 code unit or a surrogate pair may be split across two reads;
//! `encoding_rs` keeps the partial sequence internally until the next chunk
//! completes it.

use encoding_rs::{CoderResult, Decoder, Encoding};

/// Encoding detected from the prologue bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextEncoding {
    /// UTF-8 (also covers plain ASCII prologues)
    Utf8,
    /// UTF-16, big-endian
    Utf16Be,
    /// UTF-16, little-endian
    Utf16Le,
}

impl TextEncoding {
    /// WHATWG label of the encoding.
    pub const fn name(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Utf16Be => "utf-16be",
            TextEncoding::Utf16Le => "utf-16le",
        }
    }

    /// Map to the corresponding `encoding_rs` encoding.
    #[inline]
    pub fn to_encoding_rs(&self) -> &'static Encoding {
        match self {
            TextEncoding::Utf8 => encoding_rs::UTF_8,
            TextEncoding::Utf16Be => encoding_rs::UTF_16BE,
            TextEncoding::Utf16Le => encoding_rs::UTF_16LE,
        }
    }
}

impl std::fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Incremental decoder turning byte chunks into text chunks.
///
/// Malformed sequences are replaced with U+FFFD rather than rejected, which
/// keeps the sniffer robust against arbitrary input.
pub struct ChunkDecoder {
    encoding: TextEncoding,
    decoder: Decoder,
    finished: bool,
}

impl ChunkDecoder {
    /// Create a decoder for `encoding`.
    ///
    /// BOM sniffing is disabled: the caller has already skipped any byte
    /// order mark, and a second one in the stream is content.
    pub fn new(encoding: TextEncoding) -> Self {
        Self {
            encoding,
            decoder: encoding.to_encoding_rs().new_decoder_without_bom_handling(),
            finished: false,
        }
    }

    /// The encoding this decoder was created for.
    #[inline]
    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// Decode the next chunk.
    ///
    /// Pass `last = true` for the final chunk so that a dangling partial
    /// sequence is flushed as U+FFFD. Once the last chunk has been decoded
    /// every further call returns an empty string.
    pub fn decode(&mut self, bytes: &[u8], last: bool) -> String {
        if self.finished {
            return String::new();
        }

        let mut text = String::new();
        let mut input = bytes;
        loop {
            let needed = self
                .decoder
                .max_utf8_buffer_length(input.len())
                .unwrap_or_else(|| input.len().saturating_mul(3).saturating_add(4));
            text.reserve(needed);

            let (result, read, _had_errors) = self.decoder.decode_to_string(input, &mut text, last);
            input = &input[read..];
            match result {
                CoderResult::InputEmpty => break,
                CoderResult::OutputFull => continue,
            }
        }

        self.finished = last;
        text
    }
}

impl std::fmt::Debug for ChunkDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkDecoder")
            .field("encoding", &self.encoding)
            .field("finished", &self.finished)
            .finish()
    }
}
