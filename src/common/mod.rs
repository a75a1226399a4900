//! Common types and utilities shared across the sniffer.
//!
//! This module provides the unified error type together with the byte-order
//! mark and text encoding primitives used by both the prologue sniffer and
//! the streaming classifier.

// Submodule declarations
pub mod bom;
pub mod encoding;
pub mod error;

// Re-exports for convenience
pub use bom::BomKind;
pub use encoding::{ChunkDecoder, TextEncoding};
pub use error::{Error, Result};
