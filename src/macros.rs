// ---------------------------------------------------------------------------
// Conditional tracing support
// ---------------------------------------------------------------------------

/// Emit a `debug` event when the `tracing` feature is enabled. When disabled,
/// this is a no-op and the compiler eliminates it.
macro_rules! sniff_debug {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::debug!($($arg)*);
    };
}

/// Emit a `trace` event when the `tracing` feature is enabled.
macro_rules! sniff_trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::trace!($($arg)*);
    };
}
