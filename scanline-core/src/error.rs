//! Domain-specific error types for the scanline assembler.
//!
//! All fallible operations return `Result<T, ScanlineError>`.
//! Malformed *datagrams* are never errors — lossy transport makes them
//! an expected condition, absorbed silently by the drain loop.

use thiserror::Error;

/// The canonical error type for the scanline assembler.
#[derive(Debug, Error)]
pub enum ScanlineError {
    // ── Geometry Errors ──────────────────────────────────────────
    /// Image width must be a positive multiple of 8 so rows pack
    /// exactly into whole bytes on the wire.
    #[error("invalid image width: {0} (must be a positive multiple of 8)")]
    InvalidWidth(usize),

    /// Image height must fit the 2-byte line header, including the
    /// one-based numbering convention.
    #[error("invalid image height: {0} (must be in 1..=65535)")]
    InvalidHeight(usize),

    // ── Frame Buffer Errors ──────────────────────────────────────
    /// A row index escaped the resolver's range guarantee.
    #[error("row index {index} out of range (image height {height})")]
    RowOutOfRange { index: usize, height: usize },

    /// A row write carried the wrong number of pixels.
    #[error("row length mismatch: expected {expected} pixels, got {actual}")]
    RowLengthMismatch { expected: usize, actual: usize },

    // ── Transport Errors ─────────────────────────────────────────
    /// The socket layer reported an error other than "would block".
    #[error("socket error: {0}")]
    Socket(#[from] std::io::Error),
}
