//! # scanline-core
//!
//! Real-time UDP scanline frame assembler: reconstructs 1-bit-per-pixel
//! raster frames from a stream of fixed-size datagrams, one scanline
//! per datagram, tolerating unordered arrival, packet loss, and a line
//! header whose byte order and numbering convention are not reliably
//! known up front.
//!
//! This crate contains:
//! - **Geometry**: `ImageGeometry` — raster dimensions and wire sizing
//! - **Bit unpacker**: `BitOrder`, `unpack_row` / `pack_row`
//! - **Line-index resolver**: `resolve` — per-packet defensive decoding
//! - **Frame buffer**: `FrameImage` — pixel grid, received mask, fps
//! - **Drain loop**: `FrameAssembler` over a `DatagramSource`
//! - **Diagnostics**: `DecodeStats` — resolution-outcome counters
//! - **Error**: `ScanlineError` — typed, `thiserror`-based hierarchy

pub mod assembler;
pub mod bits;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod line_index;
pub mod stats;

// ── Re-exports for ergonomic usage ───────────────────────────────

pub use assembler::{DatagramSource, DrainOutcome, FrameAssembler};
pub use bits::{BitOrder, MAX_INTENSITY, pack_row, unpack_row};
pub use error::ScanlineError;
pub use frame::FrameImage;
pub use geometry::{HEADER_LEN, ImageGeometry};
pub use line_index::{ByteOrderTag, resolve};
pub use stats::DecodeStats;
