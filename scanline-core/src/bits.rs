//! Packed-bit row expansion.
//!
//! The wire carries one bit per pixel, eight pixels per byte. Which end
//! of the byte maps to the leftmost pixel is a property of the sender's
//! shift-register wiring and is therefore configurable at runtime.

/// Intensity written for a set bit (two-level image: 0 or max).
pub const MAX_INTENSITY: u8 = 255;

/// Bit-to-pixel mapping within each wire byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BitOrder {
    /// The most-significant bit is the leftmost pixel of the byte's span.
    #[default]
    MsbFirst,
    /// The least-significant bit is the leftmost pixel.
    LsbFirst,
}

impl BitOrder {
    /// The opposite mapping (runtime toggle).
    pub fn toggled(self) -> Self {
        match self {
            BitOrder::MsbFirst => BitOrder::LsbFirst,
            BitOrder::LsbFirst => BitOrder::MsbFirst,
        }
    }
}

impl std::fmt::Display for BitOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BitOrder::MsbFirst => write!(f, "msb-first"),
            BitOrder::LsbFirst => write!(f, "lsb-first"),
        }
    }
}

/// Expand packed scanline bits into two-level intensity samples.
///
/// Writes `packed.len() * 8` samples into `dest`, each either `0` or
/// [`MAX_INTENSITY`]. Callers guarantee `dest.len() == packed.len() * 8`
/// and that `packed` is exactly one row — this is a precondition, not a
/// recoverable condition.
pub fn unpack_row(packed: &[u8], order: BitOrder, dest: &mut [u8]) {
    debug_assert_eq!(dest.len(), packed.len() * 8);

    for (i, &byte) in packed.iter().enumerate() {
        let span = &mut dest[i * 8..i * 8 + 8];
        for (bit, px) in span.iter_mut().enumerate() {
            let shift = match order {
                BitOrder::MsbFirst => 7 - bit,
                BitOrder::LsbFirst => bit,
            };
            *px = if (byte >> shift) & 1 == 1 {
                MAX_INTENSITY
            } else {
                0
            };
        }
    }
}

/// Pack intensity samples back into wire bytes (inverse of
/// [`unpack_row`]; any non-zero sample counts as a set bit).
///
/// Used by tests and sender simulators; `pixels.len()` must be a
/// multiple of 8.
pub fn pack_row(pixels: &[u8], order: BitOrder) -> Vec<u8> {
    debug_assert_eq!(pixels.len() % 8, 0);

    pixels
        .chunks_exact(8)
        .map(|span| {
            let mut byte = 0u8;
            for (bit, &px) in span.iter().enumerate() {
                if px != 0 {
                    let shift = match order {
                        BitOrder::MsbFirst => 7 - bit,
                        BitOrder::LsbFirst => bit,
                    };
                    byte |= 1 << shift;
                }
            }
            byte
        })
        .collect()
}
