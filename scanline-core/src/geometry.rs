//! Image geometry and wire-format sizing.
//!
//! ## Wire format
//!
//! Each datagram carries exactly one scanline, fixed total length
//! `2 + width / 8` bytes:
//!
//! ```text
//! offset 0, len 2:          row index  (u16, byte order ambiguous)
//! offset 2, len width / 8:  packed row bits (1 bit per pixel)
//! ```
//!
//! Datagrams shorter than that total are dropped without touching any
//! assembler state.

use crate::error::ScanlineError;

/// Length of the per-datagram line header: one ambiguous `u16` row index.
pub const HEADER_LEN: usize = 2;

/// Pixel dimensions of the transmitted raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageGeometry {
    /// Width in pixels. Always a multiple of 8.
    pub width: usize,
    /// Height in pixels (number of scanlines).
    pub height: usize,
}

impl ImageGeometry {
    /// Validate and construct a geometry.
    ///
    /// The width must be a positive multiple of 8 (rows pack into whole
    /// bytes); the height must fit the 2-byte header under both the
    /// zero-based and one-based numbering conventions.
    pub fn new(width: usize, height: usize) -> Result<Self, ScanlineError> {
        if width == 0 || width % 8 != 0 {
            return Err(ScanlineError::InvalidWidth(width));
        }
        if height == 0 || height > u16::MAX as usize {
            return Err(ScanlineError::InvalidHeight(height));
        }
        Ok(Self { width, height })
    }

    /// Bytes of packed pixel data per scanline.
    pub const fn row_bytes(&self) -> usize {
        self.width / 8
    }

    /// Minimum valid datagram length: header plus one packed row.
    pub const fn datagram_len(&self) -> usize {
        HEADER_LEN + self.row_bytes()
    }

    /// Total pixels in a full frame.
    pub const fn pixel_count(&self) -> usize {
        self.width * self.height
    }
}

impl Default for ImageGeometry {
    /// The sender hardware's native 1280×720 raster.
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}
