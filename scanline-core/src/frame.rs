//! Frame buffer, received mask, and completion / rate estimation.
//!
//! The buffer is the only mutable image state in the assembler. Rows
//! are replaced atomically as a whole; there are no partial-row writes.
//! There is deliberately no frame isolation: during assembly the buffer
//! mixes rows from different source frames, and the display sink may
//! observe it mid-assembly. The tradeoff is always-showing-latest-data
//! over strict frame boundaries.

use std::time::Instant;

use crate::error::ScanlineError;
use crate::geometry::ImageGeometry;

/// Interval floor used when a frame completes almost instantly after
/// the previous one, keeping the rate estimate finite.
const MIN_COMPLETE_INTERVAL_SECS: f64 = 1e-6;

/// A `height × width` grid of 8-bit intensities plus per-row bookkeeping.
pub struct FrameImage {
    geometry: ImageGeometry,
    /// Row-major pixel data, `height * width` bytes.
    pixels: Vec<u8>,
    /// One entry per row: received in the current assembly cycle?
    received: Vec<bool>,
    /// Count of `true` entries in `received`.
    rows_received: usize,
    /// When the previous frame completed.
    last_complete: Instant,
    /// Smoothed frames-per-second estimate.
    fps: f64,
    /// EWMA weight for partial-update cycles.
    smoothing: f64,
}

impl FrameImage {
    /// Create an all-black frame with an empty received mask.
    ///
    /// `smoothing` is the EWMA weight α applied to the rate estimate on
    /// cycles that update rows without completing a frame.
    pub fn new(geometry: ImageGeometry, smoothing: f64) -> Self {
        Self {
            geometry,
            pixels: vec![0u8; geometry.pixel_count()],
            received: vec![false; geometry.height],
            rows_received: 0,
            last_complete: Instant::now(),
            fps: 0.0,
            smoothing,
        }
    }

    /// Overwrite row `index` in full and mark it received.
    ///
    /// `pixels` must be exactly one row (`width` samples). The row is
    /// replaced atomically; a failed write leaves the buffer untouched.
    pub fn write_row(&mut self, index: usize, pixels: &[u8]) -> Result<(), ScanlineError> {
        if index >= self.geometry.height {
            return Err(ScanlineError::RowOutOfRange {
                index,
                height: self.geometry.height,
            });
        }
        if pixels.len() != self.geometry.width {
            return Err(ScanlineError::RowLengthMismatch {
                expected: self.geometry.width,
                actual: pixels.len(),
            });
        }

        let start = index * self.geometry.width;
        self.pixels[start..start + self.geometry.width].copy_from_slice(pixels);
        if !self.received[index] {
            self.received[index] = true;
            self.rows_received += 1;
        }
        Ok(())
    }

    /// Check for frame completion and refresh the rate estimate.
    ///
    /// Call once per drain cycle after at least one row was written.
    ///
    /// - All rows received: the frame is declared complete, the rate
    ///   becomes `1 / (now - last_complete)`, and the received mask is
    ///   cleared in full. Returns `true`.
    /// - Otherwise the rate is smoothed toward 1 as a coarse heartbeat
    ///   signal that rows are still arriving (not a true frame rate).
    ///   Returns `false`.
    pub fn poll_completion(&mut self, now: Instant) -> bool {
        if self.rows_received == self.geometry.height {
            let interval = now
                .duration_since(self.last_complete)
                .as_secs_f64()
                .max(MIN_COMPLETE_INTERVAL_SECS);
            self.fps = 1.0 / interval;
            self.last_complete = now;
            self.received.fill(false);
            self.rows_received = 0;
            true
        } else {
            self.fps = self.smoothing * self.fps + (1.0 - self.smoothing);
            false
        }
    }

    /// The full pixel grid, row-major — possibly mid-assembly.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// One row of pixels.
    pub fn row(&self, index: usize) -> &[u8] {
        let start = index * self.geometry.width;
        &self.pixels[start..start + self.geometry.width]
    }

    /// Rows received so far in the current assembly cycle.
    pub fn rows_received(&self) -> usize {
        self.rows_received
    }

    /// Whether a given row has been received in the current cycle.
    pub fn is_received(&self, index: usize) -> bool {
        self.received[index]
    }

    /// Current smoothed frames-per-second estimate.
    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// The geometry this buffer was built for.
    pub fn geometry(&self) -> ImageGeometry {
        self.geometry
    }
}
