//! Non-blocking datagram drain loop.
//!
//! Each [`FrameAssembler::drain`] call empties the source's pending
//! datagram queue: every valid datagram passes through the line-index
//! resolver and bit unpacker before its row lands in the frame buffer.
//! The loop never blocks waiting for a packet — an empty queue ends the
//! drain and the caller yields to its display sink and the scheduler.
//!
//! UDP delivery is best-effort by design: malformed-length datagrams
//! are dropped silently, unresolvable headers are dropped and counted,
//! and lost scanlines are simply left stale until the sender's next
//! pass overwrites them. No retries, no backpressure.

use std::io;
use std::time::Instant;

use tokio::net::UdpSocket;
use tracing::debug;

use crate::bits::{self, BitOrder};
use crate::error::ScanlineError;
use crate::frame::FrameImage;
use crate::geometry::{HEADER_LEN, ImageGeometry};
use crate::line_index;
use crate::stats::DecodeStats;

/// Scratch buffer floor for a single receive; oversized datagrams are
/// accepted and their trailing bytes ignored.
const RECV_SCRATCH_LEN: usize = 10 * 1024;

/// How many valid-length datagrams get their raw header logged at
/// `debug` level, to help diagnose a sender's actual conventions.
const DEBUG_FIRST_PACKETS: u64 = 8;

// ── DatagramSource ───────────────────────────────────────────────

/// A non-blocking "receive next datagram or signal none pending"
/// capability.
///
/// Abstracting the socket keeps the drain loop implementable over any
/// non-blocking datagram transport and trivially testable in memory.
pub trait DatagramSource {
    /// Attempt to receive one datagram into `buf` without blocking.
    ///
    /// Returns `Ok(Some(len))` on success, `Ok(None)` when no datagram
    /// is currently queued, and `Err` for real socket failures.
    fn try_recv(&mut self, buf: &mut [u8]) -> io::Result<Option<usize>>;
}

impl DatagramSource for UdpSocket {
    fn try_recv(&mut self, buf: &mut [u8]) -> io::Result<Option<usize>> {
        match self.try_recv_from(buf) {
            Ok((len, _addr)) => Ok(Some(len)),
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => Ok(None),
            Err(e) => Err(e),
        }
    }
}

// ── FrameAssembler ───────────────────────────────────────────────

/// Outcome of one drain cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainOutcome {
    /// Rows written into the frame buffer this cycle.
    pub rows_written: usize,
    /// Whether this cycle completed a frame (all rows received).
    pub frame_completed: bool,
}

/// Reassembles scanline datagrams into a display-ready frame buffer.
///
/// Single-threaded by design: the frame buffer and counters are only
/// ever touched from the one control loop driving [`drain`], so no
/// locking is involved anywhere.
///
/// [`drain`]: FrameAssembler::drain
pub struct FrameAssembler {
    geometry: ImageGeometry,
    frame: FrameImage,
    stats: DecodeStats,
    /// Fold resolved indices by `height`, absorbing sender-side row
    /// counters that wrap or run unbounded. Can mask genuine
    /// out-of-range corruption; that tradeoff is the caller's call.
    fold_line_index: bool,
    recv_buf: Vec<u8>,
    row_scratch: Vec<u8>,
}

impl FrameAssembler {
    /// Create an assembler for the given geometry.
    ///
    /// `fold_line_index` enables modulo-by-height index folding;
    /// `fps_smoothing` is the EWMA weight for partial-update cycles.
    pub fn new(geometry: ImageGeometry, fold_line_index: bool, fps_smoothing: f64) -> Self {
        Self {
            geometry,
            frame: FrameImage::new(geometry, fps_smoothing),
            stats: DecodeStats::default(),
            fold_line_index,
            recv_buf: vec![0u8; RECV_SCRATCH_LEN.max(geometry.datagram_len())],
            row_scratch: vec![0u8; geometry.width],
        }
    }

    /// Drain every datagram currently queued on `source`.
    ///
    /// `bit_order` is passed per cycle because it is runtime-togglable
    /// state owned by the outer loop. `now` feeds the completion / rate
    /// bookkeeping, which runs only if at least one row was written.
    ///
    /// Returns how much happened; real socket errors propagate.
    pub fn drain(
        &mut self,
        source: &mut impl DatagramSource,
        bit_order: BitOrder,
        now: Instant,
    ) -> Result<DrainOutcome, ScanlineError> {
        let needed = self.geometry.datagram_len();
        let mut rows_written = 0usize;

        while let Some(len) = source.try_recv(&mut self.recv_buf)? {
            if len < needed {
                // Malformed / short datagram: drop without trace.
                continue;
            }

            let header = [self.recv_buf[0], self.recv_buf[1]];
            self.stats.packets += 1;
            if self.stats.packets <= DEBUG_FIRST_PACKETS {
                debug!(
                    pkt = self.stats.packets,
                    len,
                    hdr_fwd = u16::from_be_bytes(header),
                    hdr_rev = u16::from_le_bytes(header),
                    "datagram header"
                );
            }

            let Some((mut index, tag)) = line_index::resolve(header, self.geometry.height) else {
                self.stats.invalid += 1;
                continue;
            };
            if self.fold_line_index {
                index %= self.geometry.height;
            }
            self.stats.tally(tag);

            let packed = &self.recv_buf[HEADER_LEN..HEADER_LEN + self.geometry.row_bytes()];
            bits::unpack_row(packed, bit_order, &mut self.row_scratch);
            self.frame.write_row(index, &self.row_scratch)?;
            rows_written += 1;
        }

        let frame_completed = if rows_written > 0 {
            self.frame.poll_completion(now)
        } else {
            false
        };

        Ok(DrainOutcome {
            rows_written,
            frame_completed,
        })
    }

    /// The latest frame buffer contents — possibly mid-assembly,
    /// mixing rows from more than one source frame.
    pub fn frame(&self) -> &FrameImage {
        &self.frame
    }

    /// Read-only snapshot of the diagnostics counters.
    pub fn stats(&self) -> DecodeStats {
        self.stats
    }

    /// The geometry this assembler was built for.
    pub fn geometry(&self) -> ImageGeometry {
        self.geometry
    }
}

// ── Tests ────────────────────────────────────────────────────────
