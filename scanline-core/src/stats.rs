//! Diagnostics counters.
//!
//! Process-lifetime tallies of how each datagram's line header was
//! resolved. Monotonic; reset only when the assembler is rebuilt.

use crate::line_index::ByteOrderTag;

/// Running tallies for the decode pipeline, cheap to snapshot by copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeStats {
    /// Datagrams of valid length fed through the resolver.
    pub packets: u64,
    /// Headers resolved under the forward byte order.
    pub forward: u64,
    /// Headers resolved under the reverse byte order.
    pub reverse: u64,
    /// Headers where both orders were plausible and forward was picked.
    pub ambiguous: u64,
    /// Headers with no valid interpretation; datagram dropped.
    pub invalid: u64,
}

impl DecodeStats {
    /// Count one resolved header.
    pub fn tally(&mut self, tag: ByteOrderTag) {
        match tag {
            ByteOrderTag::Forward => self.forward += 1,
            ByteOrderTag::Reverse => self.reverse += 1,
            ByteOrderTag::Ambiguous => self.ambiguous += 1,
        }
    }
}

impl std::fmt::Display for DecodeStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "pkts={} fwd={} rev={} amb={} inv={}",
            self.packets, self.forward, self.reverse, self.ambiguous, self.invalid
        )
    }
}
