//! Line-number header resolution.
//!
//! The sender's hardware link does not contractually fix either the
//! byte order of the 2-byte row index or whether counting starts at 0
//! or 1, so every header is interpreted defensively under all four
//! combinations rather than assuming a convention globally.
//!
//! Candidate precedence is fixed and part of the observable contract:
//!
//! 1. forward byte order, zero-based
//! 2. forward byte order, one-based (mapped to `value - 1`)
//! 3. reverse byte order, zero-based
//! 4. reverse byte order, one-based
//!
//! Candidates are deduplicated by resulting index, preferring forward
//! matches; the first surviving candidate wins.

/// How a row index was obtained from its 2-byte header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrderTag {
    /// The forward (big-endian-first) interpretation was in range.
    Forward,
    /// Only the reverse (byte-swapped) interpretation was in range.
    Reverse,
    /// Both orders produced valid, differing candidates with nothing to
    /// distinguish them; the forward candidate's index was kept.
    Ambiguous,
}

impl std::fmt::Display for ByteOrderTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ByteOrderTag::Forward => write!(f, "forward"),
            ByteOrderTag::Reverse => write!(f, "reverse"),
            ByteOrderTag::Ambiguous => write!(f, "ambiguous"),
        }
    }
}

/// Resolve a 2-byte line header into a row index in `[0, height)`.
///
/// Returns `None` when no interpretation under any byte order or
/// numbering convention lands in range — the datagram must then be
/// dropped and counted as invalid.
pub fn resolve(header: [u8; 2], height: usize) -> Option<(usize, ByteOrderTag)> {
    let fwd = u16::from_be_bytes(header) as usize;
    let rev = u16::from_le_bytes(header) as usize;

    let fwd_zero = (fwd < height).then_some(fwd);
    let fwd_one = (1..=height).contains(&fwd).then(|| fwd - 1);
    let rev_zero = (rev < height).then_some(rev);
    let rev_one = (1..=height).contains(&rev).then(|| rev - 1);

    // A forward zero-based hit always wins, whatever reverse decodes to.
    if let Some(idx) = fwd_zero {
        return Some((idx, ByteOrderTag::Forward));
    }

    // Forward valid only through the one-based fallback: if reverse
    // independently yields a different valid index, nothing
    // distinguishes the two orders. Keep forward's index, tag it.
    if let Some(idx) = fwd_one {
        return match rev_zero.or(rev_one) {
            Some(r) if r != idx => Some((idx, ByteOrderTag::Ambiguous)),
            _ => Some((idx, ByteOrderTag::Forward)),
        };
    }

    if let Some(idx) = rev_zero.or(rev_one) {
        return Some((idx, ByteOrderTag::Reverse));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEIGHT: usize = 720;

    #[test]
    fn forward_zero_based_wins() {
        // 0x0005: forward 5 (in range) — forward always wins here,
        // whatever reverse (0x0500 = 1280) would have decoded to.
        assert_eq!(
            resolve([0x00, 0x05], HEIGHT),
            Some((5, ByteOrderTag::Forward))
        );
    }

    #[test]
    fn forward_wins_even_when_reverse_also_valid() {
        // 0x0102: forward 258, reverse 513 — both in range for 720.
        // Forward zero-based is in range, so the tag is Forward.
        assert_eq!(
            resolve([0x01, 0x02], HEIGHT),
            Some((258, ByteOrderTag::Forward))
        );
    }

    #[test]
    fn reverse_when_forward_out_of_range() {
        // 0x0100: forward 256 out of range for height 4; reverse 1 valid.
        assert_eq!(resolve([0x01, 0x00], 4), Some((1, ByteOrderTag::Reverse)));
    }

    #[test]
    fn reverse_one_based_maps_down() {
        // height 4: forward 0x0400 = 1024 invalid; reverse 4 is valid
        // only one-based, mapping to row 3.
        assert_eq!(resolve([0x04, 0x00], 4), Some((3, ByteOrderTag::Reverse)));
    }

    #[test]
    fn one_based_boundary_maps_to_last_row() {
        // Forward decodes exactly to height: valid one-based only.
        // Reverse (0xD002 = 53250) is far out of range, so no ambiguity.
        let header = (HEIGHT as u16).to_be_bytes(); // 0x02D0
        assert_eq!(
            resolve(header, HEIGHT),
            Some((HEIGHT - 1, ByteOrderTag::Forward))
        );
    }

    #[test]
    fn ambiguous_when_only_one_based_forward_and_valid_reverse() {
        // height 513, header 0x0201: forward 513 == height, valid only
        // one-based (→ 512); reverse 0x0102 = 258 is independently in
        // range and differs. Forward's index is kept, tagged Ambiguous.
        assert_eq!(
            resolve([0x02, 0x01], 513),
            Some((512, ByteOrderTag::Ambiguous))
        );
    }

    #[test]
    fn no_ambiguity_when_reverse_agrees() {
        // Symmetric bytes decode identically under both orders.
        // height 257, header 0x0101 = 257 under both orders: valid only
        // one-based → 256, and the candidates collapse to one index.
        assert_eq!(
            resolve([0x01, 0x01], 257),
            Some((256, ByteOrderTag::Forward))
        );
    }

    #[test]
    fn rejects_when_no_interpretation_fits() {
        // 800 under both orders would need symmetric large values; use
        // 0xFFFF: forward 65535, reverse 65535 — both far out of range.
        assert_eq!(resolve([0xFF, 0xFF], HEIGHT), None);

        // Forward 0x0320 = 800, reverse 0x2003 = 8195 — both out of
        // range for height 720.
        assert_eq!(resolve([0x03, 0x20], HEIGHT), None);
    }

    #[test]
    fn zero_header_is_row_zero_forward() {
        assert_eq!(resolve([0x00, 0x00], HEIGHT), Some((0, ByteOrderTag::Forward)));
    }

    #[test]
    fn exhaustive_results_always_in_range() {
        // Every resolvable header must land inside [0, height).
        for hi in 0..=255u8 {
            for lo in 0..=255u8 {
                if let Some((idx, _)) = resolve([hi, lo], HEIGHT) {
                    assert!(idx < HEIGHT, "header {hi:02x}{lo:02x} → {idx}");
                }
            }
        }
    }
}
