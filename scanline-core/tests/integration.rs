//! Integration tests — end-to-end scanline assembly over a real UDP
//! socket pair on localhost.

use std::time::{Duration, Instant};

use tokio::net::UdpSocket;

use scanline_core::{BitOrder, DrainOutcome, FrameAssembler, ImageGeometry};

// ── Helpers ──────────────────────────────────────────────────────

/// Bind a receiver on an OS-assigned port plus a sender aimed at it.
async fn socket_pair() -> (UdpSocket, UdpSocket) {
    let receiver = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let sender = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    sender.connect(receiver.local_addr().unwrap()).await.unwrap();
    (receiver, sender)
}

/// Drain repeatedly until `packets` valid datagrams were processed,
/// accumulating outcomes. Panics after 5 s — localhost delivery is
/// fast but not synchronous with the `send` calls.
async fn drain_until(
    assembler: &mut FrameAssembler,
    socket: &mut UdpSocket,
    packets: u64,
    bit_order: BitOrder,
) -> DrainOutcome {
    tokio::time::timeout(Duration::from_secs(5), async {
        let mut total = DrainOutcome::default();
        loop {
            let out = assembler.drain(socket, bit_order, Instant::now()).unwrap();
            total.rows_written += out.rows_written;
            total.frame_completed |= out.frame_completed;
            if assembler.stats().packets >= packets {
                return total;
            }
            socket.readable().await.unwrap();
        }
    })
    .await
    .expect("datagrams did not arrive in time")
}

// ── Scenarios ────────────────────────────────────────────────────

#[tokio::test]
async fn full_frame_over_udp() {
    // 8×4 image: 1 row byte, 3-byte datagrams, forward zero-based
    // headers 0..4, all bits set.
    let (mut receiver, sender) = socket_pair().await;
    let geometry = ImageGeometry::new(8, 4).unwrap();
    let mut assembler = FrameAssembler::new(geometry, true, 0.9);

    for row in 0u16..4 {
        let mut datagram = row.to_be_bytes().to_vec();
        datagram.push(0xFF);
        sender.send(&datagram).await.unwrap();
    }

    let out = drain_until(&mut assembler, &mut receiver, 4, BitOrder::MsbFirst).await;

    assert_eq!(out.rows_written, 4);
    assert!(out.frame_completed, "completion must fire exactly once");
    assert!(assembler.frame().pixels().iter().all(|&p| p == 255));
    assert_eq!(assembler.frame().rows_received(), 0);

    let stats = assembler.stats();
    assert_eq!(stats.forward, 4);
    assert_eq!(stats.reverse, 0);
    assert_eq!(stats.invalid, 0);
}

#[tokio::test]
async fn reverse_byte_order_header() {
    // Header [0x01, 0x00]: forward decodes to 256 (out of range for a
    // height-4 image), reverse to 1 (in range) — row 1, tagged reverse.
    let (mut receiver, sender) = socket_pair().await;
    let geometry = ImageGeometry::new(8, 4).unwrap();
    let mut assembler = FrameAssembler::new(geometry, true, 0.9);

    sender.send(&[0x01, 0x00, 0xFF]).await.unwrap();

    let out = drain_until(&mut assembler, &mut receiver, 1, BitOrder::MsbFirst).await;

    assert_eq!(out.rows_written, 1);
    assert!(assembler.frame().is_received(1));
    assert!(assembler.frame().row(1).iter().all(|&p| p == 255));
    assert_eq!(assembler.stats().reverse, 1);
}

#[tokio::test]
async fn short_datagram_is_ignored() {
    let (mut receiver, sender) = socket_pair().await;
    let geometry = ImageGeometry::new(8, 4).unwrap();
    let mut assembler = FrameAssembler::new(geometry, true, 0.9);

    // One byte short of header + row, followed by a valid datagram so
    // the drain has something observable to stop on.
    sender.send(&[0x00, 0x02]).await.unwrap();
    let mut valid = 3u16.to_be_bytes().to_vec();
    valid.push(0xFF);
    sender.send(&valid).await.unwrap();

    let out = drain_until(&mut assembler, &mut receiver, 1, BitOrder::MsbFirst).await;

    // Only the valid datagram left a mark.
    assert_eq!(out.rows_written, 1);
    assert_eq!(assembler.stats().packets, 1);
    assert!(!assembler.frame().is_received(2));
    assert!(assembler.frame().row(2).iter().all(|&p| p == 0));
    assert!(assembler.frame().is_received(3));
}

#[tokio::test]
async fn loss_leaves_frame_incomplete() {
    // Rows 0 and 2 only: the frame must stay partial, with no
    // completion event and the received mask intact.
    let (mut receiver, sender) = socket_pair().await;
    let geometry = ImageGeometry::new(8, 4).unwrap();
    let mut assembler = FrameAssembler::new(geometry, true, 0.9);

    for row in [0u16, 2] {
        let mut datagram = row.to_be_bytes().to_vec();
        datagram.push(0xF0);
        sender.send(&datagram).await.unwrap();
    }

    let out = drain_until(&mut assembler, &mut receiver, 2, BitOrder::MsbFirst).await;

    assert_eq!(out.rows_written, 2);
    assert!(!out.frame_completed);
    assert_eq!(assembler.frame().rows_received(), 2);
    assert!(assembler.frame().is_received(0));
    assert!(!assembler.frame().is_received(1));
    // Partial cycles still move the heartbeat estimate off zero.
    assert!(assembler.frame().fps() > 0.0);
}

#[tokio::test]
async fn two_consecutive_frames() {
    let (mut receiver, sender) = socket_pair().await;
    let geometry = ImageGeometry::new(8, 4).unwrap();
    let mut assembler = FrameAssembler::new(geometry, true, 0.9);

    for row in 0u16..4 {
        let mut datagram = row.to_be_bytes().to_vec();
        datagram.push(0xFF);
        sender.send(&datagram).await.unwrap();
    }
    let first = drain_until(&mut assembler, &mut receiver, 4, BitOrder::MsbFirst).await;
    assert!(first.frame_completed);

    // Second frame, all-dark payloads.
    for row in 0u16..4 {
        let mut datagram = row.to_be_bytes().to_vec();
        datagram.push(0x00);
        sender.send(&datagram).await.unwrap();
    }
    let second = drain_until(&mut assembler, &mut receiver, 8, BitOrder::MsbFirst).await;
    assert!(second.frame_completed);
    assert!(assembler.frame().pixels().iter().all(|&p| p == 0));
    assert_eq!(assembler.stats().forward, 8);
}
