//! UDP socket setup and tuning.
//!
//! Built with `socket2` so the kernel receive buffer can be enlarged
//! before binding — bursty scanline traffic overruns default-sized
//! buffers easily. Bind failures are fatal (the viewer cannot operate
//! unbound); buffer tuning failures degrade gracefully.

use std::net::SocketAddr;

use socket2::{Domain, Protocol, Socket, Type};
use tracing::{info, warn};

use scanline_core::ScanlineError;

/// Bind a non-blocking UDP socket on `addr` and hand it to tokio.
pub fn bind_udp(
    addr: SocketAddr,
    recv_buffer_bytes: usize,
) -> Result<tokio::net::UdpSocket, ScanlineError> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };
    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;

    // Non-fatal: proceed with the default buffer if the OS refuses.
    if let Err(e) = socket.set_recv_buffer_size(recv_buffer_bytes) {
        warn!("could not set socket receive buffer to {recv_buffer_bytes} bytes: {e}");
    } else {
        info!("socket receive buffer requested: {recv_buffer_bytes} bytes");
    }

    socket.set_nonblocking(true)?;
    socket.bind(&addr.into())?;

    tokio::net::UdpSocket::from_std(socket.into()).map_err(ScanlineError::from)
}
