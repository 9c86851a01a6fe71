//! UDP binary scanline viewer — entry point.
//!
//! ```text
//! scanline-viewer                     Listen with defaults (0.0.0.0:6102)
//! scanline-viewer --config <path>     Use custom config TOML
//! scanline-viewer --listen <addr>     Override the listen address
//! scanline-viewer --gen-config        Dump default config and exit
//! ```
//!
//! Runtime keys: `q`/Esc quit, `b` toggle bit order, `i` toggle
//! inversion, `s` save a snapshot.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use scanline_core::{FrameAssembler, ImageGeometry};

use scanline_viewer::config::ViewerConfig;
use scanline_viewer::input::{KeyInput, ViewerCommand};
use scanline_viewer::snapshot;
use scanline_viewer::socket;

// ── CLI ──────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "scanline-viewer", about = "Live viewer for 1bpp UDP scanline streams")]
struct Cli {
    /// Path to configuration TOML file.
    #[arg(short, long, default_value = "scanline-viewer.toml")]
    config: PathBuf,

    /// Listen address (overrides config). Example: 0.0.0.0:6102
    #[arg(short, long)]
    listen: Option<String>,

    /// Print the default configuration to stdout and exit.
    #[arg(long)]
    gen_config: bool,
}

// ── Main ─────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.gen_config {
        let text = toml::to_string_pretty(&ViewerConfig::default())?;
        println!("{text}");
        return Ok(());
    }

    let mut config = ViewerConfig::load(&cli.config);
    if let Some(addr) = cli.listen {
        config.network.listen_addr = addr;
    }

    // Init tracing.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("scanline-viewer v{}", env!("CARGO_PKG_VERSION"));

    // ── 1. Geometry and socket ──────────────────────────────────

    let geometry = ImageGeometry::new(config.image.width, config.image.height)?;
    let listen_addr: SocketAddr = config.network.listen_addr.parse()?;

    // Bind failure is fatal; buffer tuning degrades with a warning.
    let mut udp = socket::bind_udp(listen_addr, config.network.recv_buffer_bytes)?;
    info!(
        "listening on {listen_addr}, expecting {} byte datagrams ({}×{} @ 1bpp)",
        geometry.datagram_len(),
        geometry.width,
        geometry.height,
    );

    // ── 2. Assembler and runtime toggles ────────────────────────

    let mut assembler = FrameAssembler::new(
        geometry,
        config.image.fold_line_index,
        config.display.fps_smoothing,
    );

    // Mutable presentation state owned here, never ambient.
    let mut bit_order = config.image.parsed_bit_order();
    let mut invert = config.display.invert;

    let mut keys = match KeyInput::new() {
        Ok(k) => Some(k),
        Err(e) => {
            warn!("no interactive terminal ({e}); runtime toggles disabled");
            None
        }
    };

    let snapshot_dir = PathBuf::from(&config.display.snapshot_dir);
    let report_interval = Duration::from_millis(config.display.status_interval_ms.max(1));
    let mut next_report = Instant::now() + report_interval;

    // ── 3. Drain loop ───────────────────────────────────────────

    'run: loop {
        let outcome = assembler.drain(&mut udp, bit_order, Instant::now())?;
        if outcome.frame_completed {
            debug!("frame complete, fps ~= {:.2}", assembler.frame().fps());
        }

        // Runtime toggles from the terminal.
        if let Some(keys) = keys.as_mut() {
            while let Some(cmd) = keys.poll()? {
                match cmd {
                    ViewerCommand::Quit => {
                        info!("quit requested");
                        break 'run;
                    }
                    ViewerCommand::ToggleBitOrder => {
                        bit_order = bit_order.toggled();
                        info!("bit order set to {bit_order}");
                    }
                    ViewerCommand::ToggleInvert => {
                        invert = !invert;
                        info!("invert display: {invert}");
                    }
                    ViewerCommand::SaveSnapshot => {
                        match snapshot::save_pgm(&snapshot_dir, assembler.frame(), invert) {
                            Ok(path) => info!("saved {}", path.display()),
                            Err(e) => warn!("snapshot failed: {e}"),
                        }
                    }
                }
            }
        }

        // Periodic status report.
        let now = Instant::now();
        if now >= next_report {
            info!(
                "lines_in_frame={}/{} fps~={:.2} {}",
                assembler.frame().rows_received(),
                geometry.height,
                assembler.frame().fps(),
                assembler.stats(),
            );
            next_report = now + report_interval;
        }

        // Yield briefly so the terminal and scheduler stay responsive;
        // an interrupt is a clean shutdown request, not an error.
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("interrupt — shutting down");
                break 'run;
            }
            _ = tokio::time::sleep(Duration::from_millis(1)) => {}
        }
    }

    // ── 4. Shutdown ─────────────────────────────────────────────

    drop(keys); // leave raw mode before the final log line
    info!(
        "done: {} ({} rows in last partial frame)",
        assembler.stats(),
        assembler.frame().rows_received(),
    );
    Ok(())
}
