//! Viewer configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use scanline_core::BitOrder;

/// Top-level configuration for the viewer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Network settings.
    pub network: NetworkConfig,
    /// Raster geometry and wire decoding.
    pub image: ImageConfig,
    /// Presentation and reporting.
    pub display: DisplayConfig,
    /// Logging.
    pub logging: LoggingConfig,
}

/// Network settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Listen address (must match the sender's destination port).
    pub listen_addr: String,
    /// Kernel socket receive buffer size in bytes. Enlarging it helps
    /// under bursty traffic; failure to apply is non-fatal.
    pub recv_buffer_bytes: usize,
}

/// Raster geometry and wire decoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    /// Image width in pixels (multiple of 8).
    pub width: usize,
    /// Image height in pixels (scanlines per frame).
    pub height: usize,
    /// Initial bit order within each wire byte: "msb" or "lsb".
    /// Togglable at runtime with the `b` key.
    pub bit_order: String,
    /// Fold incoming line indices by the image height, absorbing
    /// sender-side counters that wrap or run unbounded.
    pub fold_line_index: bool,
}

/// Presentation and reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Start with display inversion on (togglable with `i`).
    pub invert: bool,
    /// EWMA weight for the fps estimate on partial-update cycles.
    pub fps_smoothing: f64,
    /// Interval between status log lines, in milliseconds.
    pub status_interval_ms: u64,
    /// Directory snapshots are written into (`s` key).
    pub snapshot_dir: String,
}

/// Logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (overridden by `RUST_LOG` if set).
    pub level: String,
}

// ── Defaults ─────────────────────────────────────────────────────

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            network: NetworkConfig::default(),
            image: ImageConfig::default(),
            display: DisplayConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:6102".into(),
            recv_buffer_bytes: 8 * 1024 * 1024,
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            bit_order: "msb".into(),
            fold_line_index: true,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            invert: false,
            fps_smoothing: 0.9,
            status_interval_ms: 1000,
            snapshot_dir: ".".into(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

// ── Loading ──────────────────────────────────────────────────────

impl ViewerConfig {
    /// Load from a TOML file, falling back to defaults.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!("invalid config {}: {e}; using defaults", path.display());
                Self::default()
            }),
            Err(_) => {
                tracing::info!("no config at {}; using defaults", path.display());
                Self::default()
            }
        }
    }
}

impl ImageConfig {
    /// Parse the configured bit order, warning on unknown values.
    pub fn parsed_bit_order(&self) -> BitOrder {
        match self.bit_order.to_ascii_lowercase().as_str() {
            "msb" | "msb-first" => BitOrder::MsbFirst,
            "lsb" | "lsb-first" => BitOrder::LsbFirst,
            other => {
                tracing::warn!("unknown bit_order {other:?}; assuming msb-first");
                BitOrder::MsbFirst
            }
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────
