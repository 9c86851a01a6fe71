//! Grayscale snapshot writer.
//!
//! Dumps the currently displayed buffer as a binary PGM (P5) file —
//! lossless for 8-bit grayscale and readable by any image tool.
//! Inversion is a presentation concern, applied here at write time;
//! the frame buffer itself always stores non-inverted intensities.

use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use scanline_core::{FrameImage, MAX_INTENSITY};

/// Write `frame` into `dir` as `frame_<unix-seconds>.pgm`.
///
/// Returns the path written.
pub fn save_pgm(dir: &Path, frame: &FrameImage, invert: bool) -> io::Result<PathBuf> {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let path = dir.join(format!("frame_{stamp}.pgm"));

    let geometry = frame.geometry();
    let header = format!("P5\n{} {}\n{MAX_INTENSITY}\n", geometry.width, geometry.height);

    let mut data = Vec::with_capacity(header.len() + geometry.pixel_count());
    data.extend_from_slice(header.as_bytes());
    if invert {
        data.extend(frame.pixels().iter().map(|&p| MAX_INTENSITY - p));
    } else {
        data.extend_from_slice(frame.pixels());
    }

    std::fs::write(&path, data)?;
    Ok(path)
}
