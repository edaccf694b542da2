use std::fmt;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::Parser;

/// Frame size in logical pixels, written `WxH` on the command line.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl fmt::Display for FrameSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

fn parse_size(raw: &str) -> Result<FrameSize, String> {
    let (w, h) = raw
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("{raw:?} is not WxH"))?;
    let width: u32 = w.trim().parse().map_err(|e| format!("invalid width {w:?}: {e}"))?;
    let height: u32 = h.trim().parse().map_err(|e| format!("invalid height {h:?}: {e}"))?;
    if width == 0 || height == 0 {
        return Err(format!("{raw:?} has zero area"));
    }
    Ok(FrameSize { width, height })
}

/// Preview and snapshot tool for the lumen effect programs.
///
/// Without flags it animates the demo scene in a window on the GPU.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "lumen-studio", version, about, long_about = None)]
pub struct StudioConfig {
    /// Render one frame offline and write it as a PNG
    #[arg(long, value_name = "PNG")]
    pub snapshot: Option<PathBuf>,

    /// Frame size in logical pixels
    #[arg(long, value_name = "WxH", value_parser = parse_size, default_value = "1280x720")]
    pub size: FrameSize,

    /// Animation time of the snapshot, in seconds
    #[arg(long, value_name = "SECS", default_value_t = 1.0)]
    pub time: f32,

    /// Software rasterizer threads (default: all cores)
    #[arg(long, value_name = "N")]
    pub threads: Option<NonZeroUsize>,

    /// env_logger filter, e.g. lumen_engine=debug
    #[arg(long = "log", value_name = "FILTER")]
    pub log_filter: Option<String>,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            snapshot: None,
            size: FrameSize { width: 1280, height: 720 },
            time: 1.0,
            threads: None,
            log_filter: None,
        }
    }
}
