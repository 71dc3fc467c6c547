//! Studio configuration parsed from environment variables.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use canvas::consts::{
    DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_EXTRA_TURNS, DEFAULT_SETTLE_DELAY_MS,
    DEFAULT_SPIN_DURATION_MS,
};
use canvas::geom::CanvasSize;
use tracing::Level;

use crate::error::CliError;

pub const DEFAULT_STUDIO_DIR: &str = "./pages";
pub const DEFAULT_FRAME_MS: u64 = 16;

/// Wheel presentation settings for the terminal spin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinConfig {
    /// Extra full turns given to newly added wheels.
    pub extra_turns: u32,
    /// Spin length given to newly added wheels.
    pub duration: Duration,
    /// How long a settled result stays up before the wheel resets.
    pub settle_delay: Duration,
    /// Interval between animation samples.
    pub frame: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudioConfig {
    pub pages_dir: PathBuf,
    pub canvas_size: CanvasSize,
    pub spin: SpinConfig,
    pub log_level: Level,
}

impl StudioConfig {
    /// Build typed config from environment variables.
    ///
    /// All optional:
    /// - `H5_STUDIO_DIR`: page directory, default `./pages`
    /// - `H5_CANVAS_WIDTH` / `H5_CANVAS_HEIGHT`: canvas for new pages, default 375x667
    /// - `H5_SPIN_TURNS`: extra turns for new wheels, default 5
    /// - `H5_SPIN_DURATION_MS`: spin length for new wheels, default 4000
    /// - `H5_SETTLE_DELAY_MS`: result display time, default 3000
    /// - `H5_FRAME_MS`: animation sample interval, default 16
    /// - `H5_LOG_LEVEL`: `trace`..`error`, default `info`
    ///
    /// Unparseable numbers fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns `Config` for a zero canvas dimension, a zero frame interval, or
    /// an unknown log level.
    pub fn from_env() -> Result<Self, CliError> {
        let pages_dir = std::env::var("H5_STUDIO_DIR").map_or_else(|_| PathBuf::from(DEFAULT_STUDIO_DIR), PathBuf::from);

        let canvas_size = CanvasSize::new(
            env_parse("H5_CANVAS_WIDTH", DEFAULT_CANVAS_WIDTH),
            env_parse("H5_CANVAS_HEIGHT", DEFAULT_CANVAS_HEIGHT),
        );
        if !canvas_size.is_valid() {
            return Err(CliError::Config(format!(
                "canvas must be positive, got {}x{}",
                canvas_size.width, canvas_size.height
            )));
        }

        let frame_ms = env_parse("H5_FRAME_MS", DEFAULT_FRAME_MS);
        if frame_ms == 0 {
            return Err(CliError::Config("H5_FRAME_MS must be at least 1".into()));
        }
        let spin = SpinConfig {
            extra_turns: env_parse("H5_SPIN_TURNS", DEFAULT_EXTRA_TURNS),
            duration: Duration::from_millis(env_parse("H5_SPIN_DURATION_MS", DEFAULT_SPIN_DURATION_MS)),
            settle_delay: Duration::from_millis(env_parse("H5_SETTLE_DELAY_MS", DEFAULT_SETTLE_DELAY_MS)),
            frame: Duration::from_millis(frame_ms),
        };

        let log_level = parse_level(std::env::var("H5_LOG_LEVEL").ok().as_deref())?;

        Ok(Self { pages_dir, canvas_size, spin, log_level })
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

fn parse_level(raw: Option<&str>) -> Result<Level, CliError> {
    let raw = raw.unwrap_or("info");
    Level::from_str(raw.trim()).map_err(|_| CliError::Config(format!("unknown H5_LOG_LEVEL: {raw}")))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
