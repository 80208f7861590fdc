use std::{path::PathBuf, str::FromStr, time::Duration};

use crate::maze::BlockStyle;

/// Runtime settings, read from `MAZELINE_*` environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Glyph table used to draw and read back mazes
    pub style: BlockStyle,
    /// Seed for maze generation. `None` draws a fresh seed from the OS every time
    pub seed: Option<u64>,
    /// Start with fast mode on (solve without streaming the steps)
    pub fast_mode: bool,
    /// Directory the log file is written to
    pub log_dir: PathBuf,
    pub log_level: tracing::Level,
    /// Delay between two streamed snapshots on screen
    pub frame_time: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            style: BlockStyle::Full,
            seed: None,
            fast_mode: false,
            log_dir: PathBuf::from("."),
            log_level: tracing::Level::INFO,
            frame_time: Duration::from_millis(10),
        }
    }
}

impl Config {
    pub const LOG_FILE_NAME: &'static str = "mazeline.log";

    /// Reads the configuration from the process environment.
    pub fn from_env() -> Self {
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. Unset keys keep their defaults, and so do
    /// values that fail to parse; those are reported with a warning.
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let mut config = Config::default();

        if let Some(style) = parse_var(&lookup, "MAZELINE_STYLE") {
            config.style = style;
        }
        if let Some(seed) = parse_var(&lookup, "MAZELINE_SEED") {
            config.seed = Some(seed);
        }
        if let Some(fast) = parse_flag(&lookup, "MAZELINE_FAST") {
            config.fast_mode = fast;
        }
        if let Some(dir) = lookup("MAZELINE_LOG_DIR").filter(|d| !d.trim().is_empty()) {
            config.log_dir = PathBuf::from(dir);
        }
        if let Some(level) = parse_var(&lookup, "MAZELINE_LOG_LEVEL") {
            config.log_level = level;
        }
        if let Some(ms) = parse_var::<u64, _>(&lookup, "MAZELINE_FRAME_MS") {
            config.frame_time = Duration::from_millis(ms);
        }

        config
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("[config] ignoring {}={:?}: {}", key, raw, e);
            None
        }
    }
}

/// Reads an on/off switch. Anything other than the usual spellings is reported and ignored.
fn parse_flag<F: Fn(&str) -> Option<String>>(lookup: &F, key: &str) -> Option<bool> {
    let raw = lookup(key)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => {
            tracing::warn!("[config] ignoring {}={:?}: expected on or off", key, raw);
            None
        }
    }
}
