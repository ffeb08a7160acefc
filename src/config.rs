//! Environment configuration for the binary.

use std::time::{SystemTime, UNIX_EPOCH};

use log::LevelFilter;

use crate::types::{AI_INTERVAL_MIN_MS, AI_INTERVAL_MS, DEFAULT_FPS};

pub const DEFAULT_LOG_PATH: &str = "autotris.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub seed: u32,
    pub autoplay: bool,
    pub fps: u32,
    pub ai_interval_ms: u32,
    /// `None` disables logging.
    pub log_path: Option<String>,
    pub log_level: LevelFilter,
}

impl AppConfig {
    /// Read `AUTOTRIS_*` variables. Unset or unparsable values use defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let seed = lookup("AUTOTRIS_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(clock_seed);

        let autoplay = lookup("AUTOTRIS_AUTOPLAY")
            .and_then(|s| parse_flag(&s))
            .unwrap_or(true);

        let fps = lookup("AUTOTRIS_FPS")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&fps: &u32| fps > 0)
            .unwrap_or(DEFAULT_FPS);

        let ai_interval_ms = lookup("AUTOTRIS_AI_INTERVAL_MS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(AI_INTERVAL_MS)
            .max(AI_INTERVAL_MIN_MS);

        let log_path = match lookup("AUTOTRIS_LOG_PATH") {
            Some(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
            None => Some(DEFAULT_LOG_PATH.to_string()),
        };

        let log_level = lookup("AUTOTRIS_LOG_LEVEL")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(LevelFilter::Info);

        Self {
            seed,
            autoplay,
            fps,
            ai_interval_ms,
            log_path,
            log_level,
        }
    }

    pub fn frame_ms(&self) -> u64 {
        (1000 / self.fps.max(1)).max(1) as u64
    }
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
