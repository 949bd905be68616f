use std::env;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub window: WindowConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Trailing window length in milliseconds.
    pub window_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default log filter when RUST_LOG is unset.
    pub filter: String,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        Self {
            window: WindowConfig {
                window_ms: env_u64("TAGWINDOW_WINDOW_MS", 60_000),
            },
            log: LogConfig {
                filter: env_or("TAGWINDOW_LOG", "info"),
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: WindowConfig { window_ms: 60_000 },
            log: LogConfig {
                filter: "info".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_is_sixty_seconds() {
        let cfg = Config::default();
        assert_eq!(cfg.window.window_ms, 60_000);
    }
}
