//! Playback configuration.
//!
//! Reads from the environment:
//! - `ALGOTRACE_SPEED_MS`: delay between auto-advanced steps in milliseconds
//!   (default: 500)

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Environment variable holding the default step delay in milliseconds.
pub const SPEED_ENV: &str = "ALGOTRACE_SPEED_MS";

/// Step delay and the range it is clamped into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Delay between two auto-advanced steps.
    pub speed: Duration,
    pub min_speed: Duration,
    pub max_speed: Duration,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        PlaybackConfig {
            speed: Duration::from_millis(500),
            min_speed: Duration::from_millis(10),
            max_speed: Duration::from_secs(10),
        }
    }
}

impl PlaybackConfig {
    /// Defaults, with `speed` taken from `ALGOTRACE_SPEED_MS` when it is set
    /// and parses as milliseconds.
    pub fn from_env() -> Self {
        let config = PlaybackConfig::default();
        match std::env::var(SPEED_ENV) {
            Ok(raw) => config.with_speed_str(&raw),
            Err(_) => config,
        }
    }

    fn with_speed_str(self, raw: &str) -> Self {
        match raw.trim().parse::<u64>() {
            Ok(ms) => self.with_speed(Duration::from_millis(ms)),
            Err(_) => {
                tracing::warn!(value = raw, "ignoring unparsable {}", SPEED_ENV);
                self
            }
        }
    }

    /// Replaces the speed, clamped into `min_speed..=max_speed`.
    pub fn with_speed(mut self, speed: Duration) -> Self {
        self.speed = self.clamp(speed);
        self
    }

    /// Clamps `speed` into the configured range. Inverted bounds are read
    /// as the range between them.
    pub fn clamp(&self, speed: Duration) -> Duration {
        let lo = self.min_speed.min(self.max_speed);
        let hi = self.min_speed.max(self.max_speed);
        speed.max(lo).min(hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = PlaybackConfig::default();
        assert_eq!(config.speed, Duration::from_millis(500));
        assert!(config.min_speed < config.speed && config.speed < config.max_speed);
    }

    #[test]
    fn speed_is_clamped() {
        let config = PlaybackConfig::default();
        assert_eq!(
            config.with_speed(Duration::ZERO).speed,
            Duration::from_millis(10)
        );
        assert_eq!(
            config.with_speed(Duration::from_secs(60)).speed,
            Duration::from_secs(10)
        );
    }

    #[test]
    fn inverted_bounds_do_not_panic() {
        let config = PlaybackConfig {
            speed: Duration::from_millis(500),
            min_speed: Duration::from_secs(5),
            max_speed: Duration::from_secs(1),
        };
        assert_eq!(
            config.with_speed(Duration::from_millis(100)).speed,
            Duration::from_secs(1)
        );
        assert_eq!(
            config.with_speed(Duration::from_secs(60)).speed,
            Duration::from_secs(5)
        );
        assert_eq!(
            config.with_speed(Duration::from_secs(3)).speed,
            Duration::from_secs(3)
        );
    }

    #[test]
    fn parses_milliseconds() {
        let config = PlaybackConfig::default().with_speed_str(" 250 ");
        assert_eq!(config.speed, Duration::from_millis(250));
    }

    #[test]
    fn bad_value_keeps_default() {
        let config = PlaybackConfig::default().with_speed_str("fast");
        assert_eq!(config, PlaybackConfig::default());
    }
}
