//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults. Unparseable values fall back to the default.

use crate::simulation::TurnPolicy;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    /// Simulated agent turn settings
    pub simulation: SimulationConfig,
    /// Main window settings
    pub window: WindowConfig,
}

/// Simulated agent turn configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Delay before the agent's first reply (in milliseconds)
    pub reply_delay_ms: u64,
    /// Delay between the reply and the tool call (in milliseconds)
    pub tool_call_delay_ms: u64,
    /// Delay between the tool call and its result (in milliseconds)
    pub result_delay_ms: u64,
    /// What happens to in-flight turns when a new message is sent
    pub turn_policy: TurnPolicy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: 800,
            tool_call_delay_ms: 1000,
            result_delay_ms: 1500,
            turn_policy: TurnPolicy::CancelPrevious,
        }
    }
}

impl SimulationConfig {
    /// Reply delay as a `Duration`
    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }

    /// Tool call delay as a `Duration`
    pub fn tool_call_delay(&self) -> Duration {
        Duration::from_millis(self.tool_call_delay_ms)
    }

    /// Result delay as a `Duration`
    pub fn result_delay(&self) -> Duration {
        Duration::from_millis(self.result_delay_ms)
    }
}

/// Main window configuration
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    /// Initial window width in points
    pub width: f32,
    /// Initial window height in points
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 700.0,
        }
    }
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        let simulation = SimulationConfig::default();
        let window = WindowConfig::default();
        Self {
            simulation: SimulationConfig {
                reply_delay_ms: env_or("STUDIO_REPLY_DELAY_MS", simulation.reply_delay_ms),
                tool_call_delay_ms: env_or(
                    "STUDIO_TOOL_CALL_DELAY_MS",
                    simulation.tool_call_delay_ms,
                ),
                result_delay_ms: env_or("STUDIO_RESULT_DELAY_MS", simulation.result_delay_ms),
                turn_policy: env_or("STUDIO_TURN_POLICY", simulation.turn_policy),
            },
            window: WindowConfig {
                width: env_or("STUDIO_WINDOW_WIDTH", window.width),
                height: env_or("STUDIO_WINDOW_HEIGHT", window.height),
            },
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const KEYS: [&str; 6] = [
        "STUDIO_REPLY_DELAY_MS",
        "STUDIO_TOOL_CALL_DELAY_MS",
        "STUDIO_RESULT_DELAY_MS",
        "STUDIO_TURN_POLICY",
        "STUDIO_WINDOW_WIDTH",
        "STUDIO_WINDOW_HEIGHT",
    ];

    fn clear_env() {
        for key in KEYS {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_defaults_without_env() {
        clear_env();
        let config = Config::from_env();
        assert_eq!(config, Config::default());
        assert_eq!(config.simulation.reply_delay(), Duration::from_millis(800));
        assert_eq!(config.simulation.turn_policy, TurnPolicy::CancelPrevious);
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        clear_env();
        env::set_var("STUDIO_REPLY_DELAY_MS", "10");
        env::set_var("STUDIO_TURN_POLICY", "overlap");
        env::set_var("STUDIO_WINDOW_WIDTH", "1280");

        let config = Config::from_env();
        assert_eq!(config.simulation.reply_delay_ms, 10);
        assert_eq!(config.simulation.tool_call_delay_ms, 1000);
        assert_eq!(config.simulation.turn_policy, TurnPolicy::Overlap);
        assert_eq!(config.window.width, 1280.0);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_values_fall_back() {
        clear_env();
        env::set_var("STUDIO_RESULT_DELAY_MS", "soon");
        env::set_var("STUDIO_TURN_POLICY", "sometimes");

        let config = Config::from_env();
        assert_eq!(config.simulation.result_delay_ms, 1500);
        assert_eq!(config.simulation.turn_policy, TurnPolicy::CancelPrevious);
        clear_env();
    }
}
