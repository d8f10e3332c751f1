//! Engine configuration read from the environment.
//!
//! Supported environment variables:
//! - HACK_DURATION_SECS: Estimated duration of a new hack (default 300, must be > 0)
//! - HACK_ENERGY_COST: Energy consumed to initiate a hack (default 10, must be > 0)
//! - HACK_POLL_INTERVAL_MS: Resolution worker tick (default 1000, must be > 0)
//! - ENERGY_REGEN_AMOUNT: Energy restored per regeneration tick (default 5)
//! - COMPUTER_CREATE_ATTEMPTS: Attempts when an IP uniqueness race is lost (default 3, must be > 0)
//!
//! Values that do not parse, or fall outside their range, are ignored with a warning.

use std::time::Duration;

pub const DEFAULT_HACK_DURATION_SECS: u32 = 300;
pub const DEFAULT_HACK_ENERGY_COST: u32 = 10;
pub const DEFAULT_HACK_POLL_INTERVAL_MS: u64 = 1000;
pub const DEFAULT_ENERGY_REGEN_AMOUNT: u32 = 5;
pub const DEFAULT_COMPUTER_CREATE_ATTEMPTS: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub hack_duration_secs: u32,
    pub hack_energy_cost: u32,
    pub hack_poll_interval: Duration,
    pub energy_regen_amount: u32,
    pub computer_create_attempts: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hack_duration_secs: DEFAULT_HACK_DURATION_SECS,
            hack_energy_cost: DEFAULT_HACK_ENERGY_COST,
            hack_poll_interval: Duration::from_millis(DEFAULT_HACK_POLL_INTERVAL_MS),
            energy_regen_amount: DEFAULT_ENERGY_REGEN_AMOUNT,
            computer_create_attempts: DEFAULT_COMPUTER_CREATE_ATTEMPTS,
        }
    }
}

impl EngineConfig {
    /// Defaults with environment variable overrides applied.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`EngineConfig::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            hack_duration_secs: read_var(
                &lookup,
                "HACK_DURATION_SECS",
                defaults.hack_duration_secs,
                |v| *v > 0,
            ),
            hack_energy_cost: read_var(
                &lookup,
                "HACK_ENERGY_COST",
                defaults.hack_energy_cost,
                |v| *v > 0,
            ),
            hack_poll_interval: Duration::from_millis(read_var(
                &lookup,
                "HACK_POLL_INTERVAL_MS",
                DEFAULT_HACK_POLL_INTERVAL_MS,
                |v| *v > 0,
            )),
            energy_regen_amount: read_var(
                &lookup,
                "ENERGY_REGEN_AMOUNT",
                defaults.energy_regen_amount,
                |_| true,
            ),
            computer_create_attempts: read_var(
                &lookup,
                "COMPUTER_CREATE_ATTEMPTS",
                defaults.computer_create_attempts,
                |v| *v > 0,
            ),
        }
    }
}

fn read_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
    in_range: impl Fn(&T) -> bool,
) -> T
where
    T: std::str::FromStr + std::fmt::Display + Copy,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse::<T>() {
        Ok(value) if in_range(&value) => {
            tracing::info!(key, %value, "Applied environment override");
            value
        }
        Ok(value) => {
            tracing::warn!(key, %value, %default, "Value out of range, using default");
            default
        }
        Err(_) => {
            tracing::warn!(key, val = %raw, %default, "Value is not a valid number, using default");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn missing_vars_use_defaults() {
        let config = EngineConfig::from_lookup(lookup(&[]));
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.hack_duration_secs, 300);
        assert_eq!(config.hack_poll_interval, Duration::from_secs(1));
    }

    #[test]
    fn valid_overrides_apply() {
        let config = EngineConfig::from_lookup(lookup(&[
            ("HACK_DURATION_SECS", "60"),
            ("HACK_ENERGY_COST", " 25 "),
            ("HACK_POLL_INTERVAL_MS", "250"),
            ("ENERGY_REGEN_AMOUNT", "0"),
            ("COMPUTER_CREATE_ATTEMPTS", "5"),
        ]));

        assert_eq!(config.hack_duration_secs, 60);
        assert_eq!(config.hack_energy_cost, 25);
        assert_eq!(config.hack_poll_interval, Duration::from_millis(250));
        assert_eq!(config.energy_regen_amount, 0);
        assert_eq!(config.computer_create_attempts, 5);
    }

    #[test]
    fn garbage_and_out_of_range_fall_back() {
        let config = EngineConfig::from_lookup(lookup(&[
            ("HACK_DURATION_SECS", "0"),
            ("HACK_ENERGY_COST", "-3"),
            ("COMPUTER_CREATE_ATTEMPTS", "lots"),
        ]));

        assert_eq!(config.hack_duration_secs, DEFAULT_HACK_DURATION_SECS);
        assert_eq!(config.hack_energy_cost, DEFAULT_HACK_ENERGY_COST);
        assert_eq!(config.computer_create_attempts, DEFAULT_COMPUTER_CREATE_ATTEMPTS);
    }
}
