//! Dispatcher configuration

use thiserror::Error;

/// Default number of envelopes buffered per subscriber
pub const DEFAULT_SUBSCRIBER_CAPACITY: usize = 10;

/// Default capacity of the upstream frame channel
pub const DEFAULT_FRAME_BUFFER: usize = 256;

pub const ENV_SUBSCRIBER_CAPACITY: &str = "FLIGHTPATH_SUBSCRIBER_CAPACITY";
pub const ENV_FRAME_BUFFER: &str = "FLIGHTPATH_FRAME_BUFFER";

/// Error type for configuration loading
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{key}: invalid value {value:?}")]
    Invalid { key: &'static str, value: String },

    #[error("{key}: must be greater than zero")]
    Zero { key: &'static str },
}

/// Dispatcher configuration options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatcherConfig {
    /// Envelopes buffered per subscriber before new ones are dropped
    pub subscriber_capacity: usize,

    /// Capacity of the channel created by [`frame_channel`](crate::protocol::frame_channel)
    pub frame_buffer: usize,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            subscriber_capacity: DEFAULT_SUBSCRIBER_CAPACITY,
            frame_buffer: DEFAULT_FRAME_BUFFER,
        }
    }
}

impl DispatcherConfig {
    /// Load from the process environment, falling back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` to resolve variable names
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_SUBSCRIBER_CAPACITY) {
            config.subscriber_capacity = parse_positive(ENV_SUBSCRIBER_CAPACITY, &value)?;
        }
        if let Some(value) = lookup(ENV_FRAME_BUFFER) {
            config.frame_buffer = parse_positive(ENV_FRAME_BUFFER, &value)?;
        }

        Ok(config)
    }

    /// Set the per-subscriber queue capacity (minimum 1)
    pub fn subscriber_capacity(mut self, capacity: usize) -> Self {
        self.subscriber_capacity = capacity.max(1);
        self
    }

    /// Set the upstream frame channel capacity (minimum 1)
    pub fn frame_buffer(mut self, capacity: usize) -> Self {
        self.frame_buffer = capacity.max(1);
        self
    }
}

fn parse_positive(key: &'static str, value: &str) -> Result<usize, ConfigError> {
    let parsed: usize = value.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: value.to_string(),
    })?;

    if parsed == 0 {
        return Err(ConfigError::Zero { key });
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = DispatcherConfig::default();

        assert_eq!(config.subscriber_capacity, 10);
        assert_eq!(config.frame_buffer, DEFAULT_FRAME_BUFFER);
    }

    #[test]
    fn test_builder_subscriber_capacity() {
        let config = DispatcherConfig::default().subscriber_capacity(64);

        assert_eq!(config.subscriber_capacity, 64);
    }

    #[test]
    fn test_builder_subscriber_capacity_minimum() {
        let config = DispatcherConfig::default().subscriber_capacity(0);

        assert_eq!(config.subscriber_capacity, 1);
    }

    #[test]
    fn test_builder_chaining() {
        let config = DispatcherConfig::default()
            .subscriber_capacity(4)
            .frame_buffer(32);

        assert_eq!(config.subscriber_capacity, 4);
        assert_eq!(config.frame_buffer, 32);
    }

    #[test]
    fn test_lookup_empty_uses_defaults() {
        let config = DispatcherConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config, DispatcherConfig::default());
    }

    #[test]
    fn test_lookup_overrides() {
        let config = DispatcherConfig::from_lookup(lookup(&[
            (ENV_SUBSCRIBER_CAPACITY, "25"),
            (ENV_FRAME_BUFFER, " 1024 "),
        ]))
        .unwrap();

        assert_eq!(config.subscriber_capacity, 25);
        assert_eq!(config.frame_buffer, 1024);
    }

    #[test]
    fn test_lookup_rejects_garbage() {
        let err = DispatcherConfig::from_lookup(lookup(&[(ENV_FRAME_BUFFER, "lots")])).unwrap_err();

        assert_eq!(
            err,
            ConfigError::Invalid {
                key: ENV_FRAME_BUFFER,
                value: "lots".to_string()
            }
        );
        assert_eq!(
            err.to_string(),
            "FLIGHTPATH_FRAME_BUFFER: invalid value \"lots\""
        );
    }

    #[test]
    fn test_lookup_rejects_zero() {
        let err =
            DispatcherConfig::from_lookup(lookup(&[(ENV_SUBSCRIBER_CAPACITY, "0")])).unwrap_err();

        assert_eq!(
            err,
            ConfigError::Zero {
                key: ENV_SUBSCRIBER_CAPACITY
            }
        );
    }
}
