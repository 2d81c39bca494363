//! Configuration validation.

use std::collections::HashSet;

use super::error::{ConfigError, ConfigResult};
use super::schema::{LogOutput, SwitchboardConfig};

/// Validates a loaded configuration.
///
/// Validation failures are configuration-time defects: the process must
/// refuse to start rather than consume with a broken routing table.
pub fn validate_config(config: &SwitchboardConfig) -> ConfigResult<()> {
    validate_logging(config)?;
    validate_broker(config)?;
    Ok(())
}

fn validate_logging(config: &SwitchboardConfig) -> ConfigResult<()> {
    if config.logging.output == LogOutput::File && config.logging.file_path.is_none() {
        return Err(ConfigError::validation(
            "logging.output is 'file' but logging.file_path is not set",
        ));
    }
    Ok(())
}

fn validate_broker(config: &SwitchboardConfig) -> ConfigResult<()> {
    let mut seen = HashSet::new();
    for sub in &config.broker.subscriptions {
        if sub.topic.trim().is_empty() {
            return Err(ConfigError::validation("subscription with empty topic"));
        }
        if sub.kind.trim().is_empty() {
            return Err(ConfigError::validation(format!(
                "subscription for topic '{}' has an empty kind",
                sub.topic
            )));
        }
        if !seen.insert((sub.topic.as_str(), sub.kind.as_str())) {
            return Err(ConfigError::DuplicateSubscription {
                topic: sub.topic.clone(),
                kind: sub.kind.clone(),
            });
        }
    }

    if !config.broker.subscriptions.is_empty() && config.broker.servers.is_empty() {
        return Err(ConfigError::validation(
            "broker.subscriptions declared but broker.servers is empty",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::SubscriptionConfig;

    fn config_with_subscription() -> SwitchboardConfig {
        let mut config = SwitchboardConfig::default();
        config.broker.servers = vec!["localhost:9092".into()];
        config.broker.subscriptions = vec![SubscriptionConfig {
            topic: "logger.sensor.ts".into(),
            kind: "SensorBatch".into(),
        }];
        config
    }

    #[test]
    fn default_config_is_valid() {
        validate_config(&SwitchboardConfig::default()).unwrap();
    }

    #[test]
    fn subscription_config_is_valid() {
        validate_config(&config_with_subscription()).unwrap();
    }

    #[test]
    fn duplicate_subscription_is_rejected() {
        let mut config = config_with_subscription();
        let dup = config.broker.subscriptions[0].clone();
        config.broker.subscriptions.push(dup);

        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateSubscription { .. }));
    }

    #[test]
    fn subscriptions_require_servers() {
        let mut config = config_with_subscription();
        config.broker.servers.clear();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn file_output_requires_path() {
        let mut config = SwitchboardConfig::default();
        config.logging.output = LogOutput::File;
        assert!(validate_config(&config).is_err());
    }
}
