//! Configuration management for RootWatch
//!
//! This module defines the `Config` struct holding every setting the handler
//! and its host process need. It uses the `figment` crate to layer defaults,
//! an optional `rootwatch.toml` file, environment variables and command-line
//! arguments.

use crate::cli::Cli;
use crate::timestamp::DEFAULT_DISPLAY_TIMEZONE;
use chrono_tz::Tz;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that make the process unable to start.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] figment::Error),
    #[error("no notification topic configured (set ROOTWATCH_TOPIC_ARN or SNS_TOPIC_ARN)")]
    MissingTopic,
    #[error("unknown display timezone {0:?}")]
    UnknownTimezone(String),
}

/// The main configuration struct for the application.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// The logging level for the application.
    pub log_level: String,
    /// The layout of emitted log lines.
    pub log_format: LogFormat,
    /// The notification topic every alert is published to.
    pub topic_arn: String,
    /// IANA name of the zone event times are rendered in.
    pub display_timezone: String,
    /// Overrides the region resolved by the default AWS provider chain.
    #[serde(default)]
    pub aws_region: Option<String>,
    /// Overrides the AWS service endpoints, for local stacks.
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

/// The layout of emitted log lines.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    PlainText,
}

impl Config {
    /// Loads the application configuration.
    ///
    /// Sources are layered in increasing priority: defaults, the TOML file
    /// given on the command line, `SNS_TOPIC_ARN`, `ROOTWATCH_*` variables,
    /// and finally the command-line arguments themselves.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        if let Some(path) = &cli.config {
            figment = figment.merge(Toml::file(path));
        }
        let config: Config = figment
            .merge(Env::raw().only(&["SNS_TOPIC_ARN"]).map(|_| "topic_arn".into()))
            // ROOTWATCH_TOPIC_ARN, when set, replaces SNS_TOPIC_ARN.
            // e.g., ROOTWATCH_DISPLAY_TIMEZONE=Europe/Berlin
            .merge(Env::prefixed("ROOTWATCH_"))
            .merge(cli.clone())
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    /// Checks the settings that have no usable default.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.topic_arn.trim().is_empty() {
            return Err(ConfigError::MissingTopic);
        }
        self.display_tz()?;
        Ok(())
    }

    /// Parses the configured display timezone.
    pub fn display_tz(&self) -> Result<Tz, ConfigError> {
        self.display_timezone
            .parse::<Tz>()
            .map_err(|_| ConfigError::UnknownTimezone(self.display_timezone.clone()))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::PlainText,
            topic_arn: String::new(),
            display_timezone: DEFAULT_DISPLAY_TIMEZONE.name().to_string(),
            aws_region: None,
            endpoint_url: None,
        }
    }
}
