//! Command-Line Interface (CLI) argument parsing.
//!
//! This module defines the command-line arguments for the `rootwatch` binary
//! using the `clap` crate. These arguments are parsed at startup and then
//! merged with the configuration from the `rootwatch.toml` file and
//! environment variables.

use clap::Parser;
use figment::{
    value::{Dict, Map, Value},
    Error, Metadata, Profile, Provider,
};
use std::path::PathBuf;

/// Sends an email alert for one root account activity event.
#[derive(Parser, Debug, Default, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to the activity event JSON document. Reads stdin when absent.
    #[arg(short, long, value_name = "FILE")]
    pub event: Option<PathBuf>,

    /// The notification topic to publish the alert to.
    #[arg(long, value_name = "ARN")]
    pub topic_arn: Option<String>,

    /// IANA timezone used to display the event time.
    #[arg(long, value_name = "TZ")]
    pub display_timezone: Option<String>,

    /// The logging level (e.g., "debug").
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

impl Provider for Cli {
    fn metadata(&self) -> Metadata {
        Metadata::named("Command-Line Arguments")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let mut dict = Dict::new();

        if let Some(topic) = &self.topic_arn {
            dict.insert("topic_arn".into(), Value::from(topic.clone()));
        }

        if let Some(tz) = &self.display_timezone {
            dict.insert("display_timezone".into(), Value::from(tz.clone()));
        }

        if let Some(level) = &self.log_level {
            dict.insert("log_level".into(), Value::from(level.clone()));
        }

        let mut map = Map::new();
        map.insert(Profile::Default, dict);
        Ok(map)
    }
}
