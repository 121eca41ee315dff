//! Encapsulation for setting up external services.

use crate::{
    config::Config,
    core::{IdentityDirectory, NotificationChannel},
    directory::AwsIdentityDirectory,
    formatting::EmailAlertFormatter,
    handler::NotificationHandler,
    notification::SnsChannel,
};
use anyhow::Result;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use std::sync::Arc;
use tracing::info;

/// The collaborators a handler is built from, shared for the process lifetime.
pub struct Services {
    pub directory: Arc<dyn IdentityDirectory>,
    pub channel: Arc<dyn NotificationChannel>,
}

/// Loads the shared AWS configuration, applying any configured overrides.
pub async fn load_aws_config(config: &Config) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = &config.aws_region {
        loader = loader.region(Region::new(region.clone()));
    }
    if let Some(endpoint) = &config.endpoint_url {
        info!(endpoint = %endpoint, "Using AWS endpoint override");
        loader = loader.endpoint_url(endpoint.clone());
    }
    loader.load().await
}

/// Creates the IAM, STS and SNS backed collaborators.
pub fn setup_aws_services(sdk_config: &SdkConfig) -> Services {
    let directory = AwsIdentityDirectory::new(
        aws_sdk_iam::Client::new(sdk_config),
        aws_sdk_sts::Client::new(sdk_config),
    );
    let channel = SnsChannel::new(aws_sdk_sns::Client::new(sdk_config));

    Services {
        directory: Arc::new(directory),
        channel: Arc::new(channel),
    }
}

/// Wires a `NotificationHandler` for the configured topic and display zone.
pub fn build_handler(config: &Config, services: &Services) -> Result<NotificationHandler> {
    let display_tz = config.display_tz()?;
    Ok(NotificationHandler::new(
        services.directory.clone(),
        services.channel.clone(),
        Box::new(EmailAlertFormatter),
        config.topic_arn.clone(),
        display_tz,
    ))
}
