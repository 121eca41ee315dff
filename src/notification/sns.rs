//! A channel that publishes alerts to an SNS topic.

use crate::core::{Alert, NotificationChannel};
use anyhow::Result;
use async_trait::async_trait;
use aws_sdk_sns::error::{DisplayErrorContext, ProvideErrorMetadata};
use tracing::{error, info, instrument};

/// Publishes alerts to an SNS topic, which fans them out to its subscribers.
#[derive(Debug, Clone)]
pub struct SnsChannel {
    client: aws_sdk_sns::Client,
}

impl SnsChannel {
    /// Creates a new `SnsChannel`.
    pub fn new(client: aws_sdk_sns::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl NotificationChannel for SnsChannel {
    fn name(&self) -> &str {
        "sns"
    }

    #[instrument(skip(self, alert), fields(subject = %alert.subject))]
    async fn publish(&self, target: &str, alert: &Alert) -> Result<String> {
        let response = self
            .client
            .publish()
            .topic_arn(target)
            .subject(&alert.subject)
            .message(&alert.body)
            .send()
            .await;

        match response {
            Ok(output) => {
                let message_id = output.message_id().unwrap_or_default().to_string();
                info!(message_id = %message_id, "SNS accepted the alert");
                Ok(message_id)
            }
            Err(e) => {
                error!(
                    code = e.code().unwrap_or("unknown"),
                    error = %DisplayErrorContext(&e),
                    "SNS Publish request failed"
                );
                anyhow::bail!(
                    "SNS Publish to {} failed ({}): {}",
                    target,
                    e.code().unwrap_or("unknown"),
                    DisplayErrorContext(&e)
                );
            }
        }
    }
}
