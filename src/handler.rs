//! The notification handler: one activity event in, at most one alert out.

use crate::core::{ActivityEvent, HandlerError, IdentityDirectory, NotificationChannel};
use crate::directory::{resolve_label, LabelResolution};
use crate::formatting::AlertFormatter;
use crate::timestamp;
use chrono_tz::Tz;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// What a single invocation ended up doing.
#[derive(Debug)]
pub enum InvocationOutcome {
    /// The channel accepted the alert.
    Published { message_id: String },
    /// The alert was built but the channel refused it. Logged, not retried.
    PublishFailed,
    /// The event broke the input contract; nothing was published.
    Rejected(HandlerError),
}

impl InvocationOutcome {
    pub fn is_published(&self) -> bool {
        matches!(self, InvocationOutcome::Published { .. })
    }
}

/// Formats and publishes an alert for each root activity event it is given.
///
/// Collaborators are created once per process and shared by all
/// invocations; the handler itself holds no per-event state.
pub struct NotificationHandler {
    directory: Arc<dyn IdentityDirectory>,
    channel: Arc<dyn NotificationChannel>,
    formatter: Box<dyn AlertFormatter>,
    topic: String,
    display_tz: Tz,
}

impl NotificationHandler {
    /// Creates a new `NotificationHandler`.
    ///
    /// # Arguments
    /// * `topic` - The channel target every alert is published to.
    /// * `display_tz` - The zone event times are rendered in.
    pub fn new(
        directory: Arc<dyn IdentityDirectory>,
        channel: Arc<dyn NotificationChannel>,
        formatter: Box<dyn AlertFormatter>,
        topic: String,
        display_tz: Tz,
    ) -> Self {
        Self {
            directory,
            channel,
            formatter,
            topic,
            display_tz,
        }
    }

    /// Handles one raw activity event. Never returns an error to the caller.
    #[instrument(skip_all)]
    pub async fn handle(&self, payload: Value) -> InvocationOutcome {
        let event = match ActivityEvent::from_value(payload) {
            Ok(event) => event,
            Err(e) => return reject(e),
        };
        debug!(
            event_name = %event.event_name,
            identity_type = %event.identity_type,
            account_id = %event.account_id,
            region = %event.region,
            time = %event.time,
            "Extracted activity event fields"
        );

        if !event.is_root() {
            warn!(
                identity_type = %event.identity_type,
                event_name = %event.event_name,
                "Event routed to the root alert handler was not performed by root"
            );
        }

        let when = match timestamp::localize(&event.time, self.display_tz) {
            Ok(when) => when,
            Err(e) => return reject(e),
        };

        let resolution = resolve_label(self.directory.as_ref(), &event.account_id).await;
        let resolved_from_directory = matches!(resolution, LabelResolution::Resolved(_));
        let label = resolution.into_label();

        let alert = self.formatter.format(&event, &label, &when);
        debug!(
            subject = %alert.subject,
            body_len = alert.body.len(),
            "Built alert"
        );

        match self.channel.publish(&self.topic, &alert).await {
            Ok(message_id) => {
                info!(
                    event_name = %event.event_name,
                    account_id = %event.account_id,
                    label = %label,
                    alias = resolved_from_directory,
                    channel = self.channel.name(),
                    message_id = %message_id,
                    "Published root activity alert"
                );
                InvocationOutcome::Published { message_id }
            }
            Err(e) => {
                let reason = format!("{e:#}");
                error!(
                    event_name = %event.event_name,
                    account_id = %event.account_id,
                    label = %label,
                    channel = self.channel.name(),
                    error_kind = "channel_unavailable",
                    error = %reason,
                    "Failed to publish root activity alert"
                );
                InvocationOutcome::PublishFailed
            }
        }
    }
}

fn reject(e: HandlerError) -> InvocationOutcome {
    error!(
        error_kind = "contract_violation",
        violation = e.kind(),
        error = %e,
        "Rejected activity event, no alert published"
    );
    InvocationOutcome::Rejected(e)
}
