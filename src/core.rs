//! Core domain types and service traits for RootWatch
//!
//! This module defines the activity event the handler receives, the alert it
//! produces, and the trait contracts for the two external collaborators the
//! handler talks to.

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// The identity type the event routing rule is expected to deliver.
pub const ROOT_IDENTITY_TYPE: &str = "Root";

/// Errors that end an invocation before anything is published.
///
/// Both variants are data-contract violations by the upstream event source.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("activity event is missing or has a malformed field: {0}")]
    MissingField(#[source] serde_json::Error),
    #[error("event time {value:?} does not match YYYY-MM-DDTHH:MM:SSZ")]
    InvalidTimestamp { value: String },
}

impl HandlerError {
    /// A short, stable label used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            HandlerError::MissingField(_) => "missing_field",
            HandlerError::InvalidTimestamp { .. } => "invalid_timestamp",
        }
    }
}

/// One security-relevant action performed by the root identity.
///
/// The typed fields are extracted for formatting; `raw` keeps the whole
/// document, field order included, for the alert body.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityEvent {
    pub event_name: String,
    pub identity_type: String,
    pub account_id: String,
    pub region: String,
    pub time: String,
    pub raw: Value,
}

#[derive(Deserialize)]
struct EventEnvelope {
    region: String,
    time: String,
    detail: EventDetail,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventDetail {
    event_name: String,
    user_identity: UserIdentity,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserIdentity {
    #[serde(rename = "type")]
    identity_type: String,
    account_id: String,
}

impl ActivityEvent {
    /// Extracts the required fields from a raw event document.
    pub fn from_value(raw: Value) -> Result<Self, HandlerError> {
        let envelope = EventEnvelope::deserialize(&raw).map_err(HandlerError::MissingField)?;
        Ok(Self {
            event_name: envelope.detail.event_name,
            identity_type: envelope.detail.user_identity.identity_type,
            account_id: envelope.detail.user_identity.account_id,
            region: envelope.region,
            time: envelope.time,
            raw,
        })
    }

    /// Returns true if the acting identity is the account root.
    pub fn is_root(&self) -> bool {
        self.identity_type.eq_ignore_ascii_case(ROOT_IDENTITY_TYPE)
    }
}

/// A formatted notification, ready to be handed to a channel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Alert {
    /// At most 100 characters, no control characters.
    pub subject: String,
    pub body: String,
}

// =============================================================================
// Service Traits
// =============================================================================

/// Looks up account metadata for the account the handler runs in.
#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    /// Returns the configured account aliases, in directory order.
    ///
    /// An empty list is a normal answer, not an error.
    async fn list_account_aliases(&self) -> Result<Vec<String>>;

    /// Returns the numeric id of the account the credentials belong to.
    async fn caller_account_id(&self) -> Result<String>;
}

/// Fans a message out to every subscriber of a target.
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    /// A short name for the channel (e.g., "sns"), used in logs.
    fn name(&self) -> &str;

    /// Publishes an alert to `target`.
    ///
    /// # Returns
    /// * `Ok(message_id)` once the channel has accepted the message
    /// * `Err` on any transport or service error
    async fn publish(&self, target: &str, alert: &Alert) -> Result<String>;
}
