/// RootWatch - Email alerts for cloud account root activity
///
/// This library provides the notification handler that turns one root
/// activity event into a localized alert, together with the AWS-backed
/// identity directory and notification channel it runs against.
pub mod cli;
pub mod config;
pub mod core;
pub mod directory;
pub mod formatting;
pub mod handler;
pub mod notification;
pub mod services;
pub mod timestamp;

// Re-export core types for convenience
pub use crate::core::*;
pub use handler::{InvocationOutcome, NotificationHandler};
