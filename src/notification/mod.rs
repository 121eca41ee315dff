//! Delivery of formatted alerts to the notification channel.
//!
//! The handler only sees the `NotificationChannel` trait; this module holds
//! the concrete channel backed by a fan-out topic.
pub mod sns;

pub use sns::SnsChannel;
