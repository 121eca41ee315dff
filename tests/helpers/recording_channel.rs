//! A notification channel that records what it was asked to publish.

use anyhow::Result;
use async_trait::async_trait;
use rootwatch::core::{Alert, NotificationChannel};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct RecordingChannel {
    published: Mutex<Vec<(String, Alert)>>,
    fail: AtomicBool,
}

impl RecordingChannel {
    pub fn failing() -> Self {
        let channel = Self::default();
        channel.fail.store(true, Ordering::SeqCst);
        channel
    }

    /// Every publish attempt, including the ones that were made to fail.
    pub fn published(&self) -> Vec<(String, Alert)> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationChannel for RecordingChannel {
    fn name(&self) -> &str {
        "recording_mock"
    }

    async fn publish(&self, target: &str, alert: &Alert) -> Result<String> {
        self.published
            .lock()
            .unwrap()
            .push((target.to_string(), alert.clone()));
        if self.fail.load(Ordering::SeqCst) {
            anyhow::bail!("Throttled: rate exceeded");
        }
        Ok(format!("msg-{}", self.published.lock().unwrap().len()))
    }
}
