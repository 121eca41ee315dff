// src/formatting.rs

use crate::core::{ActivityEvent, Alert};
use crate::timestamp::LocalizedTime;

/// The notification service rejects longer subjects.
pub const MAX_SUBJECT_CHARS: usize = 100;

/// A trait for rendering one activity event into a notification.
pub trait AlertFormatter: Send + Sync {
    fn format(&self, event: &ActivityEvent, label: &str, when: &LocalizedTime) -> Alert;
}

/// A formatter producing a plain-text email for subscribers of the topic.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailAlertFormatter;

impl EmailAlertFormatter {
    fn format_subject(&self, event: &ActivityEvent, label: &str) -> String {
        let subject = format!(
            "The \"{}\" was used by root in Account-\"{}\"",
            event.event_name, label
        );
        truncate_chars(&sanitize_subject(&subject), MAX_SUBJECT_CHARS)
    }

    fn format_body(&self, event: &ActivityEvent, label: &str, when: &LocalizedTime) -> String {
        // Serializing a `Value` cannot fail.
        let detail = serde_json::to_string_pretty(&event.raw).unwrap_or_default();

        format!(
            "{} identity in Account-\"{}\" ({}) used \"{}\" at {} on {} in the {} region.\n\nFull Event Detail is given below:\n\n{}",
            event.identity_type,
            label,
            event.account_id,
            event.event_name,
            when.time,
            when.date,
            event.region,
            detail
        )
    }
}

impl AlertFormatter for EmailAlertFormatter {
    fn format(&self, event: &ActivityEvent, label: &str, when: &LocalizedTime) -> Alert {
        Alert {
            subject: self.format_subject(event, label),
            body: self.format_body(event, label, when),
        }
    }
}

/// Replaces line breaks and other control characters with a space.
fn sanitize_subject(subject: &str) -> String {
    subject
        .chars()
        .map(|c| match c {
            '\u{2028}' | '\u{2029}' => ' ',
            c if c.is_control() => ' ',
            c => c,
        })
        .collect()
}

/// Truncates to at most `max` characters, never splitting a character.
fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}
