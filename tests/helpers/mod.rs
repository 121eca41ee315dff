#![allow(dead_code)]
pub mod recording_channel;

use rootwatch::formatting::EmailAlertFormatter;
use rootwatch::timestamp::DEFAULT_DISPLAY_TIMEZONE;
use rootwatch::NotificationHandler;
use serde_json::{json, Value};
use std::sync::Arc;

use fake_directory::FakeDirectory;
use recording_channel::RecordingChannel;

pub const TEST_TOPIC_ARN: &str = "arn:aws:sns:eu-west-2:123456789012:root-activity";

/// Creates a handler wired to the given fakes with the default display zone.
pub fn create_test_handler(
    directory: Arc<FakeDirectory>,
    channel: Arc<RecordingChannel>,
) -> NotificationHandler {
    NotificationHandler::new(
        directory,
        channel,
        Box::new(EmailAlertFormatter),
        TEST_TOPIC_ARN.to_string(),
        DEFAULT_DISPLAY_TIMEZONE,
    )
}

/// A console sign-in by root, shaped like an EventBridge CloudTrail event.
pub fn console_login_event(time: &str) -> Value {
    json!({
        "version": "0",
        "id": "6f87d04b-9f74-4f04-a780-7acf4b0a9b38",
        "detail-type": "AWS Console Sign In via CloudTrail",
        "source": "aws.signin",
        "account": "123456789012",
        "time": time,
        "region": "us-east-1",
        "resources": [],
        "detail": {
            "eventVersion": "1.08",
            "userIdentity": {
                "type": "Root",
                "principalId": "123456789012",
                "arn": "arn:aws:iam::123456789012:root",
                "accountId": "123456789012"
            },
            "eventTime": time,
            "eventSource": "signin.amazonaws.com",
            "eventName": "ConsoleLogin",
            "awsRegion": "us-east-1",
            "sourceIPAddress": "203.0.113.7",
            "responseElements": { "ConsoleLogin": "Success" },
            "additionalEventData": {
                "LoginTo": "https://console.aws.amazon.com/console/home",
                "MobileVersion": "No",
                "MFAUsed": "Yes"
            }
        }
    })
}
