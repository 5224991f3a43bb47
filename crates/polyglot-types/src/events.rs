use serde::{Deserialize, Serialize};
use serde_json::Value;

// ── Primitives ───────────────────────────────────────────────────────────────

/// Where a message event originated, derived from Slack's `channel_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionType {
    /// One-to-one IM with the bot (`channel_type: "im"`).
    Direct,
    /// Group DM (`channel_type: "mpim"`).
    Group,
    /// Regular public or private channel.
    Channel,
}

impl SessionType {
    pub fn from_channel_type(channel_type: Option<&str>) -> Self {
        match channel_type {
            Some("im") => SessionType::Direct,
            Some("mpim") => SessionType::Group,
            _ => SessionType::Channel,
        }
    }
}

// ── Inbound events ───────────────────────────────────────────────────────────

/// A normalized Slack event, extracted from the Events API `event` object.
///
/// Only the two event kinds the bot reacts to are represented; everything
/// else maps to `None` at extraction time. Instances live for the duration
/// of one webhook callback and are never retained.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    /// The bot was @-mentioned in a channel (`app_mention`).
    Mention { user: String, channel: String },
    /// A message was posted somewhere the bot can see (`message`).
    Message {
        user: String,
        channel: String,
        text: String,
        session_type: SessionType,
        /// True when the message came from a bot (our own replies included):
        /// the event carries a `bot_id` or has subtype `bot_message`.
        from_bot: bool,
    },
}

impl InboundEvent {
    /// Extract a normalized event from the Events API inner `event` object.
    ///
    /// Missing string fields become empty strings rather than failures:
    /// Slack's payloads vary by subtype and the classifier treats blank
    /// fields as ignorable.
    pub fn from_event_json(event: &Value) -> Option<InboundEvent> {
        let str_field = |key: &str| {
            event[key]
                .as_str()
                .map(str::to_string)
                .unwrap_or_default()
        };

        match event["type"].as_str() {
            Some("app_mention") => Some(InboundEvent::Mention {
                user: str_field("user"),
                channel: str_field("channel"),
            }),
            Some("message") => {
                let from_bot = event["bot_id"].is_string()
                    || event["subtype"].as_str() == Some("bot_message");
                Some(InboundEvent::Message {
                    user: str_field("user"),
                    channel: str_field("channel"),
                    text: str_field("text"),
                    session_type: SessionType::from_channel_type(
                        event["channel_type"].as_str(),
                    ),
                    from_bot,
                })
            }
            _ => None,
        }
    }
}

// ── Outbound messages ────────────────────────────────────────────────────────

/// A reply to be posted via `chat.postMessage`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub channel: String,
    pub text: String,
}
