//! Shared wire types for the polyglot Slack bot.

pub mod events;

pub use events::{InboundEvent, OutboundMessage, SessionType};
