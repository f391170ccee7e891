//! Protocol types module containing message and type definitions.
//!
//! This module defines the wire envelope exchanged between agents and the
//! relay. Every payload is a flat JSON object with a `type` tag at the top
//! level; `id` and `timestamp` are filled in by the sender when absent.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use uuid::Uuid;

/// Wire tags for messages exchanged with the relay.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    /// Handshake sent immediately after the transport connects
    AgentConnect,
    /// Goodbye sent before closing the transport
    AgentDisconnect,
    /// A single observation made during exploration
    AgentObservation,
    /// Complete results of an exploration run
    ExplorationResult,
    /// Periodic liveness message
    Heartbeat,
    /// Any tag not defined by the protocol, preserved verbatim so callers
    /// can register handlers for their own inbound types
    #[serde(untagged)]
    Other(String),
}

impl MessageType {
    /// Returns the snake_case wire form of the tag.
    pub fn as_str(&self) -> &str {
        match self {
            MessageType::AgentConnect => "agent_connect",
            MessageType::AgentDisconnect => "agent_disconnect",
            MessageType::AgentObservation => "agent_observation",
            MessageType::ExplorationResult => "exploration_result",
            MessageType::Heartbeat => "heartbeat",
            MessageType::Other(tag) => tag,
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Core message envelope used on the wire.
///
/// Payload keys beyond `type`, `id` and `timestamp` are carried in a
/// flattened map, so arbitrary caller-defined fields survive a round trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Type tag of the message
    #[serde(rename = "type")]
    pub message_type: MessageType,
    /// Unique message identifier, assigned at send time if missing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// ISO-8601 creation timestamp, assigned at send time if missing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Remaining payload fields
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl Message {
    /// Creates an empty message with the given type tag.
    pub fn new(message_type: MessageType) -> Self {
        Self {
            message_type,
            id: None,
            timestamp: None,
            payload: Map::new(),
        }
    }

    /// Adds a payload field to the message.
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.payload.insert(key.into(), value);
        self
    }

    /// Returns a payload field by key.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }

    /// Fills in `id` and `timestamp` when absent. Called once at send time.
    pub fn fill_defaults(&mut self) {
        if self.id.is_none() {
            self.id = Some(Uuid::new_v4().to_string());
        }
        if self.timestamp.is_none() {
            self.timestamp = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_type_tags_are_snake_case() {
        let tag = serde_json::to_value(&MessageType::AgentObservation).unwrap();
        assert_eq!(tag, json!("agent_observation"));

        let tag: MessageType = serde_json::from_value(json!("heartbeat")).unwrap();
        assert_eq!(tag, MessageType::Heartbeat);
    }

    #[test]
    fn test_unknown_tag_is_preserved() {
        let tag: MessageType = serde_json::from_value(json!("command")).unwrap();
        assert_eq!(tag, MessageType::Other("command".to_string()));
        assert_eq!(serde_json::to_value(&tag).unwrap(), json!("command"));
    }

    #[test]
    fn test_payload_fields_are_flattened() {
        let msg = Message::new(MessageType::AgentObservation)
            .with_field("agent_id", json!("agent1"))
            .with_field("observation", json!({"category": "electronics"}));

        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["type"], json!("agent_observation"));
        assert_eq!(value["agent_id"], json!("agent1"));
        assert_eq!(value["observation"]["category"], json!("electronics"));
        assert!(value.get("id").is_none());

        let parsed: Message = serde_json::from_value(value).unwrap();
        assert_eq!(parsed.message_type, MessageType::AgentObservation);
        assert_eq!(parsed.field("agent_id"), Some(&json!("agent1")));
    }

    #[test]
    fn test_fill_defaults_generates_distinct_ids() {
        let mut first = Message::new(MessageType::Heartbeat);
        let mut second = Message::new(MessageType::Heartbeat);
        first.fill_defaults();
        second.fill_defaults();

        assert!(first.id.is_some());
        assert!(first.timestamp.is_some());
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_fill_defaults_keeps_existing_values() {
        let mut msg = Message::new(MessageType::Heartbeat);
        msg.id = Some("fixed-id".to_string());
        msg.fill_defaults();

        assert_eq!(msg.id.as_deref(), Some("fixed-id"));
        assert!(msg.timestamp.is_some());
    }
}
