//! Serde schema for the ChatGPT export's `conversations.json`.
//!
//! The document is a JSON array of conversations; each conversation
//! carries its messages as a `mapping` of node id to tree node. Nodes
//! are kept as raw JSON in [`ConversationRecord`] and decoded one at a
//! time, so one malformed message never poisons the whole document.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// One exported conversation.
#[derive(Deserialize, Debug)]
pub struct ConversationRecord {
    pub id: Option<String>,
    pub title: Option<String>,
    /// Conversation creation time, epoch seconds. Used as a fallback
    /// timestamp for messages that carry none of their own.
    pub create_time: Option<f64>,
    #[serde(default)]
    pub mapping: HashMap<String, Value>,
}

/// One node of the conversation message tree.
#[derive(Deserialize, Debug)]
pub struct MappingNode {
    /// Structural nodes (the tree root) carry no message.
    pub message: Option<MessageNode>,
    #[allow(dead_code)]
    pub parent: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct MessageNode {
    pub id: Option<String>,
    pub author: Option<MessageAuthor>,
    /// Message creation time, epoch seconds.
    pub create_time: Option<f64>,
    pub content: Option<MessageContent>,
    #[serde(default)]
    pub metadata: Value,
}

#[derive(Deserialize, Debug)]
pub struct MessageAuthor {
    pub role: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct MessageContent {
    pub content_type: Option<String>,
    /// Text messages carry their body as a list of string parts.
    /// Non-text parts (images, attachments) appear as objects and are
    /// ignored for token counting.
    #[serde(default)]
    pub parts: Vec<Value>,
}

impl MessageContent {
    /// Concatenated text of all string parts, or `None` when the
    /// content carries no usable text.
    pub fn text(&self) -> Option<String> {
        let parts: Vec<&str> = self
            .parts
            .iter()
            .filter_map(|part| part.as_str())
            .filter(|text| !text.trim().is_empty())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join("\n"))
        }
    }
}

impl MessageNode {
    /// `model_slug` from the message metadata, present on assistant
    /// messages in real exports.
    pub fn model_slug(&self) -> &str {
        self.metadata
            .get("model_slug")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown_model")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn content_text_joins_string_parts() {
        let content: MessageContent =
            serde_json::from_value(json!({ "content_type": "text", "parts": ["one", "two"] }))
                .unwrap();
        assert_eq!(content.text().as_deref(), Some("one\ntwo"));
    }

    #[test]
    fn content_text_skips_non_string_parts() {
        let content: MessageContent = serde_json::from_value(json!({
            "content_type": "multimodal_text",
            "parts": [{ "asset_pointer": "file-service://abc" }, "caption"]
        }))
        .unwrap();
        assert_eq!(content.text().as_deref(), Some("caption"));
    }

    #[test]
    fn content_text_empty_parts_is_none() {
        let content: MessageContent =
            serde_json::from_value(json!({ "content_type": "text", "parts": ["", "   "] }))
                .unwrap();
        assert!(content.text().is_none());
    }

    #[test]
    fn model_slug_fallback() {
        let node: MessageNode = serde_json::from_value(json!({
            "id": "msg-1",
            "author": { "role": "assistant" },
            "create_time": 1700000000.0,
            "content": { "content_type": "text", "parts": ["hi"] }
        }))
        .unwrap();
        assert_eq!(node.model_slug(), "unknown_model");
    }
}
