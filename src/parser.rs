//! Parsing of the extracted `conversations.json` into flat message
//! records.
//!
//! The top-level document must be a valid conversation list; anything
//! else is a [`ParseError`] and aborts the run. Individual message
//! nodes are decoded one at a time, so a single malformed message is
//! skipped with a warning instead of failing the whole export.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::error::ParseError;
use crate::models::{ConversationRecord, MappingNode, MessageRecord, Role};

/// Result of one parse pass over the conversation log.
#[derive(Debug)]
pub struct ParseOutcome {
    /// Flattened messages, sorted ascending by timestamp.
    pub records: Vec<MessageRecord>,
    pub conversations: usize,
    /// Message nodes dropped for missing role, timestamp, or text.
    pub skipped: usize,
}

/// Load the conversation log at `path` and flatten every conversation
/// into message records.
pub fn parse_export(path: &Path) -> Result<ParseOutcome, ParseError> {
    let raw = fs::read_to_string(path).map_err(|source| ParseError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let conversations: Vec<ConversationRecord> = serde_json::from_str(&raw)?;

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for conversation in &conversations {
        flatten_conversation(conversation, &mut records, &mut skipped);
    }

    // The mapping is a tree keyed by node id; iteration order is
    // arbitrary, so restore the by-creation invariant here.
    records.sort_by_key(|record| record.ts);

    info!(
        "parsed {} messages from {} conversations ({} skipped)",
        records.len(),
        conversations.len(),
        skipped
    );
    Ok(ParseOutcome {
        records,
        conversations: conversations.len(),
        skipped,
    })
}

fn flatten_conversation(
    conversation: &ConversationRecord,
    records: &mut Vec<MessageRecord>,
    skipped: &mut usize,
) {
    let conversation_id = conversation.id.as_deref().unwrap_or("unknown_id");
    debug!("processing conversation {}", conversation_id);

    for (node_id, raw_node) in &conversation.mapping {
        let node: MappingNode = match serde_json::from_value(raw_node.clone()) {
            Ok(node) => node,
            Err(err) => {
                warn!(
                    "conversation {}: unreadable node {}: {}",
                    conversation_id, node_id, err
                );
                *skipped += 1;
                continue;
            }
        };

        // Structural nodes (the tree root) carry no message at all.
        let Some(message) = node.message else {
            continue;
        };

        let Some(role) = message.author.as_ref().and_then(|a| a.role.as_deref()) else {
            warn!(
                "conversation {}: message {} has no role, skipping",
                conversation_id, node_id
            );
            *skipped += 1;
            continue;
        };

        let Some(text) = message.content.as_ref().and_then(|c| c.text()) else {
            warn!(
                "conversation {}: message {} has no text content, skipping",
                conversation_id, node_id
            );
            *skipped += 1;
            continue;
        };

        // Fall back to the conversation's create_time; some exports
        // leave it off system and root-adjacent messages.
        let ts = message
            .create_time
            .or(conversation.create_time)
            .and_then(timestamp_from_epoch);
        let Some(ts) = ts else {
            warn!(
                "conversation {}: message {} has no usable timestamp, skipping",
                conversation_id, node_id
            );
            *skipped += 1;
            continue;
        };

        records.push(MessageRecord {
            conversation_id: conversation_id.to_string(),
            message_id: message
                .id
                .clone()
                .unwrap_or_else(|| "unknown_msg_id".to_string()),
            role: Role::from_export(role),
            ts,
            model_slug: message.model_slug().to_string(),
            text,
            tokens: 0,
        });
    }
}

/// Epoch seconds (possibly fractional) to a UTC timestamp.
fn timestamp_from_epoch(ts: f64) -> Option<DateTime<Utc>> {
    if !ts.is_finite() {
        return None;
    }
    let seconds = ts.trunc() as i64;
    let nanos = ((ts - seconds as f64).clamp(0.0, 0.999_999_999) * 1e9).round() as u32;
    DateTime::<Utc>::from_timestamp(seconds, nanos.min(999_999_999))
}
