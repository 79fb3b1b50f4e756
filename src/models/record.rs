use chrono::{DateTime, Utc};

use crate::models::Role;

/// One flattened message, the unit of work for estimation and
/// aggregation. Produced by the parser, held only in memory.
#[derive(Clone, Debug)]
pub struct MessageRecord {
    pub conversation_id: String,
    pub message_id: String,
    pub role: Role,
    pub ts: DateTime<Utc>,
    pub text: String,
    /// Approximate token count, filled in by the estimator after
    /// parsing. Zero until then.
    pub tokens: u64,
    pub model_slug: String,
}
