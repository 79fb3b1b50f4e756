//! Token estimation by character count.
//!
//! A real tokenizer is deliberately out of scope; `ceil(chars / K)`
//! with K around 4 tracks English prose closely enough for a usage
//! chart. K is configuration, not a constant baked into callers.

/// Average characters per token assumed when the CLI gives no override.
pub const DEFAULT_CHARS_PER_TOKEN: u32 = 4;

/// Maps message text to an approximate token count.
#[derive(Clone, Copy, Debug)]
pub struct TokenEstimator {
    chars_per_token: u64,
}

impl TokenEstimator {
    /// A zero divisor is nonsense; it is clamped to 1 (every character
    /// its own token) rather than rejected.
    pub fn new(chars_per_token: u32) -> Self {
        Self {
            chars_per_token: u64::from(chars_per_token.max(1)),
        }
    }

    /// `ceil(chars(text) / K)`. Empty text is zero tokens. Counts
    /// characters, not bytes, so multi-byte text is not over-charged.
    pub fn estimate(&self, text: &str) -> u64 {
        let chars = text.chars().count() as u64;
        chars.div_ceil(self.chars_per_token)
    }
}

impl Default for TokenEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_CHARS_PER_TOKEN)
    }
}
