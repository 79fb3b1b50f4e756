use std::fmt;

/// Originator of a message. The variant order here is the declared
/// column and stacking order everywhere downstream, so charts come out
/// identical across runs regardless of input order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    Assistant,
    System,
    Tool,
    /// Any role string the export uses that we do not recognise.
    Other,
}

impl Role {
    /// Fixed column order for aggregation and chart stacking.
    pub const ALL: [Role; 5] = [
        Role::User,
        Role::Assistant,
        Role::System,
        Role::Tool,
        Role::Other,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Map an export role string onto a column. ChatGPT exports use
    /// lowercase names; anything unexpected lands in `Other`.
    pub fn from_export(role: &str) -> Role {
        match role.to_lowercase().as_str() {
            "user" | "human" => Role::User,
            "assistant" => Role::Assistant,
            "system" => Role::System,
            "tool" => Role::Tool,
            _ => Role::Other,
        }
    }

    /// Column index matching [`Role::ALL`].
    pub fn index(self) -> usize {
        match self {
            Role::User => 0,
            Role::Assistant => 1,
            Role::System => 2,
            Role::Tool => 3,
            Role::Other => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
            Role::Tool => "tool",
            Role::Other => "other",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
