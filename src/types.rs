use serde::{Deserialize, Serialize};
use std::fmt;
use time::OffsetDateTime;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_class(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// Millisecond timestamp used to key a message in the transcript.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub i64);

impl MessageId {
    pub fn now() -> Self {
        let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
        Self(millis as i64)
    }

    /// Id for the reply that directly follows this message.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub fn created_at(self) -> Option<OffsetDateTime> {
        OffsetDateTime::from_unix_timestamp_nanos(self.0 as i128 * 1_000_000).ok()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,
}

impl ChatMessage {
    pub fn user(id: MessageId, content: impl Into<String>) -> Self {
        Self {
            id,
            role: Role::User,
            content: content.into(),
            diff: None,
        }
    }

    pub fn assistant(id: MessageId, content: impl Into<String>, diff: Option<String>) -> Self {
        Self {
            id,
            role: Role::Assistant,
            content: content.into(),
            diff,
        }
    }

    /// Diff text if present and not blank.
    pub fn visible_diff(&self) -> Option<&str> {
        self.diff.as_deref().filter(|diff| !diff.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_id_is_offset_by_one() {
        let id = MessageId(1_700_000_000_000);
        assert_eq!(id.next(), MessageId(1_700_000_000_001));
    }

    #[test]
    fn test_visible_diff_ignores_blank() {
        let mut msg = ChatMessage::assistant(MessageId(1), "hi", Some("  \n".into()));
        assert_eq!(msg.visible_diff(), None);
        msg.diff = Some("+added".into());
        assert_eq!(msg.visible_diff(), Some("+added"));
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&Role::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
    }
}
