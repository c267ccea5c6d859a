use crate::api::{ApiResult, ChatBackend, ChatReply};
use crate::session::SessionStore;
use crate::types::{ChatMessage, MessageId, Role};

pub const FALLBACK_REPLY: &str =
    "Sorry, we couldn't process your request at this time. Please try again later.";

pub const GREETING: &str = "Hi! I'm here to help you understand terms and conditions. You can paste a URL to a T&C page, or ask me questions about legal documents.\n\nI can help with:\n- **Analyzing** complex legal language\n- **Highlighting** important clauses\n- **Explaining** what you're agreeing to\n- **Identifying** potential concerns";

pub fn error_reply(err: &dyn std::error::Error) -> String {
    format!("Something went wrong while contacting the server: {err}")
}

/// A send that has been accepted and is waiting for the backend.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingTurn {
    pub text: String,
    pub user_id: MessageId,
}

/// Append-only chat transcript plus the busy flag guarding the single
/// in-flight request.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
    busy: bool,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_greeting() -> Self {
        let mut transcript = Self::new();
        let id = transcript.next_id();
        transcript
            .messages
            .push(ChatMessage::assistant(id, GREETING, None));
        transcript
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Time-derived id, bumped past the last message so ids stay strictly
    /// increasing.
    fn next_id(&self) -> MessageId {
        let now = MessageId::now();
        match self.messages.last() {
            Some(last) if last.id >= now => last.id.next(),
            _ => now,
        }
    }

    /// Accept `text` for sending: appends the user message and marks the
    /// transcript busy. Blank input and sends while busy are ignored.
    pub fn begin_send(&mut self, text: &str) -> Option<PendingTurn> {
        let trimmed = text.trim();
        if trimmed.is_empty() || self.busy {
            return None;
        }
        let user_id = self.next_id();
        self.messages.push(ChatMessage::user(user_id, trimmed));
        self.busy = true;
        Some(PendingTurn {
            text: trimmed.to_string(),
            user_id,
        })
    }

    /// Append the assistant reply for `turn` and clear the busy flag.
    pub fn complete(&mut self, turn: &PendingTurn, outcome: ApiResult<ChatReply>) -> &ChatMessage {
        let mut id = turn.user_id.next();
        if let Some(last) = self.messages.last()
            && last.id >= id
        {
            id = last.id.next();
        }

        let message = match outcome {
            Ok(reply) => {
                let content = reply
                    .response
                    .filter(|response| !response.is_empty())
                    .unwrap_or_else(|| FALLBACK_REPLY.to_string());
                ChatMessage::assistant(id, content, reply.diff)
            }
            Err(err) => {
                tracing::warn!(error = %err, "chat request failed");
                ChatMessage::assistant(id, error_reply(&err), None)
            }
        };

        self.messages.push(message);
        self.busy = false;
        &self.messages[self.messages.len() - 1]
    }

    pub fn latest_assistant(&self) -> Option<&ChatMessage> {
        self.messages
            .iter()
            .rev()
            .find(|msg| msg.role == Role::Assistant)
    }

    pub fn latest_diff(&self) -> Option<&str> {
        self.latest_assistant()
            .and_then(ChatMessage::visible_diff)
    }

    pub fn has_latest_diff(&self) -> bool {
        self.latest_diff().is_some()
    }

    /// Full round trip against `backend`. Returns false when the input was
    /// not accepted.
    pub async fn send_message(
        &mut self,
        backend: &dyn ChatBackend,
        session: &SessionStore,
        text: &str,
    ) -> bool {
        let Some(turn) = self.begin_send(text) else {
            return false;
        };
        let session_id = session.get_or_create();
        let outcome = backend.send(&turn.text, &session_id).await;
        if let Ok(ChatReply {
            session_id: Some(issued),
            ..
        }) = &outcome
        {
            session.adopt(issued);
        }
        self.complete(&turn, outcome);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use reqwest::StatusCode;

    fn reply(response: Option<&str>, diff: Option<&str>) -> ChatReply {
        ChatReply {
            response: response.map(str::to_string),
            session_id: None,
            diff: diff.map(str::to_string),
        }
    }

    #[test]
    fn test_blank_input_is_ignored() {
        let mut transcript = Transcript::new();
        assert!(transcript.begin_send("").is_none());
        assert!(transcript.begin_send("   \n\t").is_none());
        assert!(transcript.is_empty());
        assert!(!transcript.is_busy());
    }

    #[test]
    fn test_begin_send_trims_and_sets_busy() {
        let mut transcript = Transcript::new();
        let turn = transcript.begin_send("  hello  ").unwrap();
        assert_eq!(turn.text, "hello");
        assert!(transcript.is_busy());
        assert_eq!(transcript.messages()[0].content, "hello");
        assert_eq!(transcript.messages()[0].role, Role::User);
        // second send while busy is refused
        assert!(transcript.begin_send("again").is_none());
        assert_eq!(transcript.len(), 1);
    }

    #[test]
    fn test_complete_appends_reply_after_user() {
        let mut transcript = Transcript::new();
        let turn = transcript.begin_send("terms").unwrap();
        transcript.complete(&turn, Ok(reply(Some("Simplified text"), None)));
        let msgs = transcript.messages();
        assert_eq!(msgs.len(), 2);
        assert_eq!(msgs[0].role, Role::User);
        assert_eq!(msgs[1].role, Role::Assistant);
        assert_eq!(msgs[1].content, "Simplified text");
        assert_eq!(msgs[1].id, turn.user_id.next());
        assert!(!transcript.is_busy());
    }

    #[test]
    fn test_missing_response_uses_fallback() {
        let mut transcript = Transcript::new();
        let turn = transcript.begin_send("terms").unwrap();
        let msg = transcript.complete(&turn, Ok(ChatReply::default()));
        assert_eq!(msg.content, FALLBACK_REPLY);
        assert!(!transcript.is_busy());
    }

    #[test]
    fn test_error_clears_busy_and_reports() {
        let mut transcript = Transcript::new();
        let turn = transcript.begin_send("terms").unwrap();
        let err = ApiError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "boom".into(),
        };
        let msg = transcript.complete(&turn, Err(err));
        assert!(msg.content.starts_with("Something went wrong"));
        assert!(msg.content.contains("boom"));
        assert!(!transcript.is_busy());
        assert_eq!(transcript.len(), 2);
    }

    #[test]
    fn test_has_latest_diff() {
        let mut transcript = Transcript::with_greeting();
        assert!(!transcript.has_latest_diff());

        for (diff, expected) in [
            (None, false),
            (Some(""), false),
            (Some("   "), false),
            (Some("+added"), true),
        ] {
            let turn = transcript.begin_send("q").unwrap();
            transcript.complete(&turn, Ok(reply(Some("a"), diff)));
            assert_eq!(transcript.has_latest_diff(), expected, "diff {diff:?}");
        }
        assert_eq!(transcript.latest_diff(), Some("+added"));
    }

    #[test]
    fn test_user_message_after_diff_keeps_gate() {
        let mut transcript = Transcript::new();
        let turn = transcript.begin_send("q").unwrap();
        transcript.complete(&turn, Ok(reply(Some("a"), Some("-old"))));
        transcript.begin_send("follow up").unwrap();
        // the last assistant message still carries the diff
        assert!(transcript.has_latest_diff());
    }

    #[test]
    fn test_ids_strictly_increase() {
        let mut transcript = Transcript::with_greeting();
        for _ in 0..5 {
            let turn = transcript.begin_send("q").unwrap();
            transcript.complete(&turn, Ok(reply(Some("a"), None)));
        }
        let ids: Vec<_> = transcript.messages().iter().map(|m| m.id).collect();
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
