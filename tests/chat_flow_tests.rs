//! Integration tests for the chat round trip
//!
//! Drives `Transcript::send_message` against scripted backends.

use async_trait::async_trait;
use demistify::api::{ApiError, ApiResult, ChatBackend, ChatReply, DemoBackend, parse_chat_body};
use demistify::diff::{DiffLineKind, parse_diff};
use demistify::session::SessionStore;
use demistify::storage::LocalStorage;
use demistify::transcript::{FALLBACK_REPLY, Transcript};
use demistify::types::Role;
use std::sync::Mutex;
use std::time::Duration;

/// Replies with a fixed response body and records what it was sent.
struct ScriptedBackend {
    body: &'static str,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedBackend {
    fn new(body: &'static str) -> Self {
        Self {
            body,
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ChatBackend for ScriptedBackend {
    async fn send(&self, text: &str, session_id: &str) -> ApiResult<ChatReply> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), session_id.to_string()));
        Ok(parse_chat_body(self.body))
    }
}

struct FailingBackend;

#[async_trait]
impl ChatBackend for FailingBackend {
    async fn send(&self, _text: &str, _session_id: &str) -> ApiResult<ChatReply> {
        Err(ApiError::Unavailable("connection refused".into()))
    }
}

fn temp_session() -> (tempfile::TempDir, SessionStore) {
    let dir = tempfile::tempdir().expect("tempdir");
    let session = SessionStore::new(LocalStorage::at(dir.path()));
    (dir, session)
}

mod send_tests {
    use super::*;

    #[tokio::test]
    async fn test_successful_send_appends_two_messages() {
        let (_dir, session) = temp_session();
        let backend = ScriptedBackend::new(r#"{"data":{"response":"Simplified text"}}"#);
        let mut transcript = Transcript::with_greeting();
        let before = transcript.len();

        assert!(transcript.send_message(&backend, &session, "  What does clause 4 mean?  ").await);

        let msgs = transcript.messages();
        assert_eq!(msgs.len(), before + 2);
        assert_eq!(msgs[before].role, Role::User);
        assert_eq!(msgs[before].content, "What does clause 4 mean?");
        assert_eq!(msgs[before + 1].role, Role::Assistant);
        assert_eq!(msgs[before + 1].content, "Simplified text");
        assert!(!transcript.is_busy());

        let calls = backend.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "What does clause 4 mean?");
        assert_eq!(Some(calls[0].1.clone()), session.current());
    }

    #[tokio::test]
    async fn test_blank_send_never_calls_backend() {
        let (_dir, session) = temp_session();
        let backend = ScriptedBackend::new(r#"{"data":{"response":"x"}}"#);
        let mut transcript = Transcript::new();

        assert!(!transcript.send_message(&backend, &session, "   ").await);
        assert!(transcript.is_empty());
        assert!(!transcript.is_busy());
        assert!(backend.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_response_shows_fallback() {
        let (_dir, session) = temp_session();
        let backend = ScriptedBackend::new(r#"{"data":{"session_id":"abc"}}"#);
        let mut transcript = Transcript::new();

        transcript.send_message(&backend, &session, "hello").await;
        assert_eq!(transcript.messages()[1].content, FALLBACK_REPLY);
        // the id issued by the backend is kept for the next turn
        assert_eq!(session.current().as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn test_backend_failure_is_reported() {
        let (_dir, session) = temp_session();
        let mut transcript = Transcript::new();

        transcript.send_message(&FailingBackend, &session, "hello").await;
        let reply = &transcript.messages()[1];
        assert_eq!(reply.role, Role::Assistant);
        assert!(reply.content.contains("connection refused"));
        assert!(!transcript.is_busy());
    }

    #[tokio::test]
    async fn test_session_id_is_stable_across_turns() {
        let (_dir, session) = temp_session();
        let backend = ScriptedBackend::new(r#"{"data":{"response":"ok"}}"#);
        let mut transcript = Transcript::new();

        transcript.send_message(&backend, &session, "one").await;
        transcript.send_message(&backend, &session, "two").await;

        let calls = backend.calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].1, calls[1].1);
    }
}

mod diff_gate_tests {
    use super::*;

    #[tokio::test]
    async fn test_diff_from_backend_reaches_viewer() {
        let (_dir, session) = temp_session();
        let backend = ScriptedBackend::new(
            r#"{"data":{"response":"Changed","diff":"@@ -1 +1 @@\n-old clause\n+new clause"}}"#,
        );
        let mut transcript = Transcript::new();

        transcript.send_message(&backend, &session, "compare").await;
        assert!(transcript.has_latest_diff());

        let diff = transcript.latest_diff().expect("diff");
        let kinds: Vec<_> = parse_diff(diff).iter().map(|line| line.kind).collect();
        assert_eq!(
            kinds,
            vec![
                DiffLineKind::HunkHeader,
                DiffLineKind::Deletion,
                DiffLineKind::Addition
            ]
        );
    }

    #[tokio::test]
    async fn test_demo_backend_round_trip() {
        let (_dir, session) = temp_session();
        let backend = DemoBackend::new(Duration::from_millis(1)).with_diff_probability(1.0);
        let mut transcript = Transcript::with_greeting();

        transcript.send_message(&backend, &session, "Cancel anytime?").await;
        assert!(transcript.has_latest_diff());
        assert!(transcript.messages().last().unwrap().content.contains("Cancel anytime?"));
    }
}
