use async_trait::async_trait;
use std::time::Duration;

use super::{ApiResult, ChatBackend, ChatReply};

pub const PLACEHOLDER_DIFF: &str = "--- a/terms.html\n+++ b/terms.html\n@@ -1,3 +1,3 @@\n Terms of Service\n-We may share your data with partners.\n+We may share your data with partners and advertisers.\n Last updated: today";

const DEMO_EXCERPT_CHARS: usize = 160;

/// Offline backend: waits, then answers with a canned explanation.
pub struct DemoBackend {
    delay: Duration,
    diff_probability: f64,
}

impl DemoBackend {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            diff_probability: 0.5,
        }
    }

    pub fn with_diff_probability(mut self, probability: f64) -> Self {
        self.diff_probability = probability.clamp(0.0, 1.0);
        self
    }

    fn fabricate(text: &str) -> String {
        let mut excerpt: String = text.chars().take(DEMO_EXCERPT_CHARS).collect();
        if text.chars().count() > DEMO_EXCERPT_CHARS {
            excerpt.push('…');
        }
        format!(
            "Here's what that means in plain language:\n\n> {excerpt}\n\n\
             - **Who it affects:** you, as the person accepting the terms\n\
             - **What to watch for:** clauses about data sharing, renewals and cancellation\n\n\
             _This is a demo reply. Connect a backend to get a real analysis._"
        )
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl ChatBackend for DemoBackend {
    async fn send(&self, text: &str, session_id: &str) -> ApiResult<ChatReply> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let attach_diff = rand::random::<f64>() < self.diff_probability;
        tracing::debug!(attach_diff, "demo reply fabricated");
        Ok(ChatReply {
            response: Some(Self::fabricate(text)),
            session_id: Some(session_id.to_string()),
            diff: attach_diff.then(|| PLACEHOLDER_DIFF.to_string()),
        })
    }
}
