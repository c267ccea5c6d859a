use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};

use super::ChatBackend;
use crate::config::AppConfig;

// ============================================
// Error Types
// ============================================

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

// ============================================
// Wire Types
// ============================================

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub text: &'a str,
    pub session_id: &'a str,
}

/// Body returned by `POST /chat`: `{ "data": { "response": ..., "session_id": ... } }`.
#[derive(Debug, Default, Deserialize)]
pub struct ChatEnvelope {
    #[serde(default)]
    pub data: Option<ChatData>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChatData {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub diff: Option<String>,
}

/// What the transcript needs from a backend turn. Every field may be absent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChatReply {
    pub response: Option<String>,
    pub session_id: Option<String>,
    pub diff: Option<String>,
}

impl From<ChatEnvelope> for ChatReply {
    fn from(envelope: ChatEnvelope) -> Self {
        let data = envelope.data.unwrap_or_default();
        Self {
            response: data.response,
            session_id: data.session_id,
            diff: data.diff,
        }
    }
}

/// Decode a successful response body. Anything that is not the expected
/// envelope yields an empty reply so the caller shows its fallback text.
pub fn parse_chat_body(body: &str) -> ChatReply {
    match serde_json::from_str::<ChatEnvelope>(body) {
        Ok(envelope) => envelope.into(),
        Err(err) => {
            tracing::warn!(error = %err, "chat response is not the expected envelope");
            ChatReply::default()
        }
    }
}

// ============================================
// HTTP Backend
// ============================================

pub struct HttpBackend {
    client: Client,
    endpoint: Url,
}

impl HttpBackend {
    pub fn new(config: &AppConfig) -> ApiResult<Self> {
        let endpoint = chat_endpoint(&config.api_base_url)?;

        #[cfg(not(target_arch = "wasm32"))]
        let client = Client::builder().timeout(config.request_timeout).build()?;
        #[cfg(target_arch = "wasm32")]
        let client = Client::new();

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// Resolve `{base}/chat`, treating the base as a directory even without a
/// trailing slash.
pub fn chat_endpoint(base_url: &str) -> ApiResult<Url> {
    let invalid = |reason: String| ApiError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason,
    };
    let mut base = base_url.trim().to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    let base = Url::parse(&base).map_err(|e| invalid(e.to_string()))?;
    base.join("chat").map_err(|e| invalid(e.to_string()))
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl ChatBackend for HttpBackend {
    async fn send(&self, text: &str, session_id: &str) -> ApiResult<ChatReply> {
        tracing::debug!(endpoint = %self.endpoint, chars = text.len(), "sending chat request");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&ChatRequest { text, session_id })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Status { status, body });
        }

        Ok(parse_chat_body(&body))
    }
}
