/// Backend access for the chat surface
///
/// - `client` - `HttpBackend`, the real `POST /chat` call
/// - `demo` - `DemoBackend`, a local stand-in that fabricates replies
///
/// Both implement [`ChatBackend`], which is what the transcript controller
/// and the chat view talk to.
mod client;
mod demo;

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::AppConfig;

pub use client::{
    ApiError, ApiResult, ChatData, ChatEnvelope, ChatReply, ChatRequest, HttpBackend,
    chat_endpoint, parse_chat_body,
};
pub use demo::{DemoBackend, PLACEHOLDER_DIFF};

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait ChatBackend: Send + Sync {
    async fn send(&self, text: &str, session_id: &str) -> ApiResult<ChatReply>;
}

/// Build the backend selected by configuration.
pub fn backend_from_config(config: &AppConfig) -> ApiResult<Arc<dyn ChatBackend>> {
    if config.demo_mode {
        tracing::info!(delay_ms = config.demo_delay.as_millis() as u64, "using demo backend");
        return Ok(Arc::new(DemoBackend::new(config.demo_delay)));
    }
    let backend = HttpBackend::new(config)?;
    tracing::info!(endpoint = %backend.endpoint(), "using http backend");
    Ok(Arc::new(backend))
}
