pub mod groq;

use async_trait::async_trait;

use crate::error::ProxyError;

pub use groq::{GroqProvider, UpstreamCompletionRequest, UpstreamReply};

/// One chat-completion call against an upstream API.
///
/// `Err` means the call never produced an HTTP status (network failure) or the success body
/// could not be decoded. Non-2xx answers are returned as `UpstreamReply::Rejected`.
#[async_trait]
pub trait CompletionUpstream: Send + Sync {
    async fn complete(
        &self,
        api_key: &str,
        request: &UpstreamCompletionRequest,
    ) -> Result<UpstreamReply, ProxyError>;
}
