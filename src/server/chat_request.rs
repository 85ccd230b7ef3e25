use serde::Deserialize;
use serde_json::Value;

use crate::error::ProxyError;

/// Inbound chat request.
///
/// Only `messages` is read; its elements are opaque and forwarded unchanged. Any other fields
/// the client sends are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<Value>,
}

impl ChatRequest {
    /// A body that is not JSON, has no `messages`, or whose `messages` is not an array is
    /// rejected with the same client error.
    pub fn parse(body: &[u8]) -> Result<Self, ProxyError> {
        serde_json::from_slice(body).map_err(|_| ProxyError::InvalidInput)
    }
}
