use serde::Serialize;
use serde_json::Value;

use crate::config::UpstreamConfig;

/// Body posted to `/chat/completions`. Messages are forwarded exactly as the caller sent them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpstreamCompletionRequest {
    pub model: String,
    pub messages: Vec<Value>,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl UpstreamCompletionRequest {
    pub fn new(config: &UpstreamConfig, messages: Vec<Value>) -> Self {
        Self {
            model: config.model.clone(),
            messages,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamReply {
    /// 2xx with a decoded JSON body, relayed untouched.
    Success { status: u16, body: Value },
    /// Any other status, with the raw body text.
    Rejected { status: u16, body: String },
}
