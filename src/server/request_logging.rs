use axum::http::Method;
use serde_json::Value;

use crate::config::{KeyLogStrategy, LoggingConfig};
use crate::error::ProxyError;
use crate::server::util::key_display_hint;

/// Diagnostic hooks around one proxied request. Every method defaults to a no-op, and nothing
/// an observer does can change the response.
pub trait ProxyObserver: Send + Sync {
    fn request_received(&self, _method: &Method) {}
    fn forwarding(&self, _messages: &[Value], _api_key: &str) {}
    fn upstream_status(&self, _status: u16, _elapsed_ms: i64) {}
    fn upstream_rejected(&self, _status: u16, _body: &str) {}
    fn completed(&self) {}
    fn failed(&self, _error: &ProxyError) {}
}

pub struct NoopObserver;

impl ProxyObserver for NoopObserver {}

/// Writes the per-request diagnostics through `tracing`.
pub struct TracingObserver {
    key_log_strategy: Option<KeyLogStrategy>,
}

impl TracingObserver {
    pub fn new(cfg: &LoggingConfig) -> Self {
        Self {
            key_log_strategy: cfg.key_log_strategy,
        }
    }
}

impl ProxyObserver for TracingObserver {
    fn request_received(&self, method: &Method) {
        tracing::info!(%method, "chat request received");
    }

    fn forwarding(&self, messages: &[Value], api_key: &str) {
        let key_hint = key_display_hint(self.key_log_strategy, api_key);
        tracing::info!(
            message_count = messages.len(),
            key_len = api_key.len(),
            key_hint = key_hint.as_deref().unwrap_or("-"),
            "calling Groq API"
        );
        tracing::debug!(
            messages = %serde_json::to_string(messages).unwrap_or_default(),
            "forwarded messages"
        );
    }

    fn upstream_status(&self, status: u16, elapsed_ms: i64) {
        tracing::info!(status, elapsed_ms, "Groq API responded");
    }

    fn upstream_rejected(&self, status: u16, body: &str) {
        tracing::error!(status, body, "Groq API error");
    }

    fn completed(&self) {
        tracing::info!("Groq API success");
    }

    fn failed(&self, error: &ProxyError) {
        match error {
            ProxyError::MethodNotAllowed | ProxyError::InvalidInput | ProxyError::PayloadTooLarge => {
                tracing::warn!("rejected chat request: {}", error)
            }
            _ => tracing::error!("chat request failed: {}", error),
        }
    }
}

/// Picks the observer for the configured diagnostics level.
pub fn observer_for(cfg: &LoggingConfig) -> std::sync::Arc<dyn ProxyObserver> {
    if cfg.diagnostics {
        std::sync::Arc::new(TracingObserver::new(cfg))
    } else {
        std::sync::Arc::new(NoopObserver)
    }
}
