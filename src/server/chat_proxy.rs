use axum::Json;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;

use crate::config::UpstreamConfig;
use crate::error::ProxyError;
use crate::providers::{CompletionUpstream, UpstreamCompletionRequest, UpstreamReply};
use crate::server::chat_request::ChatRequest;
use crate::server::request_logging::{NoopObserver, ProxyObserver};

/// Successful results of a proxied request.
#[derive(Debug, Clone, PartialEq)]
pub enum ProxyOutcome {
    /// CORS preflight acknowledgement, empty body.
    Preflight,
    /// Upstream JSON payload, relayed as is.
    Completion(Value),
}

impl IntoResponse for ProxyOutcome {
    fn into_response(self) -> Response {
        match self {
            ProxyOutcome::Preflight => StatusCode::OK.into_response(),
            ProxyOutcome::Completion(data) => (StatusCode::OK, Json(data)).into_response(),
        }
    }
}

/// Validates inbound chat requests and forwards them to the completion upstream.
///
/// Holds no per-request state; one instance serves all concurrent requests.
pub struct ChatProxyHandler {
    config: UpstreamConfig,
    upstream: Arc<dyn CompletionUpstream>,
    observer: Arc<dyn ProxyObserver>,
}

impl ChatProxyHandler {
    pub fn new(config: UpstreamConfig, upstream: Arc<dyn CompletionUpstream>) -> Self {
        Self {
            config,
            upstream,
            observer: Arc::new(NoopObserver),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn ProxyObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub async fn handle(&self, method: &Method, body: &[u8]) -> Result<ProxyOutcome, ProxyError> {
        self.handle_body(method, Ok(body)).await
    }

    /// Like `handle`, for callers whose body could not be read. The body error is only
    /// reported once the method has been accepted as `POST`.
    pub async fn handle_body(
        &self,
        method: &Method,
        body: Result<&[u8], ProxyError>,
    ) -> Result<ProxyOutcome, ProxyError> {
        self.observer.request_received(method);
        let result = self.dispatch(method, body).await;
        match &result {
            Ok(ProxyOutcome::Completion(_)) => self.observer.completed(),
            Ok(ProxyOutcome::Preflight) => {}
            Err(e) => self.observer.failed(e),
        }
        result
    }

    async fn dispatch(
        &self,
        method: &Method,
        body: Result<&[u8], ProxyError>,
    ) -> Result<ProxyOutcome, ProxyError> {
        if *method == Method::OPTIONS {
            return Ok(ProxyOutcome::Preflight);
        }
        if *method != Method::POST {
            return Err(ProxyError::MethodNotAllowed);
        }

        let ChatRequest { messages } = ChatRequest::parse(body?)?;

        // 必须在发起任何网络请求之前检查
        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            ProxyError::Configuration("GROQ_API_KEY is not configured".to_string())
        })?;

        self.observer.forwarding(&messages, api_key);
        let request = UpstreamCompletionRequest::new(&self.config, messages);

        let start_time = Utc::now();
        let reply = self.upstream.complete(api_key, &request).await?;
        let elapsed_ms = (Utc::now() - start_time).num_milliseconds();

        match reply {
            UpstreamReply::Success { status, body } => {
                self.observer.upstream_status(status, elapsed_ms);
                Ok(ProxyOutcome::Completion(body))
            }
            UpstreamReply::Rejected { status, body } => {
                self.observer.upstream_status(status, elapsed_ms);
                self.observer.upstream_rejected(status, &body);
                Err(ProxyError::Upstream {
                    status,
                    detail: body,
                })
            }
        }
    }
}
