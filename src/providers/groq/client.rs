use async_trait::async_trait;
use serde_json::Value;

use crate::config::UpstreamConfig;
use crate::error::ProxyError;
use crate::http_client::client_for_url;
use crate::providers::CompletionUpstream;

use super::types::{UpstreamCompletionRequest, UpstreamReply};

/// Groq's OpenAI-compatible chat completions endpoint.
pub struct GroqProvider {
    client: reqwest::Client,
    url: String,
}

impl GroqProvider {
    pub fn new(config: &UpstreamConfig) -> Result<Self, ProxyError> {
        let url = config.chat_completions_url();
        let client = client_for_url(&url)?;
        Ok(Self { client, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CompletionUpstream for GroqProvider {
    async fn complete(
        &self,
        api_key: &str,
        request: &UpstreamCompletionRequest,
    ) -> Result<UpstreamReply, ProxyError> {
        let response = self
            .client
            .post(&self.url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Ok(UpstreamReply::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let data: Value = serde_json::from_slice(&bytes)?;
        Ok(UpstreamReply::Success {
            status: status.as_u16(),
            body: data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Json, Router,
        extract::State,
        http::{HeaderMap, StatusCode},
        response::IntoResponse,
        routing::post,
    };
    use serde_json::json;
    use std::net::SocketAddr;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Captured {
        authorization: Option<String>,
        body: Option<Value>,
    }

    type Shared = Arc<Mutex<Captured>>;

    async fn spawn_upstream(router: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        addr
    }

    fn provider_for(addr: SocketAddr) -> GroqProvider {
        let config = UpstreamConfig {
            base_url: format!("http://{}/openai/v1", addr),
            ..Default::default()
        };
        GroqProvider::new(&config).unwrap()
    }

    fn request() -> UpstreamCompletionRequest {
        UpstreamCompletionRequest::new(
            &UpstreamConfig::default(),
            vec![json!({ "role": "user", "content": "hello" })],
        )
    }

    #[tokio::test]
    async fn success_body_is_returned_and_request_is_authorized() {
        async fn ok_handler(
            State(captured): State<Shared>,
            headers: HeaderMap,
            Json(body): Json<Value>,
        ) -> impl IntoResponse {
            let mut guard = captured.lock().unwrap();
            guard.authorization = headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_string());
            guard.body = Some(body);
            Json(json!({ "id": "x", "choices": [{ "index": 0 }] }))
        }

        let captured: Shared = Arc::default();
        let router = Router::new()
            .route("/openai/v1/chat/completions", post(ok_handler))
            .with_state(captured.clone());
        let addr = spawn_upstream(router).await;
        let provider = provider_for(addr);

        let reply = provider.complete("gsk_abc", &request()).await.unwrap();
        assert_eq!(
            reply,
            UpstreamReply::Success {
                status: 200,
                body: json!({ "id": "x", "choices": [{ "index": 0 }] })
            }
        );

        let guard = captured.lock().unwrap();
        assert_eq!(guard.authorization.as_deref(), Some("Bearer gsk_abc"));
        assert_eq!(
            guard.body.as_ref().unwrap(),
            &serde_json::to_value(request()).unwrap()
        );
    }

    #[tokio::test]
    async fn success_keeps_upstream_status_code() {
        let router = Router::new().route(
            "/openai/v1/chat/completions",
            post(|| async { (StatusCode::CREATED, Json(json!({ "id": "created" }))) }),
        );
        let addr = spawn_upstream(router).await;

        let reply = provider_for(addr)
            .complete("gsk_abc", &request())
            .await
            .unwrap();
        assert_eq!(
            reply,
            UpstreamReply::Success {
                status: 201,
                body: json!({ "id": "created" })
            }
        );
    }

    #[tokio::test]
    async fn non_success_status_returns_body_text() {
        let router = Router::new().route(
            "/openai/v1/chat/completions",
            post(|| async { (StatusCode::TOO_MANY_REQUESTS, "rate limited") }),
        );
        let addr = spawn_upstream(router).await;

        let reply = provider_for(addr)
            .complete("gsk_abc", &request())
            .await
            .unwrap();
        assert_eq!(
            reply,
            UpstreamReply::Rejected {
                status: 429,
                body: "rate limited".into()
            }
        );
    }

    #[tokio::test]
    async fn malformed_success_body_is_decode_error() {
        let router = Router::new().route(
            "/openai/v1/chat/completions",
            post(|| async { "definitely not json" }),
        );
        let addr = spawn_upstream(router).await;

        let err = provider_for(addr)
            .complete("gsk_abc", &request())
            .await
            .unwrap_err();
        assert!(matches!(err, ProxyError::Decode(_)));
    }

    #[tokio::test]
    async fn unreachable_upstream_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = provider_for(addr)
            .complete("gsk_abc", &request())
            .await
            .unwrap_err();
        assert!(matches!(err, ProxyError::Transport(_)));
    }
}
