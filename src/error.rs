use axum::Json;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Messages array is required")]
    InvalidInput,

    #[error("Request body too large")]
    PayloadTooLarge,

    #[error("Server configuration error: {0}")]
    Configuration(String),

    #[error("Groq API error ({status}): {detail}")]
    Upstream { status: u16, detail: String },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("{0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ProxyError>;

/// JSON body returned for every failed request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorEnvelope {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ProxyError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ProxyError::InvalidInput => StatusCode::BAD_REQUEST,
            ProxyError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ProxyError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ProxyError::Configuration(_) | ProxyError::Transport(_) | ProxyError::Decode(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn envelope(&self) -> ErrorEnvelope {
        let (error, detail, status) = match self {
            ProxyError::MethodNotAllowed => ("Method not allowed", None, None),
            ProxyError::InvalidInput => ("Messages array is required", None, None),
            ProxyError::PayloadTooLarge => ("Request body too large", None, None),
            ProxyError::Configuration(detail) => {
                ("Server configuration error", Some(detail.clone()), None)
            }
            ProxyError::Upstream { status, detail } => {
                ("Groq API error", Some(detail.clone()), Some(*status))
            }
            ProxyError::Transport(e) => ("Server error", Some(e.to_string()), None),
            ProxyError::Decode(e) => ("Server error", Some(e.to_string()), None),
        };
        ErrorEnvelope {
            error: error.to_string(),
            detail,
            status,
        }
    }
}

// 请求体读取失败：超限为 413，其余按缺少 messages 处理
impl From<BytesRejection> for ProxyError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ProxyError::PayloadTooLarge
        } else {
            ProxyError::InvalidInput
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.envelope())).into_response()
    }
}
