use axum::{
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::Method,
};
use std::sync::Arc;

use crate::error::ProxyError;
use crate::server::AppState;
use crate::server::chat_proxy::ProxyOutcome;

pub async fn chat(
    State(app_state): State<Arc<AppState>>,
    method: Method,
    body: Result<Bytes, BytesRejection>,
) -> Result<ProxyOutcome, ProxyError> {
    match body {
        Ok(bytes) => app_state.proxy.handle(&method, &bytes).await,
        Err(rejection) => {
            app_state
                .proxy
                .handle_body(&method, Err(ProxyError::from(rejection)))
                .await
        }
    }
}
