use axum::{Router, extract::DefaultBodyLimit, routing::any};
use std::sync::Arc;

use crate::server::AppState;

mod chat;

/// Largest accepted request body, matching the serverless platform limit (4.5 MB).
pub const MAX_BODY_BYTES: usize = 4_500_000;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/chat", any(chat::chat))
        // 任意路径都走同一个处理器
        .fallback(chat::chat)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
}
