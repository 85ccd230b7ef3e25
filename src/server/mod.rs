pub mod chat_proxy;
pub(crate) mod chat_request;
pub mod cors;
pub mod handlers;
pub mod request_logging;
pub(crate) mod util;

use crate::config::Settings;
use crate::error::Result as AppResult;
use crate::providers::GroqProvider;
use crate::server::chat_proxy::ChatProxyHandler;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub struct AppState {
    pub proxy: ChatProxyHandler,
}

pub fn create_app(config: Settings) -> AppResult<Router> {
    let provider = GroqProvider::new(&config.upstream)?;
    tracing::info!(
        upstream = provider.url(),
        model = %config.upstream.model,
        key_configured = config.upstream.api_key.is_some(),
        "Groq upstream configured"
    );

    let proxy = ChatProxyHandler::new(config.upstream.clone(), Arc::new(provider))
        .with_observer(request_logging::observer_for(&config.logging));

    Ok(router(AppState { proxy }))
}

pub fn router(app_state: AppState) -> Router {
    let app = handlers::routes()
        .with_state(Arc::new(app_state))
        .layer(TraceLayer::new_for_http());
    cors::with_cors_headers(app)
}
