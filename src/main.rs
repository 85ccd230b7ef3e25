mod config;
mod error;
mod http_client;
mod providers;
mod server;

use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::Settings::load()?;
    if config.upstream.api_key.is_none() {
        // 不阻止启动：请求时返回 500
        tracing::warn!("GROQ_API_KEY not found; chat requests will fail with a configuration error");
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = server::create_app(config)?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Chat proxy running on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
