mod config;
mod llm;
mod routes;
mod state;

use std::time::Duration;


/// The `.env` load error worth reporting. A missing file is the normal case
/// outside local development.
fn dotenv_failure<T>(result: Result<T, dotenvy::Error>) -> Option<dotenvy::Error> {
    match result {
        Err(e) if !e.not_found() => Some(e),
        _ => None,
    }
}

#[tokio::main]
async fn main() {
    // .env is loaded before the subscriber so RUST_LOG set there applies.
    let dotenv = dotenvy::dotenv();
    tracing_subscriber::fmt::init();
    if let Some(e) = dotenv_failure(dotenv) {
        tracing::warn!(error = %e, "failed to load .env");
    }

    let mut config = config::AppConfig::from_env().expect("invalid server config");
    let llm_config = llm::config::LlmConfig::from_env().expect("invalid LLM config");
    let request_timeout = Duration::from_secs(llm_config.timeouts.request_secs);
    if config.cap_chat_duration(request_timeout) {
        tracing::warn!(
            secs = request_timeout.as_secs(),
            "CHAT_MAX_DURATION_SECS exceeds LLM_REQUEST_TIMEOUT_SECS; using the request timeout"
        );
    }

    // Non-fatal: AI cards answer 503 when the client cannot be built.
    let llm = match llm::from_config(&llm_config) {
        Ok(Some(client)) => {
            tracing::info!(model = client.model(), "LLM client initialized");
            Some(client)
        }
        Ok(None) => {
            tracing::info!("LLM disabled by LLM_PROVIDER=none");
            None
        }
        Err(e) => {
            tracing::warn!(error = %e, "LLM client not configured; AI cards disabled");
            None
        }
    };

    let state = state::AppState::new(llm, config.chat_max_duration);
    let app = routes::app(state, &config.static_dir);

    let port = config.port;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, static_dir = %config.static_dir.display(), "markboard listening");
    axum::serve(listener, app).await.expect("server failed");
}
