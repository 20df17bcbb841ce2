use axum::{Json, Router, extract::State, routing::post};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use latex_translate::TranslationRequest;
use latex_translate::mt::{MachineTranslator, provider_from_env, translate_protected};

/// Environment variable overriding the bind address
const ADDR_VAR: &str = "LATEX_TRANSLATE_ADDR";
const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateResponse {
    pub translated_text: String,
}

#[derive(Clone)]
pub struct AppState {
    pub translator: Arc<dyn MachineTranslator>,
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/translate", post(translate_text))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let translator =
        provider_from_env().map_err(|e| format!("Failed to initialize translator: {}", e))?;
    info!("Using provider: {}", translator.provider_name());

    let addr = std::env::var(ADDR_VAR).unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("🚀 Server running at http://{}", addr);

    axum::serve(listener, app(AppState { translator })).await?;

    Ok(())
}

async fn translate_text(
    State(state): State<AppState>,
    Json(request): Json<TranslationRequest>,
) -> Json<TranslateResponse> {
    info!(
        chars = request.text.len(),
        "Translating {} → {}", request.source, request.target
    );

    let translated_text = translate_protected(
        state.translator.as_ref(),
        &request.text,
        &request.source,
        &request.target,
    )
    .await;

    Json(TranslateResponse { translated_text })
}
