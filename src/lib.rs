pub mod api;
pub mod config;
pub mod error;
pub mod extract;
pub mod gemini;
pub mod generator;
pub mod prompt;
pub mod recipe;

use std::sync::Arc;

use axum::{extract::MatchedPath, http::Request, Router};
use tower_http::trace::TraceLayer;
use tracing::info_span;

use crate::config::AppConfig;
use crate::gemini::GeminiGenerator;
use crate::generator::{GeneratorError, RecipeGenerator};

#[derive(Clone, Debug)]
pub struct AppState {
    /// `None` when no API key was configured; requests then fail fast.
    pub generator: Option<Arc<dyn RecipeGenerator>>,
}

impl AppState {
    pub fn new(generator: Arc<dyn RecipeGenerator>) -> Self {
        Self {
            generator: Some(generator),
        }
    }

    pub fn unconfigured() -> Self {
        Self { generator: None }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, GeneratorError> {
        let Some(api_key) = config.api_key.as_deref() else {
            return Ok(Self::unconfigured());
        };

        let generator = GeminiGenerator::new(
            api_key,
            config.model.as_str(),
            config.api_base_url.as_str(),
            config.timeout(),
        )?;

        Ok(Self::new(Arc::new(generator)))
    }
}

pub fn build_app(state: AppState) -> Router {
    api::router(state).layer(TraceLayer::new_for_http().make_span_with(
        |request: &Request<_>| {
            let path = request
                .extensions()
                .get::<MatchedPath>()
                .map(MatchedPath::as_str)
                .unwrap_or(request.uri().path());

            info_span!("http_request", method = %request.method(), path = %path)
        },
    ))
}

pub async fn run_server(app: Router, port: u16) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app).await
}
