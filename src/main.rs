use recipe_service::{build_app, config::AppConfig, run_server, AppState};
use tracing::{error, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("recipe_service=info,tower_http=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() {
    let config = AppConfig::load();
    init_tracing();

    if config.api_key.is_none() {
        warn!("GOOGLE_API_KEY is not set; recipe requests will fail until it is");
    }

    let state = match AppState::from_config(&config) {
        Ok(state) => state,
        Err(err) => {
            error!(error = %err, "failed to build recipe generator");
            std::process::exit(1);
        }
    };

    if let Err(err) = run_server(build_app(state), config.port).await {
        error!(error = %err, "server failed");
        std::process::exit(1);
    }
}
