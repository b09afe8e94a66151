mod handlers;
mod models;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

pub use handlers::{generate_recipe, index, not_found};
pub use models::{ErrorResponse, RecipeRequest, RecipeResponse};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/recipe", post(generate_recipe))
        .fallback(not_found)
        .with_state(state)
}
