use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::extract::extract_json_object;
use crate::generator::GenerateOptions;
use crate::prompt::build_recipe_prompt;
use crate::recipe::Recipe;
use crate::AppState;

use super::models::{ErrorResponse, RecipeRequest, RecipeResponse};

const INDEX_HTML: &str = include_str!("../../static/index.html");

pub async fn generate_recipe(
    State(state): State<AppState>,
    payload: Result<Json<RecipeRequest>, JsonRejection>,
) -> Result<Json<RecipeResponse>, AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        debug!(%rejection, "rejected recipe request body");
        AppError::Validation
    })?;
    let (dish, country) = payload.validated()?;

    let generator = state.generator.as_deref().ok_or(AppError::Configuration)?;

    let prompt = build_recipe_prompt(dish, country);
    info!(dish, country, model = generator.model_name(), "generating recipe");

    let generation = generator
        .generate(&prompt, &GenerateOptions { web_search: true })
        .await
        .map_err(AppError::Upstream)?;

    let Some(recipe) = extract_json_object(&generation.text) else {
        return Err(AppError::Format {
            raw_reply: generation.text,
        });
    };

    check_recipe_shape(&recipe);

    Ok(Json(RecipeResponse {
        recipe,
        grounding_metadata: generation.grounding_metadata,
    }))
}

/// Logs where the extracted object strays from [`Recipe`]. The object is
/// returned to the client unchanged either way.
fn check_recipe_shape(value: &serde_json::Value) {
    match Recipe::deserialize(value) {
        Ok(recipe) => {
            for issue in recipe.issues() {
                warn!(%issue, title = %recipe.title, "generated recipe breaks an invariant");
            }
        }
        Err(err) => warn!(error = %err, "generated recipe does not match the recipe schema"),
    }
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Not found".to_string(),
        }),
    )
        .into_response()
}
