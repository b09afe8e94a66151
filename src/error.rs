use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, warn};

use crate::api::ErrorResponse;
use crate::generator::GeneratorError;

/// Everything that can go wrong while serving a recipe request.
///
/// The `Display` text is the message clients see; upstream details stay in
/// the server log.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Dish and Country are required.")]
    Validation,

    #[error("GOOGLE_API_KEY is not set in environment variables.")]
    Configuration,

    #[error("Failed to generate recipe. Please try again.")]
    Upstream(#[source] GeneratorError),

    #[error("The recipe generator returned an invalid format. Please try again.")]
    Format { raw_reply: String },
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation => StatusCode::BAD_REQUEST,
            Self::Configuration | Self::Upstream(_) | Self::Format { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            Self::Validation => {}
            Self::Configuration => error!("recipe generator is not configured"),
            Self::Upstream(source) => error!(error = %source, "recipe generation failed"),
            Self::Format { raw_reply } => {
                warn!(raw_reply = %raw_reply, "no JSON object in generator reply")
            }
        }

        (
            self.status(),
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
