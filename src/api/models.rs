use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;
use crate::recipe::GroundingMetadata;

#[derive(Debug, Default, Deserialize)]
pub struct RecipeRequest {
    #[serde(default)]
    pub dish: String,
    #[serde(default)]
    pub country: String,
}

impl RecipeRequest {
    /// Trimmed `(dish, country)`, or a validation error if either is blank.
    pub fn validated(&self) -> Result<(&str, &str), AppError> {
        let dish = self.dish.trim();
        let country = self.country.trim();
        if dish.is_empty() || country.is_empty() {
            return Err(AppError::Validation);
        }
        Ok((dish, country))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeResponse {
    /// The extracted object, exactly as the generator wrote it.
    pub recipe: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
