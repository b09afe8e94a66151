//! Boundary to the external text generator.

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

use crate::recipe::GroundingMetadata;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("request to generator failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("generator returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("generator response could not be read: {0}")]
    MalformedResponse(String),

    #[error("generator returned no text")]
    EmptyResponse,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Let the model search the web and attach citations.
    pub web_search: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Generation {
    pub text: String,
    pub grounding_metadata: Option<GroundingMetadata>,
}

/// A hosted model that turns a prompt into text.
///
/// Implementations are shared across requests and must not hold per-request state.
#[async_trait]
pub trait RecipeGenerator: Send + Sync + fmt::Debug {
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerateOptions,
    ) -> Result<Generation, GeneratorError>;

    fn model_name(&self) -> &str;
}
