//! Google Gemini `generateContent` client.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::generator::{GenerateOptions, Generation, GeneratorError, RecipeGenerator};
use crate::recipe::GroundingMetadata;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-002";

const API_KEY_HEADER: &str = "x-goog-api-key";

pub struct GeminiGenerator {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl fmt::Debug for GeminiGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiGenerator")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// An entry of the `models` listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub supported_generation_methods: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    grounding_metadata: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl GeminiGenerator {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GeneratorError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url: String = base_url.into();

        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Models visible to the configured key.
    pub async fn list_models(&self) -> Result<Vec<ModelInfo>, GeneratorError> {
        let url = format!("{}/models?pageSize=1000", self.base_url);

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;

        let body = read_success_body(response).await?;
        let listing: ListModelsResponse = serde_json::from_str(&body)
            .map_err(|e| GeneratorError::MalformedResponse(e.to_string()))?;

        Ok(listing.models)
    }
}

#[async_trait]
impl RecipeGenerator for GeminiGenerator {
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerateOptions,
    ) -> Result<Generation, GeneratorError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let body = build_request_body(prompt, options);

        debug!(model = %self.model, web_search = options.web_search, "gemini generateContent");

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await?;

        let body = read_success_body(response).await?;
        parse_generation(&body)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

fn build_request_body(prompt: &str, options: &GenerateOptions) -> Value {
    let mut body = json!({
        "contents": [
            {
                "role": "user",
                "parts": [{ "text": prompt }]
            }
        ]
    });

    if options.web_search {
        body["tools"] = json!([{ "googleSearch": {} }]);
    }

    body
}

async fn read_success_body(response: reqwest::Response) -> Result<String, GeneratorError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<ApiErrorResponse>(&body)
            .map(|e| e.error.message)
            .unwrap_or(body);
        return Err(GeneratorError::Api {
            status: status.as_u16(),
            message,
        });
    }

    Ok(body)
}

/// Joins the text parts of the first candidate and lifts its grounding metadata.
fn parse_generation(body: &str) -> Result<Generation, GeneratorError> {
    let response: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| GeneratorError::MalformedResponse(e.to_string()))?;

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or(GeneratorError::EmptyResponse)?;

    let text: String = candidate
        .content
        .into_iter()
        .flat_map(|content| content.parts)
        .filter_map(|part| part.text)
        .collect();

    if text.trim().is_empty() {
        return Err(GeneratorError::EmptyResponse);
    }

    let grounding_metadata = match candidate.grounding_metadata {
        Some(Value::Object(raw)) => Some(GroundingMetadata::from_raw(raw)),
        Some(other) => {
            warn!(kind = json_kind(&other), "ignoring grounding metadata that is not an object");
            None
        }
        None => None,
    };

    Ok(Generation {
        text,
        grounding_metadata,
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
