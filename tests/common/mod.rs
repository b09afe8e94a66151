#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use http::{Method, Request};
use http_body_util::BodyExt;
use recipe_service::generator::{GenerateOptions, Generation, GeneratorError, RecipeGenerator};
use recipe_service::recipe::GroundingMetadata;
use serde_json::Value;

pub const PASTA: &str = r#"{"title":"Pasta","description":"d","prepTime":"10 min","cookTime":"20 min","servings":2,"tips":[{"id":"t1","text":"Use fresh basil"}],"steps":[{"number":1,"instruction":"Boil water"}]}"#;

#[derive(Debug)]
enum Reply {
    Text(Generation),
    Fail { status: u16, message: String },
}

/// Generator double that answers every call the same way and records prompts.
#[derive(Debug)]
pub struct FakeGenerator {
    reply: Reply,
    calls: Mutex<Vec<(String, GenerateOptions)>>,
}

impl FakeGenerator {
    pub fn replying(text: &str) -> Arc<Self> {
        Self::replying_with_grounding(text, None)
    }

    pub fn replying_with_grounding(text: &str, metadata: Option<GroundingMetadata>) -> Arc<Self> {
        Arc::new(Self {
            reply: Reply::Text(Generation {
                text: text.to_string(),
                grounding_metadata: metadata,
            }),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(status: u16, message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Reply::Fail {
                status,
                message: message.to_string(),
            },
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<(String, GenerateOptions)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecipeGenerator for FakeGenerator {
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerateOptions,
    ) -> Result<Generation, GeneratorError> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), *options));

        match &self.reply {
            Reply::Text(generation) => Ok(generation.clone()),
            Reply::Fail { status, message } => Err(GeneratorError::Api {
                status: *status,
                message: message.clone(),
            }),
        }
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}

pub fn recipe_request(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/recipe")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn json_body(response: axum::response::Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
