//! Recipe and grounding types exchanged with clients and the generator.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub title: String,
    pub description: String,
    pub prep_time: String,
    pub cook_time: String,
    pub servings: i64,
    pub tips: Vec<Tip>,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tip {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub number: i64,
    pub instruction: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

/// A way in which a parsed recipe breaks the shape clients rely on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecipeIssue {
    #[error("servings must be positive, got {0}")]
    NonPositiveServings(i64),

    #[error("step at position {position} is numbered {number}")]
    StepOutOfSequence { position: usize, number: i64 },

    #[error("tip id {0:?} is used more than once")]
    DuplicateTipId(String),
}

impl Recipe {
    /// Lists invariant violations: positive servings, steps numbered `1..=n`
    /// in order, and tip ids unique within the recipe.
    pub fn issues(&self) -> Vec<RecipeIssue> {
        let mut issues = Vec::new();

        if self.servings <= 0 {
            issues.push(RecipeIssue::NonPositiveServings(self.servings));
        }

        for (index, step) in self.steps.iter().enumerate() {
            let position = index + 1;
            if step.number != position as i64 {
                issues.push(RecipeIssue::StepOutOfSequence {
                    position,
                    number: step.number,
                });
            }
        }

        let mut seen = HashSet::new();
        for tip in &self.tips {
            if !seen.insert(tip.id.as_str()) {
                issues.push(RecipeIssue::DuplicateTipId(tip.id.clone()));
            }
        }

        issues
    }
}

/// Citation data attached to a grounded answer.
///
/// Fields the service does not know about are kept in `extra` so the
/// metadata reaches the client exactly as the generator produced it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grounding_chunks: Option<Vec<GroundingChunk>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_entry_point: Option<SearchEntryPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_search_queries: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroundingChunk {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web: Option<WebSource>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Pre-rendered search widget markup. Third-party content: pass through, never trust.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchEntryPoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rendered_content: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GroundingMetadata {
    /// Interprets raw metadata. Shapes the typed view cannot hold are kept
    /// whole in `extra`, so the client still receives them unchanged.
    pub fn from_raw(raw: Map<String, Value>) -> Self {
        match Self::deserialize(Value::Object(raw.clone())) {
            Ok(metadata) => metadata,
            Err(err) => {
                warn!(error = %err, "grounding metadata kept without interpretation");
                Self {
                    extra: raw,
                    ..Self::default()
                }
            }
        }
    }

    pub fn web_sources(&self) -> impl Iterator<Item = &WebSource> {
        self.grounding_chunks
            .iter()
            .flatten()
            .filter_map(|chunk| chunk.web.as_ref())
    }
}
