use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ApiError;

pub const DEFAULT_DIFFICULTY: &str = "Easy";
pub const DEFAULT_CATEGORY_HINT: &str =
    "any category (Arrays, Strings, Hash Tables, Two Pointers, etc.)";

const FALLBACK_TITLE: &str = "Generated Problem";
const FALLBACK_CATEGORY: &str = "General";
const FALLBACK_ESTIMATED_TIME: &str = "15 min";
const FALLBACK_STARTER_CODE: &str = "# Your solution here\n";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    pub input: String,
    pub output: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Problem {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub examples: Vec<Example>,
}

/// One turn of a conversation. The role is forwarded as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<Message>,
    pub problem: Problem,
    pub code: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GenerateProblemRequest {
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl GenerateProblemRequest {
    /// Requested difficulty, with blank values treated as absent.
    pub fn difficulty(&self) -> &str {
        non_blank(&self.difficulty).unwrap_or(DEFAULT_DIFFICULTY)
    }

    pub fn category(&self) -> &str {
        non_blank(&self.category).unwrap_or(DEFAULT_CATEGORY_HINT)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedProblem {
    pub title: String,
    pub description: String,
    pub difficulty: String,
    pub category: String,
    pub estimated_time: String,
    pub examples: Vec<Example>,
    pub starter_code: String,
}

/// The model's JSON as returned; any field may be missing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedProblemDraft {
    title: Option<String>,
    description: Option<String>,
    difficulty: Option<String>,
    category: Option<String>,
    estimated_time: Option<String>,
    examples: Option<Vec<Example>>,
    starter_code: Option<String>,
}

impl GeneratedProblem {
    /// Parse the completion text, filling absent fields with fallbacks.
    ///
    /// The document must be a JSON object; `null` fields count as absent.
    /// Examples are not defaulted one by one: an entry without `input` or
    /// `output` fails the whole parse.
    pub fn from_completion(text: &str, requested_difficulty: &str) -> Result<Self, ApiError> {
        let fields: Map<String, Value> = serde_json::from_str(text)?;
        let draft: GeneratedProblemDraft = serde_json::from_value(Value::Object(fields))?;
        Ok(Self {
            title: draft.title.unwrap_or_else(|| FALLBACK_TITLE.to_string()),
            description: draft.description.unwrap_or_default(),
            difficulty: draft.difficulty.unwrap_or_else(|| requested_difficulty.to_string()),
            category: draft.category.unwrap_or_else(|| FALLBACK_CATEGORY.to_string()),
            estimated_time: draft
                .estimated_time
                .unwrap_or_else(|| FALLBACK_ESTIMATED_TIME.to_string()),
            examples: draft.examples.unwrap_or_default(),
            starter_code: draft
                .starter_code
                .unwrap_or_else(|| FALLBACK_STARTER_CODE.to_string()),
        })
    }
}
