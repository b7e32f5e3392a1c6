//! Access to the external chat-completion API.

mod openai;

pub use openai::OpenAiClient;

use async_trait::async_trait;
use thiserror::Error;

use crate::web::models::Message;

/// Sampling settings for one completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionOptions {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
    /// Constrain the model's output to a single JSON object.
    pub json_mode: bool,
}

impl CompletionOptions {
    /// Short, varied tutoring replies.
    pub fn chat(model: &str) -> Self {
        Self {
            model: model.to_string(),
            max_tokens: 500,
            temperature: 0.7,
            json_mode: false,
        }
    }

    pub fn problem_generation(model: &str) -> Self {
        Self {
            model: model.to_string(),
            max_tokens: 1000,
            temperature: 0.8,
            json_mode: true,
        }
    }
}

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API request failed with status {status}: {body}")]
    Status {
        status: u16,
        body: String,
    },

    #[error("response contained no message content")]
    MissingContent,
}

#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send the conversation and return the first choice's text.
    async fn send(
        &self,
        messages: &[Message],
        options: &CompletionOptions,
    ) -> Result<String, CompletionError>;
}

/// The system prompt followed by the conversation history, in order.
pub fn with_system_prompt(system_prompt: String, history: Vec<Message>) -> Vec<Message> {
    let mut messages = Vec::with_capacity(history.len() + 1);
    messages.push(Message::system(system_prompt));
    messages.extend(history);
    messages
}
