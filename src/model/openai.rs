use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde_json::{json, Value};

use super::{CompletionClient, CompletionError, CompletionOptions};
use crate::web::models::Message;

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
pub struct OpenAiClient {
    endpoint: String,
    api_key: Option<String>,
    client: Client,
}

impl OpenAiClient {
    pub fn new(base_url: &str, api_key: Option<String>) -> Self {
        Self {
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            api_key,
            client: Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn send(
        &self,
        messages: &[Message],
        options: &CompletionOptions,
    ) -> Result<String, CompletionError> {
        let payload = request_body(messages, options);
        info!(
            "Sending {} messages to {} (model: {}, max_tokens: {})",
            messages.len(),
            self.endpoint,
            options.model,
            options.max_tokens
        );
        debug!("Payload: {}", payload);

        let mut request = self.client.post(&self.endpoint).json(&payload);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let response_json: Value = response.json().await?;
        debug!("Response JSON: {}", response_json);

        let content = extract_content(&response_json)?;
        info!("Response length: {} characters", content.len());
        Ok(content)
    }
}

fn request_body(messages: &[Message], options: &CompletionOptions) -> Value {
    let mut body = json!({
        "model": options.model,
        "messages": messages,
        "max_tokens": options.max_tokens,
        "temperature": options.temperature,
    });
    if options.json_mode {
        body["response_format"] = json!({ "type": "json_object" });
    }
    body
}

fn extract_content(response: &Value) -> Result<String, CompletionError> {
    response
        .get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(|content| content.as_str())
        .map(str::to_string)
        .ok_or(CompletionError::MissingContent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_url_once() {
        let client = OpenAiClient::new("http://localhost:8081/v1/", None);
        assert_eq!(client.endpoint(), "http://localhost:8081/v1/chat/completions");
    }

    #[test]
    fn chat_body_has_no_response_format() {
        let messages = vec![Message::system("s"), Message::user("u")];
        let body = request_body(&messages, &CompletionOptions::chat("gpt-4o"));
        assert_eq!(body["model"], "gpt-4o");
        assert_eq!(body["max_tokens"], 500);
        assert_eq!(body["temperature"], 0.7);
        assert_eq!(body["messages"][0], json!({ "role": "system", "content": "s" }));
        assert_eq!(body["messages"][1], json!({ "role": "user", "content": "u" }));
        assert!(body.get("response_format").is_none());
    }

    #[test]
    fn json_mode_requests_json_object_format() {
        let body = request_body(&[], &CompletionOptions::problem_generation("gpt-4o"));
        assert_eq!(body["response_format"], json!({ "type": "json_object" }));
        assert_eq!(body["temperature"], 0.8);
    }

    #[test]
    fn content_comes_from_first_choice() {
        let response = json!({
            "choices": [
                { "message": { "role": "assistant", "content": "What is the base case?" } },
                { "message": { "role": "assistant", "content": "ignored" } }
            ]
        });
        assert_eq!(extract_content(&response).unwrap(), "What is the base case?");
    }

    #[test]
    fn missing_or_null_content_is_an_error() {
        for response in [
            json!({ "choices": [] }),
            json!({ "choices": [{ "message": { "content": null } }] }),
            json!({ "error": { "message": "bad" } }),
        ] {
            assert!(matches!(extract_content(&response), Err(CompletionError::MissingContent)));
        }
    }
}
