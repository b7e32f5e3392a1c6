//! Request-level error type.
//!
//! Handlers return `Result<HttpResponse, ApiError>`; actix-web turns the error
//! into a `{"detail": "..."}` JSON body through [`ResponseError`].

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::error;
use serde_json::json;
use thiserror::Error;

use crate::model::CompletionError;

pub const CHAT_UPSTREAM_CONTEXT: &str = "Error communicating with OpenAI";
pub const GENERATE_UPSTREAM_CONTEXT: &str = "Error generating problem";

#[derive(Debug, Error)]
pub enum ApiError {
    /// No API credential; raised before any outbound call.
    #[error("OpenAI API key not configured. Please set OPENAI_API_KEY environment variable.")]
    Configuration,

    /// The completion API call failed or returned nothing usable.
    #[error("{context}: {source}")]
    Upstream {
        context: &'static str,
        #[source]
        source: CompletionError,
    },

    /// The model's output could not be read as a generated problem.
    #[error("Error parsing AI response: {0}")]
    ResponseParse(#[from] serde_json::Error),

    #[error("Error rendering prompt: {0}")]
    Prompt(#[from] tera::Error),

    /// Request body rejected before reaching a handler.
    #[error("{0}")]
    InvalidRequest(String),
}

impl ApiError {
    pub fn upstream(context: &'static str) -> impl FnOnce(CompletionError) -> Self {
        move |source| ApiError::Upstream { context, source }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!("{}", self);
        }
        HttpResponse::build(status).json(json!({ "detail": self.to_string() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_message_carries_context_and_cause() {
        let err = ApiError::upstream(CHAT_UPSTREAM_CONTEXT)(CompletionError::MissingContent);
        assert_eq!(
            err.to_string(),
            "Error communicating with OpenAI: response contained no message content"
        );
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn invalid_request_is_unprocessable() {
        let err = ApiError::InvalidRequest("missing field `code`".into());
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
