use actix_web::{web, HttpResponse, Responder};
use log::{debug, info};
use serde_json::json;
use uuid::Uuid;

use crate::error::{ApiError, CHAT_UPSTREAM_CONTEXT, GENERATE_UPSTREAM_CONTEXT};
use crate::model::{with_system_prompt, CompletionOptions};
use crate::web::models::{
    ChatRequest, ChatResponse, GenerateProblemRequest, GeneratedProblem, Message,
};
use crate::AppState;

// Health check endpoint
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "healthy" }))
}

// Tutor chat endpoint
pub async fn chat(
    data: web::Data<AppState>,
    req: web::Json<ChatRequest>,
) -> Result<HttpResponse, ApiError> {
    data.config.require_api_key()?;

    let request_id = Uuid::new_v4();
    let ChatRequest { messages, problem, code } = req.into_inner();
    info!(
        "[{}] Chat request for '{}' with {} history messages",
        request_id,
        problem.title,
        messages.len()
    );

    let system_prompt = data.prompts.system_prompt(&problem, &code)?;
    debug!("[{}] System prompt: {}", request_id, system_prompt);

    let messages = with_system_prompt(system_prompt, messages);
    let options = CompletionOptions::chat(&data.config.model);
    let response = data
        .client
        .send(&messages, &options)
        .await
        .map_err(ApiError::upstream(CHAT_UPSTREAM_CONTEXT))?;

    info!("[{}] Tutor replied with {} characters", request_id, response.len());
    Ok(HttpResponse::Ok().json(ChatResponse { response }))
}

// Problem generation endpoint
pub async fn generate_problem(
    data: web::Data<AppState>,
    req: web::Json<GenerateProblemRequest>,
) -> Result<HttpResponse, ApiError> {
    data.config.require_api_key()?;

    let request_id = Uuid::new_v4();
    let difficulty = req.difficulty();
    let category = req.category();
    info!(
        "[{}] Generating problem (difficulty: {}, category: {})",
        request_id, difficulty, category
    );

    let prompt = data.prompts.generation_prompt(difficulty, category)?;
    let options = CompletionOptions::problem_generation(&data.config.model);
    let text = data
        .client
        .send(&[Message::user(prompt)], &options)
        .await
        .map_err(ApiError::upstream(GENERATE_UPSTREAM_CONTEXT))?;
    debug!("[{}] Raw problem JSON: {}", request_id, text);

    let problem = GeneratedProblem::from_completion(&text, difficulty)?;
    info!("[{}] Generated problem '{}'", request_id, problem.title);
    Ok(HttpResponse::Ok().json(problem))
}
