mod config;
mod error;
mod model;
mod prompts;
mod web;

use std::sync::Arc;

use actix_web::{middleware::Logger, web::Data, App, HttpServer};
use anyhow::Context;
use dotenv::dotenv;
use log::{info, warn};

use config::Config;
use model::{CompletionClient, OpenAiClient};
use prompts::PromptBuilder;
use web::routes;

// Shared, read-only state handed to every handler
pub struct AppState {
    pub config: Arc<Config>,
    pub prompts: PromptBuilder,
    pub client: Arc<dyn CompletionClient>,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Initialize environment
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting AI Coach API v{}", env!("CARGO_PKG_VERSION"));

    let config = Arc::new(Config::from_env());
    if config.api_key.is_none() {
        warn!("OPENAI_API_KEY is not set; chat and problem generation will fail until it is");
    }
    let prompts = PromptBuilder::new().context("failed to compile prompt templates")?;
    let client = OpenAiClient::new(&config.api_base_url, config.api_key.clone());
    info!("Using model {} via {}", config.model, client.endpoint());

    let app_state = Data::new(AppState {
        config: config.clone(),
        prompts,
        client: Arc::new(client),
    });

    info!("Listening on {}", config.bind_address);
    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(web::cors(&app_state.config.allowed_origins))
            .wrap(Logger::default())
            .configure(routes::configure)
    })
    .bind(config.bind_address.as_str())
    .with_context(|| format!("failed to bind {}", config.bind_address))?
    .run()
    .await?;

    Ok(())
}
