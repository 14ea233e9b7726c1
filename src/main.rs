mod api;
mod config;
mod database;
mod models;
mod services;
mod state;
#[cfg(test)]
mod test_support;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::{Compress, Logger}, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::{Config, StoreBackend};
use crate::database::{DocumentStore, MemoryStore, MongoDB};
use crate::services::OpenAiClient;
use crate::state::AppState;

fn startup_error(e: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env().map_err(startup_error)?;

    log::info!("🚀 Starting School Service...");

    let store: Arc<dyn DocumentStore> = match (&config.store_backend, &config.database_url) {
        (StoreBackend::MongoDb, Some(url)) => {
            log::info!("📊 Database: {}", config.database_name);
            let db = MongoDB::new(url, &config.database_name).await.map_err(startup_error)?;
            log::info!("✅ MongoDB connected successfully");
            Arc::new(db)
        }
        (StoreBackend::MongoDb, None) => {
            return Err(startup_error("MongoDB backend selected without a database URL"));
        }
        (StoreBackend::Memory, _) => {
            log::warn!("⚠️  Using in-memory store: data is lost on restart");
            Arc::new(MemoryStore::new())
        }
    };

    if config.openai_api_key.is_none() {
        log::warn!("⚠️  OPENAI_API_KEY not set: /ai-chat and /generate-questions will fail");
    }
    let llm = OpenAiClient::new(
        config.openai_base_url.clone(),
        config.openai_model.clone(),
        config.openai_api_key.clone(),
        config.llm_timeout_secs,
    )
    .map_err(startup_error)?;
    log::info!("🤖 LLM model: {}", config.openai_model);

    let state = web::Data::new(AppState::new(store.clone(), Arc::new(llm)));

    log::info!("🌐 Server starting on {}:{}", config.host, config.port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", config.host, config.port);

    let openapi = api::swagger::ApiDoc::openapi();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Compress::default())
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone())
            )
            .configure(api::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run();

    let result = server.await;

    store.shutdown().await;
    log::info!("👋 School Service stopped");

    result
}
