mod api;
mod config;
mod database;
mod middleware;
mod models;
mod services;
mod state;
mod utils;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::AppConfig;
use crate::database::{JsonFileUserRepository, JsonLinesFeedbackRepository};
use crate::services::{AuthService, GeminiService, SessionService};
use crate::state::AppState;

fn invalid_input(msg: String) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidInput, msg)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(|e| invalid_input(e.to_string()))?;

    log::info!("🚀 Starting HealthAI chat service...");
    let users = JsonFileUserRepository::new(&config.user_db);
    log::info!("👤 User store: {}", users.path().display());
    log::info!("📝 Feedback log: {}", config.feedback_db);
    log::info!("🤖 AI model: {} (timeout {:?})", config.gemini.model, config.gemini.timeout);

    let gateway = GeminiService::new(config.gemini.clone()).map_err(invalid_input)?;

    let state = AppState {
        auth: AuthService::new(Arc::new(users)),
        sessions: SessionService::from_optional_secret(config.session_secret.as_deref()),
        gateway: Arc::new(gateway),
        feedback: Arc::new(JsonLinesFeedbackRepository::new(&config.feedback_db)),
        ai_model: config.gemini.model.clone(),
    };
    let state_data = web::Data::new(state.clone());

    let host = config.host.clone();
    let port = config.port;
    let cors_origins = config.cors_origins.clone();

    log::info!("🌐 Server starting on {}:{}", host, port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", host, port);

    // Start HTTP server
    HttpServer::new(move || {
        let cors = cors_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec![
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .supports_credentials()
            .max_age(3600);

        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(state_data.clone())
            .wrap(middleware::SessionMiddleware::new(state.sessions.clone()))
            .wrap(cors)
            .wrap(middleware::SecurityHeaders)
            .wrap(actix_web::middleware::from_fn(api::metrics::track_requests))
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi)
            )
            .configure(api::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
