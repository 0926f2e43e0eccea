pub mod health;
pub mod metrics;
pub mod auth;
pub mod pages;
pub mod chat;
pub mod feedback;
pub mod swagger;

use actix_web::web;

/// Registers every route of the service
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        // Pages
        .route("/", web::get().to(pages::home))
        .route("/about", web::get().to(pages::about))
        .route("/services", web::get().to(pages::services))
        .route("/chat", web::get().to(pages::chat))
        .route("/dashboard", web::get().to(pages::dashboard))
        // Auth forms
        .route("/login", web::get().to(pages::login_form))
        .route("/login", web::post().to(auth::login))
        .route("/signup", web::post().to(auth::signup))
        .route("/logout", web::get().to(auth::logout))
        // Chat API
        .route("/send_message", web::post().to(chat::send_message))
        .route("/feedback", web::post().to(feedback::submit_feedback))
        // Health check
        .route("/health", web::get().to(health::health_check))
        // Metrics
        .route("/metrics", web::get().to(metrics::get_metrics));
}
