use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::models::{FeedbackEntry, SessionUser};
use crate::state::AppState;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct FeedbackRequest {
    #[serde(default)]
    pub sentiment: Option<String>,
    #[serde(default)]
    pub concern: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct FeedbackResponse {
    pub status: String,
}

#[utoipa::path(
    post,
    path = "/feedback",
    tag = "Chat",
    request_body = FeedbackRequest,
    responses(
        (status = 200, description = "Feedback stored", body = FeedbackResponse),
        (status = 400, description = "Invalid JSON"),
        (status = 401, description = "Not logged in"),
        (status = 500, description = "Feedback could not be stored")
    )
)]
pub async fn submit_feedback(
    state: web::Data<AppState>,
    user: Option<SessionUser>,
    body: web::Bytes,
) -> HttpResponse {
    let Some(user) = user else {
        return HttpResponse::Unauthorized().json(serde_json::json!({ "error": "Not logged in" }));
    };

    let request: FeedbackRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            log::warn!("❌ POST /feedback - invalid body from {}: {}", user.email, e);
            return HttpResponse::BadRequest().json(serde_json::json!({ "error": "Invalid JSON body" }));
        }
    };

    log::info!("📝 POST /feedback - user: {}", user.email);

    let entry = FeedbackEntry {
        user: user.email,
        sentiment: request.sentiment,
        concern: request.concern,
        timestamp: Utc::now(),
    };

    match state.feedback.append(&entry).await {
        Ok(()) => HttpResponse::Ok().json(FeedbackResponse {
            status: "Feedback received".to_string(),
        }),
        Err(e) => {
            log::error!("❌ Failed to store feedback: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": "Feedback could not be stored"
            }))
        }
    }
}
