use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::models::SessionUser;
use crate::state::AppState;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct SendMessageRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SendMessageResponse {
    pub reply: String,
}

fn error_json(message: &str) -> serde_json::Value {
    serde_json::json!({ "error": message })
}

/// The body is parsed by hand so the session check always runs first
#[utoipa::path(
    post,
    path = "/send_message",
    tag = "Chat",
    request_body = SendMessageRequest,
    responses(
        (status = 200, description = "Reply from the assistant (or a fallback text)", body = SendMessageResponse),
        (status = 400, description = "Empty message or invalid JSON"),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn send_message(
    state: web::Data<AppState>,
    user: Option<SessionUser>,
    body: web::Bytes,
) -> HttpResponse {
    let Some(user) = user else {
        return HttpResponse::Unauthorized().json(error_json("Not logged in"));
    };

    let request: SendMessageRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            log::warn!("❌ POST /send_message - invalid body from {}: {}", user.email, e);
            return HttpResponse::BadRequest().json(error_json("Invalid JSON body"));
        }
    };

    if request.message.trim().is_empty() {
        return HttpResponse::BadRequest().json(error_json("Message cannot be empty"));
    }

    log::info!("💬 POST /send_message - user: {}", user.email);
    let reply = state.gateway.generate_reply(&request.message).await.into_reply();

    HttpResponse::Ok().json(SendMessageResponse { reply })
}
