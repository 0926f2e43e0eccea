use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HealthAI Chat API",
        version = "1.0.0",
        description = "JSON endpoints of the HealthAI chat service.\n\n**Authentication:** chat and feedback endpoints require the `session` cookie set by `/login` or `/signup`.\n\n**Chat failures** never surface as errors: the reply carries a fixed fallback text instead."
    ),
    paths(
        // Chat
        crate::api::chat::send_message,
        crate::api::feedback::submit_feedback,

        // Health & Metrics
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,
    ),
    components(
        schemas(
            crate::api::chat::SendMessageRequest,
            crate::api::chat::SendMessageResponse,
            crate::api::feedback::FeedbackRequest,
            crate::api::feedback::FeedbackResponse,
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Chat", description = "Assistant replies and user feedback. Require a signed-in session."),
        (name = "Health", description = "Health check and system metrics endpoints for monitoring service status."),
    )
)]
pub struct ApiDoc;
