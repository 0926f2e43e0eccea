use std::sync::Arc;

use crate::database::FeedbackRepository;
use crate::services::{AuthService, ReplyGenerator, SessionService};

/// Shared, immutable handles injected into every handler
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub sessions: SessionService,
    pub gateway: Arc<dyn ReplyGenerator>,
    pub feedback: Arc<dyn FeedbackRepository>,
    pub ai_model: String,
}
