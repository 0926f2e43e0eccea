use actix_web::{
    cookie::{Cookie, SameSite},
    web, HttpResponse,
};

use crate::api::pages::{login_page, redirect};
use crate::models::SessionUser;
use crate::services::auth_service::{LoginRequest, RegisterRequest};
use crate::services::SESSION_COOKIE;
use crate::state::AppState;
use crate::utils::AuthError;

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish()
}

/// Signs the session and sends the browser to the dashboard
fn start_session(state: &AppState, user: SessionUser) -> HttpResponse {
    match state.sessions.issue(&user) {
        Ok(token) => {
            let mut response = redirect("/dashboard");
            if let Err(e) = response.add_cookie(&session_cookie(token)) {
                log::error!("❌ Failed to set session cookie: {}", e);
                return HttpResponse::InternalServerError().finish();
            }
            response
        }
        Err(e) => {
            log::error!("❌ {}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

fn visible_message(e: &AuthError, fallback: &str) -> String {
    if e.is_user_facing() {
        e.to_string()
    } else {
        fallback.to_string()
    }
}

pub async fn login(
    state: web::Data<AppState>,
    current: Option<SessionUser>,
    form: web::Form<LoginRequest>,
) -> HttpResponse {
    if current.is_some() {
        return redirect("/dashboard");
    }
    log::info!("🔐 POST /login - email: {}", form.email);

    match state.auth.verify(&form.email, &form.password).await {
        Ok(profile) => {
            log::info!("✅ Login successful: {}", form.email);
            start_session(&state, SessionUser::from(profile))
        }
        Err(e) => {
            log::warn!("❌ Login failed: {} - {}", form.email, e);
            let message = visible_message(&e, "Login is temporarily unavailable");
            login_page(Some(&message), None, false)
        }
    }
}

pub async fn signup(
    state: web::Data<AppState>,
    form: web::Form<RegisterRequest>,
) -> HttpResponse {
    log::info!("📝 POST /signup - email: {}", form.email);

    let result = state
        .auth
        .register(&form.email, &form.password, &form.first_name, &form.last_name)
        .await;

    match result {
        Ok(()) => {
            log::info!("✅ Registration successful: {}", form.email);
            let form = form.into_inner();
            start_session(
                &state,
                SessionUser {
                    email: form.email,
                    first_name: form.first_name,
                    last_name: form.last_name,
                },
            )
        }
        Err(e) => {
            log::warn!("❌ Registration failed: {} - {}", form.email, e);
            let message = visible_message(&e, "Registration is temporarily unavailable");
            login_page(None, Some(&message), true)
        }
    }
}

pub async fn logout() -> HttpResponse {
    log::info!("👋 GET /logout");

    let mut response = redirect("/");
    let mut removal = session_cookie(String::new());
    removal.make_removal();
    if let Err(e) = response.add_cookie(&removal) {
        log::error!("❌ Failed to clear session cookie: {}", e);
    }
    response
}
