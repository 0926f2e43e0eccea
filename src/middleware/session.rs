use actix_web::{
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};

use crate::models::SessionUser;
use crate::services::{SessionService, SESSION_COOKIE};

/// Decodes the session cookie once per request and stores the resulting
/// `SessionUser` in the request extensions. Never rejects a request:
/// gating is up to each handler.
pub struct SessionMiddleware {
    sessions: SessionService,
}

impl SessionMiddleware {
    pub fn new(sessions: SessionService) -> Self {
        Self { sessions }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionMiddlewareService {
            service,
            sessions: self.sessions.clone(),
        }))
    }
}

pub struct SessionMiddlewareService<S> {
    service: S,
    sessions: SessionService,
}

impl<S, B> Service<ServiceRequest> for SessionMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if let Some(cookie) = req.cookie(SESSION_COOKIE) {
            match self.sessions.verify(cookie.value()) {
                Ok(user) => {
                    req.extensions_mut().insert(user);
                }
                Err(e) => log::debug!("🍪 Ignoring session cookie on {}: {}", req.path(), e),
            }
        }

        let fut = self.service.call(req);
        Box::pin(async move {
            let res = fut.await?;
            Ok(res)
        })
    }
}

/// Handlers take `Option<SessionUser>` to branch on login state, or
/// `SessionUser` to reject anonymous requests with 401.
impl FromRequest for SessionUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<SessionUser>()
                .cloned()
                .ok_or_else(|| actix_web::error::ErrorUnauthorized("Not logged in")),
        )
    }
}
