//! Session middleware
//!
//! Validates the session cookie on every request and attaches the signed-in
//! user to the request extensions. It never rejects a request; the
//! authorization rules in `api::authz` decide what anonymous requests may do.

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpRequest,
    dev::{ServiceRequest, ServiceResponse},
};
use futures_util::future::{Ready, ready};
use tracing::{debug, trace};

use crate::api::constants;
use crate::api::jwt::get_jwt_service;

/// 当前登录用户（由会话中间件写入请求扩展）
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: i64,
    pub email: String,
}

/// 从请求扩展读取当前用户
pub fn current_user(req: &HttpRequest) -> Option<CurrentUser> {
    req.extensions().get::<CurrentUser>().cloned()
}

/// Session validation middleware
#[derive(Clone)]
pub struct SessionAuth;

impl<S, B> Transform<S, ServiceRequest> for SessionAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionAuthMiddleware { service }))
    }
}

pub struct SessionAuthMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for SessionAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = S::Future;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if let Some(cookie) = req.cookie(constants::SESSION_COOKIE_NAME) {
            match get_jwt_service().validate_session_token(cookie.value()) {
                Ok(claims) => {
                    trace!("Session validated for {}", claims.sub);
                    req.extensions_mut().insert(CurrentUser {
                        id: claims.uid,
                        email: claims.sub,
                    });
                }
                Err(e) => {
                    debug!("Session cookie rejected: {}", e);
                }
            }
        }

        self.service.call(req)
    }
}
