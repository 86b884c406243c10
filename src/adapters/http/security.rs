//! Authentication and CSRF middleware.
//!
//! Both guards are driven by [`SecurityConfig`] flags handed to the router at
//! startup. With `permit_all` every request passes unauthenticated; with
//! `csrf_protection` off mutating requests need no token. That combination is
//! the demo posture and is logged loudly when the router is built.

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap, HeaderValue, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::headers::authorization::Basic;
use axum_extra::headers::Authorization;
use axum_extra::typed_header::TypedHeaderRejection;
use axum_extra::TypedHeader;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

use super::odata::error_response;
use crate::domain::models::SecurityConfig;

pub const CSRF_HEADER: &str = "x-csrf-token";
const CSRF_FETCH: &str = "fetch";
const CSRF_REQUIRED: &str = "Required";
const REALM: &str = "Basic realm=\"sidebyside\"";

/// Security settings plus the per-process CSRF token.
#[derive(Debug)]
pub struct SecurityState {
    config: SecurityConfig,
    csrf_token: String,
}

impl SecurityState {
    pub fn new(config: SecurityConfig) -> Self {
        Self {
            config,
            csrf_token: Uuid::new_v4().simple().to_string(),
        }
    }

    pub fn config(&self) -> &SecurityConfig {
        &self.config
    }

    pub fn csrf_token(&self) -> &str {
        &self.csrf_token
    }

    fn accepts(&self, credentials: &Authorization<Basic>) -> bool {
        self.config
            .users
            .iter()
            .any(|u| u.username == credentials.username() && u.password == credentials.password())
    }

    /// Warn about every guard that is switched off.
    pub fn log_posture(&self) {
        if self.config.permit_all {
            warn!("authentication disabled: all requests are permitted (non-production setting)");
        }
        if !self.config.csrf_protection {
            warn!("CSRF protection disabled (non-production setting)");
        }
    }
}

/// Require HTTP Basic credentials unless `permit_all` is set.
pub async fn authenticate(
    State(security): State<Arc<SecurityState>>,
    credentials: Result<TypedHeader<Authorization<Basic>>, TypedHeaderRejection>,
    req: Request,
    next: Next,
) -> Response {
    if security.config.permit_all {
        return next.run(req).await;
    }

    match credentials {
        Ok(TypedHeader(auth)) if security.accepts(&auth) => {
            debug!(user = auth.username(), "authenticated request");
            next.run(req).await
        }
        Ok(TypedHeader(auth)) => {
            warn!(user = auth.username(), "rejected credentials");
            unauthorized()
        }
        // Missing, or not a decodable Basic header
        Err(rejection) => {
            if !rejection.is_missing() {
                warn!(error = %rejection, "malformed authorization header");
            }
            unauthorized()
        }
    }
}

fn unauthorized() -> Response {
    let mut response = error_response(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", "Authentication required");
    response
        .headers_mut()
        .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static(REALM));
    response
}

/// Hand out the CSRF token on `X-CSRF-Token: Fetch` and demand it on
/// mutating requests, when `csrf_protection` is set.
pub async fn csrf_guard(State(security): State<Arc<SecurityState>>, req: Request, next: Next) -> Response {
    if !security.config.csrf_protection {
        return next.run(req).await;
    }

    if is_mutating(req.method()) {
        if presented_token(req.headers()) != Some(security.csrf_token.as_str()) {
            warn!(method = %req.method(), uri = %req.uri(), "missing or invalid CSRF token");
            let mut response =
                error_response(StatusCode::FORBIDDEN, "CSRF_TOKEN_REQUIRED", "CSRF token validation failed");
            response
                .headers_mut()
                .insert(CSRF_HEADER, HeaderValue::from_static(CSRF_REQUIRED));
            return response;
        }
        return next.run(req).await;
    }

    let wants_token = presented_token(req.headers()).is_some_and(|v| v.eq_ignore_ascii_case(CSRF_FETCH));
    let mut response = next.run(req).await;
    if wants_token {
        match HeaderValue::from_str(&security.csrf_token) {
            Ok(value) => {
                response.headers_mut().insert(CSRF_HEADER, value);
            }
            Err(e) => return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
        }
    }
    response
}

fn is_mutating(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::PATCH | Method::DELETE)
}

fn presented_token(headers: &HeaderMap) -> Option<&str> {
    headers.get(CSRF_HEADER).and_then(|v| v.to_str().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::BasicUser;

    #[test]
    fn test_mutating_methods() {
        assert!(is_mutating(&Method::PATCH));
        assert!(is_mutating(&Method::DELETE));
        assert!(!is_mutating(&Method::GET));
        assert!(!is_mutating(&Method::HEAD));
    }

    #[test]
    fn test_accepts_configured_user_only() {
        let state = SecurityState::new(SecurityConfig {
            permit_all: false,
            csrf_protection: true,
            users: vec![BasicUser {
                username: "alice".to_string(),
                password: "secret".to_string(),
            }],
        });

        assert!(state.accepts(&Authorization::basic("alice", "secret")));
        assert!(!state.accepts(&Authorization::basic("alice", "wrong")));
        assert!(!state.accepts(&Authorization::basic("bob", "secret")));
    }

    #[test]
    fn test_csrf_tokens_differ_per_state() {
        let a = SecurityState::new(SecurityConfig::default());
        let b = SecurityState::new(SecurityConfig::default());
        assert_ne!(a.csrf_token(), b.csrf_token());
        assert_eq!(a.csrf_token().len(), 32);
    }
}
