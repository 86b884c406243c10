//! Common test utilities for integration tests
//!
//! Builds the full router over an in-memory book store and the stand-in
//! product source, and drives it request by request with `oneshot`.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use axum_extra::headers::{Authorization, HeaderMapExt};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower::ServiceExt;

use sidebyside::adapters::http::{build_router, AppState};
use sidebyside::adapters::remote::MockProductSource;
use sidebyside::adapters::sqlite::{create_migrated_test_pool, SqliteBookRepository};
use sidebyside::domain::models::{BasicUser, SecurityConfig, ServerConfig};

pub const USER: &str = "alice";
pub const PASSWORD: &str = "wonderland";

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
}

/// Guarded posture with a single known account.
pub fn guarded() -> SecurityConfig {
    SecurityConfig {
        users: vec![BasicUser {
            username: USER.to_string(),
            password: PASSWORD.to_string(),
        }],
        ..Default::default()
    }
}

/// Router over freshly migrated (and seeded) storage.
pub async fn test_app(security: SecurityConfig) -> TestApp {
    let pool = create_migrated_test_pool().await.expect("Failed to create test pool");
    let state = AppState::new(
        Arc::new(MockProductSource::new()),
        Arc::new(SqliteBookRepository::new(pool.clone())),
    );
    let router = build_router(state, &ServerConfig::default(), security);
    TestApp { router, pool }
}

/// Replace the seeded books with exactly the given rows.
pub async fn replace_books(pool: &SqlitePool, books: &[(i64, &str, i64)]) {
    sqlx::query("DELETE FROM books").execute(pool).await.unwrap();
    for (id, title, stock) in books {
        sqlx::query("INSERT INTO books (id, title, stock) VALUES (?, ?, ?)")
            .bind(id)
            .bind(title)
            .bind(stock)
            .execute(pool)
            .await
            .unwrap();
    }
}

pub struct TestRequest {
    method: Method,
    uri: String,
    credentials: Option<(String, String)>,
    csrf: Option<String>,
    headers: Vec<(&'static str, String)>,
    body: Option<Value>,
    raw_body: Option<String>,
}

pub fn get(uri: &str) -> TestRequest {
    TestRequest::new(Method::GET, uri)
}

pub fn patch(uri: &str, body: Value) -> TestRequest {
    let mut request = TestRequest::new(Method::PATCH, uri);
    request.body = Some(body);
    request
}

/// A PATCH whose body is sent as-is, without a content type.
pub fn patch_raw(uri: &str, body: &str) -> TestRequest {
    let mut request = TestRequest::new(Method::PATCH, uri);
    request.raw_body = Some(body.to_string());
    request
}

impl TestRequest {
    fn new(method: Method, uri: &str) -> Self {
        Self {
            method,
            uri: uri.to_string(),
            credentials: None,
            csrf: None,
            headers: vec![],
            body: None,
            raw_body: None,
        }
    }

    pub fn basic(mut self, user: &str, password: &str) -> Self {
        self.credentials = Some((user.to_string(), password.to_string()));
        self
    }

    pub fn authorized(self) -> Self {
        self.basic(USER, PASSWORD)
    }

    pub fn header(mut self, name: &'static str, value: &str) -> Self {
        self.headers.push((name, value.to_string()));
        self
    }

    pub fn csrf(mut self, token: &str) -> Self {
        self.csrf = Some(token.to_string());
        self
    }

    fn build(self) -> Request<Body> {
        let mut builder = Request::builder().method(self.method).uri(self.uri);
        if let Some(token) = self.csrf {
            builder = builder.header("x-csrf-token", token);
        }
        for (name, value) in self.headers {
            builder = builder.header(name, value);
        }
        let body = match (self.body, self.raw_body) {
            (Some(json), _) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            (None, Some(raw)) => Body::from(raw),
            (None, None) => Body::empty(),
        };

        let mut request = builder.body(body).unwrap();
        if let Some((user, password)) = self.credentials {
            request
                .headers_mut()
                .typed_insert(Authorization::basic(&user, &password));
        }
        request
    }
}

/// Send one request through a clone of the router.
pub async fn send(app: &TestApp, request: TestRequest) -> Response<Body> {
    app.router.clone().oneshot(request.build()).await.unwrap()
}

/// Send one request and decode the JSON body.
pub async fn send_json(app: &TestApp, request: TestRequest) -> (StatusCode, Value) {
    let response = send(app, request).await;
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}
