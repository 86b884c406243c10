//! OData HTTP server.
//!
//! Exposes the registered entity sets under `/odata/v4/{service}/{segment}`
//! and the catalog stock update as `PATCH`.

use axum::{
    extract::rejection::JsonRejection,
    extract::{Path, Query, State},
    middleware,
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::odata::{entity_set_payload, ODataError};
use super::security::{authenticate, csrf_guard, SecurityState};
use crate::domain::errors::DomainError;
use crate::domain::models::{SecurityConfig, ServerConfig};
use crate::domain::ports::{BookRepository, ProductSource};
use crate::services::catalog_service::CatalogService;
use crate::services::entity_router::{EntityRouter, EntitySet, ReadContext, CATALOG_SERVICE};
use crate::services::northwind_service::NorthwindService;

/// Shared state for the OData routes.
#[derive(Clone)]
pub struct AppState {
    pub entities: Arc<EntityRouter>,
    pub catalog: Arc<CatalogService<dyn BookRepository>>,
}

impl AppState {
    pub fn new(products: Arc<dyn ProductSource>, books: Arc<dyn BookRepository>) -> Self {
        let catalog: Arc<CatalogService<dyn BookRepository>> = Arc::new(CatalogService::new(books.clone()));
        let northwind = Arc::new(NorthwindService::new(products, books));

        Self {
            entities: Arc::new(EntityRouter::standard(northwind, catalog.clone())),
            catalog,
        }
    }
}

/// Body of a stock update.
#[derive(Debug, Deserialize)]
pub struct StockUpdate {
    pub stock: i64,
}

/// Build the router. The security posture is an explicit argument so the
/// caller always decides it.
pub fn build_router(state: AppState, config: &ServerConfig, security: SecurityConfig) -> Router {
    let security = Arc::new(SecurityState::new(security));
    security.log_posture();

    let odata = Router::new()
        .route("/odata/v4/{service}", get(service_document))
        .route("/odata/v4/{service}/{segment}", get(read_entity).patch(patch_entity))
        .layer(middleware::from_fn_with_state(security.clone(), csrf_guard))
        .layer(middleware::from_fn_with_state(security, authenticate))
        .with_state(state);

    let app = Router::new().route("/health", get(health_check)).merge(odata);

    if config.enable_cors {
        app.layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
            .layer(TraceLayer::new_for_http())
    } else {
        app.layer(TraceLayer::new_for_http())
    }
}

/// HTTP server for the OData service.
pub struct HttpServer {
    config: ServerConfig,
    security: SecurityConfig,
    state: AppState,
}

impl HttpServer {
    pub fn new(state: AppState, config: ServerConfig, security: SecurityConfig) -> Self {
        Self { config, security, state }
    }

    pub fn router(&self) -> Router {
        build_router(self.state.clone(), &self.config, self.security.clone())
    }

    /// Start the server.
    pub async fn serve(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.serve_with_shutdown(std::future::pending()).await
    }

    /// Start the server with a shutdown signal.
    pub async fn serve_with_shutdown<F>(
        self,
        shutdown: F,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port).parse()?;
        let router = self.router();

        let listener = TcpListener::bind(addr).await?;
        tracing::info!("OData server listening on {}", addr);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;
        Ok(())
    }
}

// Handler functions

async fn health_check() -> &'static str {
    "OK"
}

async fn service_document(
    State(state): State<AppState>,
    Path(service): Path<String>,
) -> Result<Json<Value>, ODataError> {
    let sets: Vec<Value> = state
        .entities
        .entities()
        .into_iter()
        .filter(|(s, _)| *s == service)
        .map(|(_, entity)| json!({"name": entity, "kind": "EntitySet", "url": entity}))
        .collect();

    if sets.is_empty() {
        return Err(DomainError::UnknownEntity {
            service,
            entity: String::new(),
        }
        .into());
    }

    Ok(Json(json!({"@odata.context": "$metadata", "value": sets})))
}

async fn read_entity(
    State(state): State<AppState>,
    Path((service, segment)): Path<(String, String)>,
    Query(query): Query<BTreeMap<String, String>>,
) -> Result<Json<Value>, ODataError> {
    let ctx = ReadContext::parse(&service, &segment)?.with_query(query);
    let set = state.entities.dispatch(ctx).await?;
    Ok(Json(entity_set_payload(set)))
}

async fn patch_entity(
    State(state): State<AppState>,
    Path((service, segment)): Path<(String, String)>,
    body: Result<Json<StockUpdate>, JsonRejection>,
) -> Result<Json<Value>, ODataError> {
    let ctx = ReadContext::parse(&service, &segment)?;
    let Json(update) = body.map_err(|rejection| {
        DomainError::ValidationFailed(format!("Invalid request body: {}", rejection.body_text()))
    })?;

    match (ctx.service.as_str(), ctx.entity.as_str(), ctx.key) {
        (CATALOG_SERVICE, "Books", Some(id)) => {
            let book = state.catalog.update_stock(id, update.stock).await?;
            Ok(Json(entity_set_payload(EntitySet::entity(&ctx.entity, &book)?)))
        }
        (_, _, None) => Err(DomainError::ValidationFailed(format!(
            "PATCH requires a keyed segment such as {}(1)",
            ctx.entity
        ))
        .into()),
        _ => Err(DomainError::ValidationFailed(format!(
            "{}/{} is read-only",
            ctx.service, ctx.entity
        ))
        .into()),
    }
}
