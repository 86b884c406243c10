//! Explicit read dispatch.
//!
//! Handlers are registered under `(service, entity)` and invoked by whoever
//! owns the request (the HTTP layer, the CLI, tests) through
//! [`EntityRouter::dispatch`].

use futures::future::{BoxFuture, FutureExt};
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::sync::Arc;
use tracing::debug;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::{BookRepository, ProductSource};
use crate::services::catalog_service::CatalogService;
use crate::services::northwind_service::NorthwindService;

pub const NORTHWIND_SERVICE: &str = "northwind";
pub const CATALOG_SERVICE: &str = "catalog";

/// Everything a read handler is told about the incoming request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadContext {
    pub service: String,
    pub entity: String,
    /// Key from an `Entity(key)` segment
    pub key: Option<i64>,
    /// Raw query options; recorded, not interpreted
    pub query: BTreeMap<String, String>,
}

impl ReadContext {
    pub fn new(service: impl Into<String>, entity: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            entity: entity.into(),
            key: None,
            query: BTreeMap::new(),
        }
    }

    pub fn with_key(mut self, key: i64) -> Self {
        self.key = Some(key);
        self
    }

    pub fn with_query(mut self, query: BTreeMap<String, String>) -> Self {
        self.query = query;
        self
    }

    /// Build a context from a path segment such as `Books`, `Books(201)` or
    /// `Books(ID=201)`.
    pub fn parse(service: &str, segment: &str) -> DomainResult<Self> {
        let (entity, key) = parse_entity_segment(segment)?;
        let ctx = Self::new(service, entity);
        Ok(match key {
            Some(key) => ctx.with_key(key),
            None => ctx,
        })
    }
}

/// Split an OData resource segment into entity name and optional integer key.
pub fn parse_entity_segment(segment: &str) -> DomainResult<(&str, Option<i64>)> {
    let Some(open) = segment.find('(') else {
        return validate_entity_name(segment).map(|name| (name, None));
    };

    let entity = validate_entity_name(&segment[..open])?;
    let inner = segment[open + 1..]
        .strip_suffix(')')
        .ok_or_else(|| DomainError::ValidationFailed(format!("Unbalanced key in segment: {segment}")))?;

    let raw_key = match inner.split_once('=') {
        Some((name, value)) if name.trim().eq_ignore_ascii_case("id") => value.trim(),
        Some((name, _)) => {
            return Err(DomainError::ValidationFailed(format!("Unknown key property: {name}")))
        }
        None => inner.trim(),
    };

    let key = raw_key
        .parse::<i64>()
        .map_err(|_| DomainError::ValidationFailed(format!("Key must be an integer: {raw_key}")))?;

    Ok((entity, Some(key)))
}

fn validate_entity_name(name: &str) -> DomainResult<&str> {
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(DomainError::ValidationFailed(format!("Invalid entity set name: {name:?}")));
    }
    Ok(name)
}

/// The serialized result of one read.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySet {
    pub entity: String,
    pub records: Vec<Value>,
    /// A keyed read that yields one entity rather than a collection
    pub single: bool,
}

impl EntitySet {
    pub fn collection<T: Serialize>(entity: &str, records: &[T]) -> DomainResult<Self> {
        let records = records
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            entity: entity.to_string(),
            records,
            single: false,
        })
    }

    pub fn entity<T: Serialize>(entity: &str, record: &T) -> DomainResult<Self> {
        Ok(Self {
            entity: entity.to_string(),
            records: vec![serde_json::to_value(record)?],
            single: true,
        })
    }
}

pub type ReadHandler = Arc<dyn Fn(ReadContext) -> BoxFuture<'static, DomainResult<EntitySet>> + Send + Sync>;

/// Mapping from `(service, entity)` to read handler.
#[derive(Clone, Default)]
pub struct EntityRouter {
    handlers: HashMap<(String, String), ReadHandler>,
}

impl EntityRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler, replacing any previous one for the same pair.
    pub fn register<F, Fut>(&mut self, service: &str, entity: &str, handler: F) -> &mut Self
    where
        F: Fn(ReadContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = DomainResult<EntitySet>> + Send + 'static,
    {
        let handler: ReadHandler = Arc::new(move |ctx| handler(ctx).boxed());
        self.handlers
            .insert((service.to_string(), entity.to_string()), handler);
        self
    }

    /// Invoke the handler registered for the context's service and entity.
    pub async fn dispatch(&self, ctx: ReadContext) -> DomainResult<EntitySet> {
        let handler = self
            .handlers
            .get(&(ctx.service.clone(), ctx.entity.clone()))
            .cloned()
            .ok_or_else(|| DomainError::UnknownEntity {
                service: ctx.service.clone(),
                entity: ctx.entity.clone(),
            })?;

        debug!(service = %ctx.service, entity = %ctx.entity, key = ?ctx.key, "dispatching read");
        handler(ctx).await
    }

    /// Registered `(service, entity)` pairs, sorted.
    pub fn entities(&self) -> Vec<(String, String)> {
        let mut entities: Vec<_> = self.handlers.keys().cloned().collect();
        entities.sort();
        entities
    }

    /// The router serving the northwind product entities and the book catalog.
    ///
    /// The northwind handlers take no key: `Products(1)` reads the same
    /// records as `Products`. Only `catalog/Books(<id>)` narrows to one entity.
    pub fn standard<S, R>(northwind: Arc<NorthwindService<S, R>>, catalog: Arc<CatalogService<R>>) -> Self
    where
        S: ProductSource + ?Sized + 'static,
        R: BookRepository + ?Sized + 'static,
    {
        let mut router = Self::new();

        let service = northwind.clone();
        router.register(NORTHWIND_SERVICE, "Products", move |ctx| {
            let service = service.clone();
            async move {
                let records = service.read_products(&ctx).await?;
                EntitySet::collection(&ctx.entity, records.as_slice())
            }
        });

        let service = northwind.clone();
        router.register(NORTHWIND_SERVICE, "MixinProducts", move |ctx| {
            let service = service.clone();
            async move {
                let records = service.read_mixin_products(&ctx).await?;
                EntitySet::collection(&ctx.entity, records.as_slice())
            }
        });

        let service = northwind;
        router.register(NORTHWIND_SERVICE, "CustomProducts", move |ctx| {
            let service = service.clone();
            async move {
                let records = service.read_custom_products(&ctx).await?;
                EntitySet::collection(&ctx.entity, records.as_slice())
            }
        });

        router.register(CATALOG_SERVICE, "Books", move |ctx| {
            let catalog = catalog.clone();
            async move {
                match ctx.key {
                    Some(id) => EntitySet::entity(&ctx.entity, &catalog.get_book(id).await?),
                    None => EntitySet::collection(&ctx.entity, catalog.list_books().await?.as_slice()),
                }
            }
        });

        router
    }
}
