//! Service layer: the read handlers, the catalog, and their dispatch table.

pub mod blend;
pub mod catalog_service;
pub mod entity_router;
pub mod northwind_service;

pub use catalog_service::CatalogService;
pub use entity_router::{EntityRouter, EntitySet, ReadContext, CATALOG_SERVICE, NORTHWIND_SERVICE};
pub use northwind_service::NorthwindService;
