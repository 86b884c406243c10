//! sidebyside - a side-by-side extension service
//!
//! Serves OData entity sets that blend records from a remote product system
//! with a local book store, plus a small catalog over the books themselves.
//!
//! # Architecture
//!
//! Hexagonal layout:
//!
//! - **Domain Layer** (`domain`): models, errors and the port traits
//! - **Service Layer** (`services`): read handlers, join helpers, dispatch
//! - **Adapters** (`adapters`): SQLite store, remote product source, HTTP
//! - **Infrastructure Layer** (`infrastructure`): configuration and logging
//! - **CLI Layer** (`cli`): command-line interface

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

pub use domain::errors::{DomainError, DomainResult};
pub use domain::models::{Book, Config, CustomProduct, MixinProduct, Product, RemoteProduct};
pub use domain::ports::{BookRepository, ProductSource};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{CatalogService, EntityRouter, NorthwindService};
