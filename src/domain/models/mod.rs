//! Domain models.

pub mod book;
pub mod config;
pub mod product;

pub use book::{Book, BookTitle};
pub use config::{
    BasicUser, Config, DatabaseConfig, LogFormat, LoggingConfig, RemoteConfig, RemoteKind,
    RotationPolicy, SecurityConfig, ServerConfig,
};
pub use product::{CustomProduct, MixinProduct, Product, RemoteProduct};
