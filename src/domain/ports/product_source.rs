//! Remote product source port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::RemoteProduct;

/// Interface to the on-premise product system.
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Fetch the single product served by the single-record handlers.
    async fn fetch_product(&self) -> DomainResult<RemoteProduct>;

    /// Fetch the product list served by the batch handler.
    async fn fetch_products(&self) -> DomainResult<Vec<RemoteProduct>>;
}
