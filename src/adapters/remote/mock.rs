//! Fixed stand-in for the on-premise product system.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::RemoteProduct;
use crate::domain::ports::ProductSource;

/// Serves the same literal products on every call.
#[derive(Debug, Clone, Default)]
pub struct MockProductSource;

impl MockProductSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProductSource for MockProductSource {
    async fn fetch_product(&self) -> DomainResult<RemoteProduct> {
        Ok(RemoteProduct::new(1, "name1").with_description("description1"))
    }

    async fn fetch_products(&self) -> DomainResult<Vec<RemoteProduct>> {
        Ok(vec![RemoteProduct::new(1, "name1"), RemoteProduct::new(2, "name2")])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixed_values() {
        let source = MockProductSource::new();

        let product = source.fetch_product().await.unwrap();
        assert_eq!(product, RemoteProduct::new(1, "name1").with_description("description1"));

        let products = source.fetch_products().await.unwrap();
        assert_eq!(products.len(), 2);
        assert!(products.iter().all(|p| p.description.is_none()));
    }
}
