//! Northwind service: the three product read handlers.
//!
//! Each handler pulls from the remote product source, optionally correlates
//! with the local book store by id, and reshapes into the served record.

use std::sync::Arc;
use tracing::{debug, instrument};

use crate::domain::errors::DomainResult;
use crate::domain::models::{CustomProduct, MixinProduct, Product};
use crate::domain::ports::{BookRepository, ProductSource};
use crate::services::blend;
use crate::services::entity_router::ReadContext;

/// Entity name used when a book lookup fails.
const BOOKS_ENTITY: &str = "Books";

pub struct NorthwindService<S: ProductSource + ?Sized, R: BookRepository + ?Sized> {
    products: Arc<S>,
    books: Arc<R>,
}

impl<S: ProductSource + ?Sized, R: BookRepository + ?Sized> NorthwindService<S, R> {
    pub fn new(products: Arc<S>, books: Arc<R>) -> Self {
        Self { products, books }
    }

    /// `Products`: one remote product, copied field by field.
    #[instrument(skip_all, fields(entity = %ctx.entity))]
    pub async fn read_products(&self, ctx: &ReadContext) -> DomainResult<Vec<Product>> {
        let remote = self.products.fetch_product().await?;
        debug!(product_id = remote.id, "fetched remote product");

        Ok(vec![Product::from_remote(&remote)])
    }

    /// `MixinProducts`: one remote product enriched with the title of the
    /// book sharing its id.
    ///
    /// The book must exist exactly once; otherwise the read fails rather
    /// than serving a record with an empty enrichment.
    #[instrument(skip_all, fields(entity = %ctx.entity))]
    pub async fn read_mixin_products(&self, ctx: &ReadContext) -> DomainResult<Vec<MixinProduct>> {
        let remote = self.products.fetch_product().await?;

        let rows = self.books.find_title_by_id(remote.id).await?;
        let book = blend::single(rows, BOOKS_ENTITY, remote.id)?;
        debug!(product_id = remote.id, title = %book.title, "matched book");

        Ok(vec![MixinProduct::from_remote(&remote, Some(book.title))])
    }

    /// `CustomProducts`: every remote product, each enriched with a book
    /// title when one matches. One batched store query for the whole list.
    #[instrument(skip_all, fields(entity = %ctx.entity))]
    pub async fn read_custom_products(&self, ctx: &ReadContext) -> DomainResult<Vec<CustomProduct>> {
        let remote = self.products.fetch_products().await?;
        if remote.is_empty() {
            return Ok(vec![]);
        }

        let ids = blend::product_ids(&remote);
        let titles = self.books.find_titles_by_ids(&ids).await?;
        let matched = titles.len();

        let merged = blend::left_join_titles(&remote, titles);
        debug!(products = merged.len(), matched, "merged products with books");

        Ok(merged)
    }
}
