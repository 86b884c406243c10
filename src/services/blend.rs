//! Fetch-merge-reshape helpers shared by the product handlers.
//!
//! Nothing in here touches I/O: the handlers fetch, these functions join.

use std::collections::HashMap;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{BookTitle, CustomProduct, RemoteProduct};

/// Reduce a keyed lookup to its only row.
///
/// Zero rows is `NotFound`, more than one is `MultipleResults`.
pub fn single<T>(rows: Vec<T>, entity: &str, key: impl ToString) -> DomainResult<T> {
    let count = rows.len();
    let mut rows = rows.into_iter();
    match (rows.next(), count) {
        (Some(row), 1) => Ok(row),
        (None, _) => Err(DomainError::not_found(entity, key)),
        (Some(_), _) => Err(DomainError::MultipleResults {
            entity: entity.to_string(),
            key: key.to_string(),
            count,
        }),
    }
}

/// Left outer join of products with book titles on `id`.
///
/// Every product yields exactly one record, in product order. The title is
/// set iff some row shares the product's id.
pub fn left_join_titles(products: &[RemoteProduct], titles: Vec<BookTitle>) -> Vec<CustomProduct> {
    let titles_by_id: HashMap<i64, String> = titles.into_iter().map(|t| (t.id, t.title)).collect();

    products
        .iter()
        .map(|product| CustomProduct::from_remote(product, titles_by_id.get(&product.id).cloned()))
        .collect()
}

/// Distinct product ids in first-seen order, used as the batch query key set.
pub fn product_ids(products: &[RemoteProduct]) -> Vec<i64> {
    let mut ids: Vec<i64> = Vec::with_capacity(products.len());
    for product in products {
        if !ids.contains(&product.id) {
            ids.push(product.id);
        }
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    fn title(id: i64, title: &str) -> BookTitle {
        BookTitle {
            id,
            title: title.to_string(),
        }
    }

    #[test]
    fn test_single_returns_only_row() {
        assert_eq!(single(vec![7], "Books", 1).unwrap(), 7);
    }

    #[test]
    fn test_single_empty_is_not_found() {
        let err = single(Vec::<i64>::new(), "Books", 1).unwrap_err();
        assert!(matches!(err, DomainError::NotFound { ref key, .. } if key == "1"));
    }

    #[test]
    fn test_single_many_is_error() {
        let err = single(vec![1, 2], "Books", 1).unwrap_err();
        assert!(matches!(err, DomainError::MultipleResults { count: 2, .. }));
    }

    #[test]
    fn test_left_join_partial_match() {
        let products = vec![RemoteProduct::new(1, "name1"), RemoteProduct::new(2, "name2")];
        let merged = left_join_titles(&products, vec![title(1, "T1")]);

        assert_eq!(
            merged,
            vec![
                CustomProduct {
                    id: 1,
                    name: "name1".to_string(),
                    title: Some("T1".to_string()),
                },
                CustomProduct {
                    id: 2,
                    name: "name2".to_string(),
                    title: None,
                },
            ]
        );
    }

    #[test]
    fn test_left_join_keeps_product_order() {
        let products = vec![RemoteProduct::new(3, "c"), RemoteProduct::new(1, "a")];
        let merged = left_join_titles(&products, vec![title(1, "A"), title(3, "C")]);
        let ids: Vec<i64> = merged.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 1]);
        assert_eq!(merged[0].title.as_deref(), Some("C"));
    }

    #[test]
    fn test_left_join_ignores_unrelated_titles() {
        let products = vec![RemoteProduct::new(1, "a")];
        let merged = left_join_titles(&products, vec![title(9, "other")]);
        assert_eq!(merged.len(), 1);
        assert!(merged[0].title.is_none());
    }

    #[test]
    fn test_product_ids_deduplicates() {
        let products = vec![
            RemoteProduct::new(2, "b"),
            RemoteProduct::new(1, "a"),
            RemoteProduct::new(2, "b again"),
        ];
        assert_eq!(product_ids(&products), vec![2, 1]);
    }
}
