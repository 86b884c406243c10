//! Properties of the product/book left join.

use proptest::collection::{btree_set, vec};
use proptest::prelude::*;
use std::collections::HashMap;

use sidebyside::domain::models::{BookTitle, RemoteProduct};
use sidebyside::services::blend::{left_join_titles, product_ids};

fn products() -> impl Strategy<Value = Vec<RemoteProduct>> {
    vec((0i64..50, "[a-z]{1,8}"), 0..20).prop_map(|rows| {
        rows.into_iter()
            .map(|(id, name)| RemoteProduct::new(id, name))
            .collect()
    })
}

fn titles() -> impl Strategy<Value = Vec<BookTitle>> {
    // Distinct ids, as the primary key guarantees
    btree_set(0i64..50, 0..20).prop_map(|ids| {
        ids.into_iter()
            .map(|id| BookTitle {
                id,
                title: format!("title-{id}"),
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn join_preserves_cardinality_and_order(products in products(), titles in titles()) {
        let merged = left_join_titles(&products, titles);

        prop_assert_eq!(merged.len(), products.len());
        for (out, input) in merged.iter().zip(&products) {
            prop_assert_eq!(out.id, input.id);
            prop_assert_eq!(&out.name, &input.name);
        }
    }

    #[test]
    fn title_set_iff_book_matches(products in products(), titles in titles()) {
        let by_id: HashMap<i64, String> = titles.iter().map(|t| (t.id, t.title.clone())).collect();
        let merged = left_join_titles(&products, titles);

        for out in &merged {
            prop_assert_eq!(out.title.as_ref(), by_id.get(&out.id));
        }
    }

    #[test]
    fn product_ids_are_distinct_and_complete(products in products()) {
        let ids = product_ids(&products);

        let mut sorted = ids.clone();
        sorted.sort_unstable();
        sorted.dedup();
        prop_assert_eq!(sorted.len(), ids.len());
        prop_assert!(products.iter().all(|p| ids.contains(&p.id)));
    }
}
