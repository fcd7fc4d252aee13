//! Property-based tests for product validation and service invariants.
//!
//! These run against the in-memory store so each case stays cheap.

use std::sync::Arc;

use assert_matches::assert_matches;
use inventory_api::{
    dto::product::{CreateProductRequest, DESCRIPTION_TOO_LONG, NAME_REQUIRED, NAME_TOO_LONG, QUANTITY_NEGATIVE},
    entities::product::NewProduct,
    errors::ServiceError,
    repositories::{InMemoryProductStore, ProductStore},
    services::ProductService,
};
use proptest::prelude::*;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime")
}

// Strategies for generating test data
fn name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9][A-Za-z0-9 ]{0,48}[A-Za-z0-9]?"
}

fn description_strategy() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("[a-z ]{0,200}")
}

fn quantity_strategy() -> impl Strategy<Value = i32> {
    0i32..1_000_000
}

fn product_strategy() -> impl Strategy<Value = NewProduct> {
    (name_strategy(), description_strategy(), quantity_strategy()).prop_map(
        |(name, description, quantity)| NewProduct {
            name,
            description,
            quantity,
        },
    )
}

fn request(name: Option<String>, description: Option<String>, quantity: Option<i32>) -> CreateProductRequest {
    CreateProductRequest {
        name,
        description,
        quantity,
    }
}

fn rejection_message(req: CreateProductRequest) -> Option<String> {
    match req.into_new_product() {
        Ok(_) => None,
        Err(ServiceError::ValidationError(msg)) => Some(msg),
        Err(other) => panic!("unexpected error: {other:?}"),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn valid_payloads_always_pass(
        name in name_strategy(),
        description in description_strategy(),
        quantity in quantity_strategy(),
    ) {
        let product = request(Some(name.clone()), description.clone(), Some(quantity))
            .into_new_product();
        prop_assert!(product.is_ok());
        let product = product.unwrap();
        prop_assert_eq!(product.name, name);
        prop_assert_eq!(product.description, description);
        prop_assert_eq!(product.quantity, quantity);
    }

    #[test]
    fn blank_names_are_always_required(name in "[ \t]{0,60}", quantity in quantity_strategy()) {
        let msg = rejection_message(request(Some(name), None, Some(quantity)));
        prop_assert_eq!(msg.as_deref(), Some(NAME_REQUIRED));
    }

    #[test]
    fn overlong_names_are_rejected(name in "[a-z]{51,80}") {
        let msg = rejection_message(request(Some(name), None, Some(1)));
        prop_assert_eq!(msg.as_deref(), Some(NAME_TOO_LONG));
    }

    #[test]
    fn overlong_descriptions_are_rejected(description in "[a-z]{201,260}") {
        let msg = rejection_message(request(Some("Pen".into()), Some(description), Some(1)));
        prop_assert_eq!(msg.as_deref(), Some(DESCRIPTION_TOO_LONG));
    }

    #[test]
    fn negative_quantities_are_rejected(quantity in i32::MIN..0) {
        let msg = rejection_message(request(Some("Pen".into()), None, Some(quantity)));
        prop_assert_eq!(msg.as_deref(), Some(QUANTITY_NEGATIVE));
    }

    #[test]
    fn name_violation_is_reported_before_later_fields(
        description in "[a-z]{201,220}",
        quantity in i32::MIN..0,
    ) {
        let msg = rejection_message(request(None, Some(description), Some(quantity)));
        prop_assert_eq!(msg.as_deref(), Some(NAME_REQUIRED));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn add_assigns_fresh_ids_and_preserves_fields(products in proptest::collection::vec(product_strategy(), 1..20)) {
        let rt = runtime();
        rt.block_on(async {
            let store = Arc::new(InMemoryProductStore::new());
            let service = ProductService::new(store.clone());

            let mut ids = Vec::new();
            for draft in &products {
                let created = service.add(draft.clone()).await.unwrap();
                assert_eq!(created.name, draft.name);
                assert_eq!(created.description, draft.description);
                assert_eq!(created.quantity, draft.quantity);
                assert!(!ids.contains(&created.id));
                ids.push(created.id);
            }

            assert_eq!(service.get_all().await.unwrap().len(), products.len());
        });
    }

    #[test]
    fn get_all_counts_only_surviving_products(
        products in proptest::collection::vec(product_strategy(), 1..20),
        delete_mask in proptest::collection::vec(any::<bool>(), 20),
    ) {
        let rt = runtime();
        rt.block_on(async {
            let service = ProductService::new(Arc::new(InMemoryProductStore::new()));

            let mut survivors = 0;
            for (draft, delete) in products.iter().zip(delete_mask.iter()) {
                let created = service.add(draft.clone()).await.unwrap();
                if *delete {
                    service.delete(created.id).await.unwrap();
                    assert_matches!(service.delete(created.id).await, Err(ServiceError::NotFound(_)));
                } else {
                    survivors += 1;
                }
            }

            assert_eq!(service.get_all().await.unwrap().len(), survivors);
        });
    }

    #[test]
    fn update_quantity_changes_only_quantity(draft in product_strategy(), quantity in quantity_strategy()) {
        let rt = runtime();
        rt.block_on(async {
            let store = Arc::new(InMemoryProductStore::new());
            let service = ProductService::new(store.clone());
            let created = service.add(draft).await.unwrap();

            let updated = service.update_quantity(created.id, Some(quantity)).await.unwrap();
            assert_eq!(updated.id, created.id);
            assert_eq!(updated.name, created.name);
            assert_eq!(updated.description, created.description);
            assert_eq!(updated.quantity, quantity);

            let stored = store.find_by_id(created.id).await.unwrap().unwrap();
            assert_eq!(stored, updated);
        });
    }

    #[test]
    fn negative_update_leaves_stored_quantity(draft in product_strategy(), quantity in i32::MIN..0) {
        let rt = runtime();
        rt.block_on(async {
            let store = Arc::new(InMemoryProductStore::new());
            let service = ProductService::new(store.clone());
            let created = service.add(draft).await.unwrap();

            assert_matches!(
                service.update_quantity(created.id, Some(quantity)).await,
                Err(ServiceError::ValidationError(msg)) if msg == QUANTITY_NEGATIVE
            );
            let stored = store.find_by_id(created.id).await.unwrap().unwrap();
            assert_eq!(stored.quantity, created.quantity);
        });
    }

    #[test]
    fn update_on_missing_id_is_not_found_for_any_quantity(id in 1i32..1000, quantity in proptest::option::of(any::<i32>())) {
        let rt = runtime();
        rt.block_on(async {
            let service = ProductService::new(Arc::new(InMemoryProductStore::new()));
            assert_matches!(
                service.update_quantity(id, quantity).await,
                Err(ServiceError::NotFound(_))
            );
        });
    }
}
