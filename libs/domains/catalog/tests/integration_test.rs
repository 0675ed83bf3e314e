//! Integration tests for the Catalog domain
//!
//! These tests use real MongoDB via testcontainers to ensure:
//! - Keyed reads and writes map onto the right collection
//! - Duplicate keys and missing documents surface as domain errors
//! - In-place quantity updates leave the rest of the body alone
//! - Text search returns keys in score order, hydrated in that order

use domain_catalog::{
    MongoProductRepository, ProductBody, ProductError, ProductInput, ProductRepository,
    ProductService,
};
use mongodb::bson::{doc, Document};
use serde_json::json;
use test_utils::{assertions::*, TestDataBuilder, TestMongo};

fn widget() -> ProductBody {
    ProductBody {
        name: Some("Widget".to_string()),
        price: Some(9.99),
        quantity: Some(5),
        tags: Some(vec!["new".to_string()]),
    }
}

async fn repository(mongo: &TestMongo) -> MongoProductRepository {
    let repo = MongoProductRepository::new(&mongo.client());
    repo.init_indexes().await.unwrap();
    repo
}

// ============================================================================
// Repository Tests
// ============================================================================

#[tokio::test]
async fn test_insert_and_get() {
    let mongo = TestMongo::new().await;
    let repo = repository(&mongo).await;
    let builder = TestDataBuilder::from_test_name("insert_and_get");
    let key = builder.key("main");

    repo.insert(&key, widget()).await.unwrap();

    let body = repo.get(&key).await.unwrap();
    assert_eq!(body, widget());
}

#[tokio::test]
async fn test_stored_document_uses_products_keyspace() {
    let mongo = TestMongo::new().await;
    let repo = repository(&mongo).await;
    let key = TestDataBuilder::from_test_name("keyspace").key("main");

    repo.insert(
        &key,
        ProductBody {
            name: Some("Bare".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let raw = mongo
        .client()
        .database("catalog")
        .collection::<Document>("inventory.products")
        .find_one(doc! { "_id": key.as_str() })
        .await
        .unwrap();
    let raw = assert_some(raw, "document should be stored under its key");

    // Omitted fields are absent rather than null
    assert_eq!(raw.len(), 2);
    assert_eq!(raw.get_str("name").unwrap(), "Bare");
}

#[tokio::test]
async fn test_insert_duplicate_key() {
    let mongo = TestMongo::new().await;
    let repo = repository(&mongo).await;
    let key = TestDataBuilder::from_test_name("duplicate_key").key("main");

    repo.insert(&key, widget()).await.unwrap();
    let result = repo.insert(&key, widget()).await;

    assert!(matches!(result, Err(ProductError::AlreadyExists(k)) if k == key));
}

#[tokio::test]
async fn test_get_missing_key() {
    let mongo = TestMongo::new().await;
    let repo = repository(&mongo).await;

    let result = repo.get("no-such-key").await;
    assert!(matches!(result, Err(ProductError::NotFound(_))));
}

#[tokio::test]
async fn test_replace_drops_omitted_fields() {
    let mongo = TestMongo::new().await;
    let repo = repository(&mongo).await;
    let key = TestDataBuilder::from_test_name("replace").key("main");

    repo.insert(&key, widget()).await.unwrap();

    let replacement = ProductBody {
        name: Some("Gadget".to_string()),
        price: Some(1.5),
        ..Default::default()
    };
    repo.replace(&key, replacement.clone()).await.unwrap();

    assert_eq!(repo.get(&key).await.unwrap(), replacement);
}

#[tokio::test]
async fn test_replace_missing_key() {
    let mongo = TestMongo::new().await;
    let repo = repository(&mongo).await;

    let result = repo.replace("no-such-key", widget()).await;
    assert!(matches!(result, Err(ProductError::NotFound(_))));
}

#[tokio::test]
async fn test_remove_twice() {
    let mongo = TestMongo::new().await;
    let repo = repository(&mongo).await;
    let key = TestDataBuilder::from_test_name("remove_twice").key("main");

    repo.insert(&key, widget()).await.unwrap();
    repo.remove(&key).await.unwrap();

    assert!(matches!(repo.get(&key).await, Err(ProductError::NotFound(_))));
    assert!(matches!(repo.remove(&key).await, Err(ProductError::NotFound(_))));
}

#[tokio::test]
async fn test_mutate_quantity_keeps_other_fields() {
    let mongo = TestMongo::new().await;
    let repo = repository(&mongo).await;
    let key = TestDataBuilder::from_test_name("mutate_quantity").key("main");

    repo.insert(&key, widget()).await.unwrap();
    repo.mutate_field(&key, "quantity", json!(10)).await.unwrap();

    let body = repo.get(&key).await.unwrap();
    assert_eq!(body.quantity, Some(10));
    assert_eq!(
        body,
        ProductBody {
            quantity: Some(10),
            ..widget()
        }
    );
}

#[tokio::test]
async fn test_mutate_missing_path() {
    let mongo = TestMongo::new().await;
    let repo = repository(&mongo).await;
    let key = TestDataBuilder::from_test_name("mutate_missing_path").key("main");

    repo.insert(
        &key,
        ProductBody {
            name: Some("No stock field".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let result = repo.mutate_field(&key, "quantity", json!(3)).await;
    assert!(matches!(
        result,
        Err(ProductError::PathMismatch { key: k, path }) if k == key && path == "quantity"
    ));

    // Nothing was written
    assert!(repo.get(&key).await.unwrap().quantity.is_none());
}

#[tokio::test]
async fn test_mutate_missing_key() {
    let mongo = TestMongo::new().await;
    let repo = repository(&mongo).await;

    let result = repo.mutate_field("no-such-key", "quantity", json!(3)).await;
    assert!(matches!(result, Err(ProductError::NotFound(_))));
}

#[tokio::test]
async fn test_search_orders_by_score_and_limits() {
    let mongo = TestMongo::new().await;
    let repo = repository(&mongo).await;
    let builder = TestDataBuilder::from_test_name("search_order");

    let best = builder.key("best");
    let other = builder.key("other");
    let third = builder.key("third");
    let unrelated = builder.key("unrelated");

    repo.insert(
        &best,
        ProductBody {
            name: Some("widget".to_string()),
            tags: Some(vec!["widget".to_string()]),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    repo.insert(
        &other,
        ProductBody {
            name: Some("widget stand holder for desks".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    repo.insert(
        &third,
        ProductBody {
            name: Some("spare parts bundle with one widget clip".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    repo.insert(
        &unrelated,
        ProductBody {
            name: Some("Gadget".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let keys = repo.search("widget", 2).await.unwrap();
    assert_eq!(keys.len(), 2);
    assert_eq!(keys[0], best);
    assert!(!keys.contains(&unrelated));

    assert!(repo.search("nothing-matches-this", 2).await.unwrap().is_empty());
}

// ============================================================================
// Service Tests
// ============================================================================

#[tokio::test]
async fn test_service_search_hydrates_stored_bodies() {
    let mongo = TestMongo::new().await;
    let service = ProductService::new(repository(&mongo).await);

    let first = service
        .create_product(ProductInput {
            name: Some("widget".to_string()),
            tags: Some(vec!["widget".to_string()]),
            ..Default::default()
        })
        .await
        .unwrap();
    let second = service
        .create_product(ProductInput {
            name: Some("widget stand holder for desks".to_string()),
            price: Some(25.0),
            ..Default::default()
        })
        .await
        .unwrap();

    let products = service.get_all_products_with_term("widget").await.unwrap();

    assert_eq!(products, vec![first, second]);
}

#[tokio::test]
async fn test_service_create_then_get() {
    let mongo = TestMongo::new().await;
    let service = ProductService::new(repository(&mongo).await);

    let input = ProductInput {
        name: Some("Widget".to_string()),
        price: Some(9.99),
        quantity: Some(5),
        tags: Some(vec!["new".to_string()]),
    };
    let created = service.create_product(input.clone()).await.unwrap();
    let fetched = service.get_product(&created.id).await.unwrap();

    assert_eq!(fetched, created);
    assert_eq!(fetched.body(), ProductBody::from(input));
}

#[tokio::test]
async fn test_widget_lifecycle() {
    let mongo = TestMongo::new().await;
    let service = ProductService::new(repository(&mongo).await);

    let created = service
        .create_product(ProductInput {
            name: Some("Widget".to_string()),
            price: Some(9.99),
            quantity: Some(5),
            tags: Some(vec!["new".to_string()]),
        })
        .await
        .unwrap();

    assert!(service.set_quantity(&created.id, 10).await.unwrap());
    let updated = service.get_product(&created.id).await.unwrap();
    assert_eq!(updated.quantity, Some(10));
    assert_eq!(updated.name.as_deref(), Some("Widget"));

    assert!(service.delete_product(&created.id).await.unwrap());
    assert!(matches!(
        service.get_product(&created.id).await,
        Err(ProductError::NotFound(_))
    ));
}
