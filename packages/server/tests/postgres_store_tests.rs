//! PostgresKvStore against a real database.
//!
//! Requires Docker: `cargo test --test postgres_store_tests -- --ignored`

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::postgres_pool;
use server_core::domains::lists::{CreateListRequest, ListPatch, ListService};
use server_core::store::{KvStore, PostgresKvStore};

const DAY: Duration = Duration::from_secs(24 * 60 * 60);

#[tokio::test]
#[ignore = "requires Docker"]
async fn put_get_overwrite_delete() {
    let store = PostgresKvStore::new(postgres_pool().await.unwrap());

    store.put("test:overwrite", "one", DAY).await.unwrap();
    store.put("test:overwrite", "two", DAY).await.unwrap();
    assert_eq!(
        store.get("test:overwrite").await.unwrap().as_deref(),
        Some("two")
    );

    store.delete("test:overwrite").await.unwrap();
    assert_eq!(store.get("test:overwrite").await.unwrap(), None);

    // Deleting again is fine
    store.delete("test:overwrite").await.unwrap();
    store.ping().await.unwrap();
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn expired_rows_are_hidden_then_purged() {
    let store = PostgresKvStore::new(postgres_pool().await.unwrap());

    store
        .put("test:expiring", "soon", Duration::from_secs(1))
        .await
        .unwrap();
    assert!(store.get("test:expiring").await.unwrap().is_some());

    tokio::time::sleep(Duration::from_millis(1500)).await;

    assert_eq!(store.get("test:expiring").await.unwrap(), None);
    assert!(store.purge_expired().await.unwrap() >= 1);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn list_service_round_trip() {
    let store: Arc<dyn KvStore> = Arc::new(PostgresKvStore::new(postgres_pool().await.unwrap()));
    let lists = ListService::new(store, DAY);

    let created = lists
        .create(CreateListRequest {
            owner: "지우".into(),
            birthday: "2025-03-14".into(),
            password: Some("pw".into()),
        })
        .await
        .unwrap();

    let updated = lists
        .update(
            &created.id,
            ListPatch {
                owner: Some("지우 ♥".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.owner, "지우 ♥");
    assert_eq!(updated.created_at, created.created_at);

    lists.delete(&created.id).await.unwrap();
    assert!(lists.read(&created.id).await.is_err());
}
