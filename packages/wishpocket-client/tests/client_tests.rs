//! Client against a live in-process server, an unreachable backend and a
//! backend that answers with HTML.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::Router;
use extraction::{MockFetcher, ProductExtractor};
use server_core::domains::lists::ListService;
use server_core::server::{build_app, AppState};
use server_core::store::MemoryKvStore;
use tempfile::TempDir;
use wishpocket_client::{
    ClientError, CreateListRequest, ListPatch, LocalDb, WishPocketClient, DEMO_TITLE,
    LOCAL_DB_FILE,
};

/// Nothing listens on the discard port.
const UNREACHABLE_API: &str = "http://127.0.0.1:9/api";

fn local_db() -> (TempDir, LocalDb) {
    let dir = tempfile::tempdir().unwrap();
    let db = LocalDb::new(dir.path().join(LOCAL_DB_FILE));
    (dir, db)
}

fn create_request() -> CreateListRequest {
    CreateListRequest {
        owner: "지우".into(),
        birthday: "2025-03-14".into(),
        password: Some("pw".into()),
    }
}

async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

async fn live_server(fetcher: MockFetcher) -> String {
    let lists = ListService::new(
        Arc::new(MemoryKvStore::new()),
        Duration::from_secs(24 * 60 * 60),
    );
    let app = build_app(
        AppState::new(lists, ProductExtractor::with_fetcher(fetcher)),
        &[],
    );
    let addr = serve(app).await;
    format!("http://{}/api", addr)
}

fn unreachable_client(db: LocalDb) -> WishPocketClient {
    WishPocketClient::with_timeout(UNREACHABLE_API, db, Duration::from_secs(2)).unwrap()
}

#[tokio::test]
async fn falls_back_to_local_storage_when_backend_is_unreachable() {
    let (_dir, db) = local_db();
    let client = unreachable_client(db.clone());

    let list = client.create_list(&create_request()).await.unwrap();
    assert_eq!(list.owner, "지우");
    assert!(db.get(&list.id).is_some());

    let read = client.get_list(&list.id).await.unwrap();
    assert_eq!(read, list);

    let updated = client
        .update_list(
            &list.id,
            ListPatch {
                owner: Some("민지".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.id, list.id);
    assert_eq!(updated.owner, "민지");
    assert_eq!(updated.birthday, list.birthday);

    let with_item = client
        .add_item(&list.id, "https://shop.test/mug", Some("파란색"), None)
        .await
        .unwrap();
    assert_eq!(with_item.items.len(), 1);
    assert_eq!(with_item.items[0].title, DEMO_TITLE);
    assert_eq!(with_item.items[0].url, "https://shop.test/mug");
    assert_eq!(with_item.items[0].comment.as_deref(), Some("파란색"));

    let item_id = with_item.items[0].id.clone();
    let emptied = client.remove_item(&list.id, &item_id).await.unwrap();
    assert!(emptied.items.is_empty());

    client.delete_list(&list.id).await.unwrap();
    assert!(matches!(
        client.get_list(&list.id).await,
        Err(ClientError::NotFound(_))
    ));
}

/// Accepts connections and never answers them.
async fn hung_backend() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    format!("http://{}/api", addr)
}

#[tokio::test]
async fn falls_back_to_local_storage_when_backend_hangs() {
    let (_dir, db) = local_db();
    let api = hung_backend().await;
    let client =
        WishPocketClient::with_timeout(api, db.clone(), Duration::from_millis(300)).unwrap();

    let started = Instant::now();
    let list = client.create_list(&create_request()).await.unwrap();
    assert!(db.get(&list.id).is_some());

    let read = client.get_list(&list.id).await.unwrap();
    assert_eq!(read, list);
    assert!(
        started.elapsed() < Duration::from_secs(5),
        "fallback took {:?}",
        started.elapsed()
    );
}

#[tokio::test]
async fn scrape_falls_back_to_demo_record() {
    let (_dir, db) = local_db();
    let client = unreachable_client(db);

    let data = client
        .scrape_url("https://www.musinsa.com/app/goods/1234567")
        .await;
    assert_eq!(data.title, DEMO_TITLE);
    assert_eq!(data.price, "0");
    assert_eq!(data.site_name, "www.musinsa.com");
    assert_eq!(data.url, "https://www.musinsa.com/app/goods/1234567");
}

#[tokio::test]
async fn html_responses_trigger_the_fallback() {
    let router = Router::new().fallback(|| async { "<html>maintenance</html>" });
    let addr = serve(router).await;

    let (_dir, db) = local_db();
    let client = WishPocketClient::new(format!("http://{}/api", addr), db.clone()).unwrap();

    let list = client.create_list(&create_request()).await.unwrap();
    assert!(db.get(&list.id).is_some());
}

#[tokio::test]
async fn live_server_round_trip() {
    let fetcher = MockFetcher::new().with_page(
        "https://shop.test/lamp",
        r#"<meta property="og:title" content="Desk Lamp">
           <meta property="product:price:amount" content="25,000">"#,
    );
    let api = live_server(fetcher).await;

    let (_dir, db) = local_db();
    let client = WishPocketClient::new(api, db.clone()).unwrap();

    let list = client.create_list(&create_request()).await.unwrap();
    assert_eq!(list.password, None);
    assert!(db.get(&list.id).is_none(), "server success must not write locally");

    let data = client.scrape_url("https://shop.test/lamp").await;
    assert_eq!(data.title, "Desk Lamp");
    assert_eq!(data.price, "25000");

    let list = client
        .add_item(&list.id, "https://shop.test/lamp", None, Some(1))
        .await
        .unwrap();
    assert_eq!(list.items.len(), 1);
    assert!(list.items[0].is_high_priority());

    let read = client.get_list(&list.id).await.unwrap();
    assert_eq!(read, list);

    client.delete_list(&list.id).await.unwrap();
    assert!(matches!(
        client.get_list(&list.id).await,
        Err(ClientError::NotFound(_))
    ));
}

#[tokio::test]
async fn client_errors_are_not_masked_by_the_fallback() {
    let api = live_server(MockFetcher::new()).await;
    let (_dir, db) = local_db();
    let client = WishPocketClient::new(api, db.clone()).unwrap();

    let err = client
        .create_list(&CreateListRequest {
            owner: String::new(),
            birthday: "2025-03-14".into(),
            password: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 400, .. }));

    // A local copy under the same id is ignored when the server says 404
    let local = db.create(&create_request()).unwrap();
    let err = client.get_list(&local.id).await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));
}
