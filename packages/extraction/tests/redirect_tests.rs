//! Redirect handling of the real HTTP fetcher against a local listener.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use extraction::{FetchError, PageFetcher, SecurityError, UrlValidator, ValidatedFetcher};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

type Hits = Arc<Mutex<Vec<String>>>;

/// Serve a tiny shop whose `/item` redirects to an internal host name and
/// whose `/moved` redirects to a page on the same (trusted) address.
async fn redirecting_shop() -> (SocketAddr, Hits) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits: Hits = Arc::default();

    let seen = hits.clone();
    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let seen = seen.clone();
            tokio::spawn(async move {
                let mut buf = vec![0u8; 4096];
                let mut read = 0;
                while !buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf[read..]).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => read += n,
                    }
                }
                let request = String::from_utf8_lossy(&buf[..read]);
                let path = request
                    .split_whitespace()
                    .nth(1)
                    .unwrap_or("/")
                    .to_string();
                seen.lock().unwrap().push(path.clone());

                let response = match path.as_str() {
                    "/item" => redirect(&format!("http://localhost:{}/secret", addr.port())),
                    "/moved" => redirect(&format!("http://127.0.0.1:{}/final", addr.port())),
                    "/final" => {
                        let body = "<html><head><title>Final</title></head></html>";
                        format!(
                            "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            body.len(),
                            body
                        )
                    }
                    _ => "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
                        .to_string(),
                };
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    (addr, hits)
}

fn redirect(location: &str) -> String {
    format!(
        "HTTP/1.1 302 Found\r\nLocation: {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        location
    )
}

fn fetcher() -> ValidatedFetcher<extraction::HttpFetcher> {
    let validator = UrlValidator::new().allow_host("127.0.0.1");
    ValidatedFetcher::http(validator, Some(Duration::from_secs(2))).unwrap()
}

#[tokio::test]
async fn redirect_to_internal_host_is_never_requested() {
    let (addr, hits) = redirecting_shop().await;

    let err = fetcher()
        .fetch(&format!("http://127.0.0.1:{}/item", addr.port()))
        .await
        .unwrap_err();

    assert!(
        matches!(err, FetchError::Security(SecurityError::BlockedRedirect(_))),
        "unexpected error: {:?}",
        err
    );
    let hits = hits.lock().unwrap().clone();
    assert_eq!(hits, vec!["/item".to_string()]);
}

#[tokio::test]
async fn redirect_to_allowed_host_is_followed() {
    let (addr, hits) = redirecting_shop().await;

    let page = fetcher()
        .fetch(&format!("http://127.0.0.1:{}/moved", addr.port()))
        .await
        .unwrap();

    assert!(page.url.ends_with("/final"), "final url was {}", page.url);
    assert!(page.html.contains("<title>Final</title>"));
    let hits = hits.lock().unwrap().clone();
    assert_eq!(hits, vec!["/moved".to_string(), "/final".to_string()]);
}
