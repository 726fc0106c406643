//! Creation service tests
//!
//! Covers the landing page and the POST / contract: body validation,
//! duplicate detection and the shape of the created-link response.

use std::collections::HashMap;
use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use async_trait::async_trait;
use tokio::sync::RwLock;

use shortlnk::api::services::resolve::resolve_routes;
use shortlnk::api::services::shorten::shorten_routes;
use shortlnk::errors::{Result, ShortlnkError};
use shortlnk::storage::{Link, LinkStore, NewLink};
use shortlnk::utils::short_hash;

// =============================================================================
// Test Setup
// =============================================================================

struct MockStore {
    links: RwLock<HashMap<String, Link>>,
    next_id: std::sync::atomic::AtomicI64,
    fail_inserts: bool,
}

impl MockStore {
    fn new() -> Self {
        Self {
            links: RwLock::new(HashMap::new()),
            next_id: std::sync::atomic::AtomicI64::new(1),
            fail_inserts: false,
        }
    }

    fn failing_inserts() -> Self {
        Self {
            fail_inserts: true,
            ..Self::new()
        }
    }
}

#[async_trait]
impl LinkStore for MockStore {
    async fn find_by_hash(&self, hash: &str) -> Result<Option<Link>> {
        Ok(self.links.read().await.get(hash).cloned())
    }

    async fn count_by_url(&self, url: &str) -> Result<u64> {
        let links = self.links.read().await;
        Ok(links.values().filter(|l| l.url == url).count() as u64)
    }

    async fn insert(&self, link: NewLink) -> Result<Link> {
        if self.fail_inserts {
            return Err(ShortlnkError::database_operation("insert rejected"));
        }
        let id = self
            .next_id
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        let record = Link {
            id,
            url: link.url,
            hash: link.hash.clone(),
            created_at: link.created_at,
            views: 0,
        };
        self.links.write().await.insert(link.hash, record.clone());
        Ok(record)
    }

    async fn backend_name(&self) -> String {
        "mock".to_string()
    }
}

macro_rules! shorten_app {
    ($store:expr) => {{
        test::init_service(
            App::new()
                .app_data(web::Data::new($store as Arc<dyn LinkStore>))
                .configure(shorten_routes)
                .configure(resolve_routes),
        )
        .await
    }};
}

// =============================================================================
// Landing Tests
// =============================================================================

#[actix_rt::test]
async fn test_landing_page() {
    let store = Arc::new(MockStore::new());
    let app = shorten_app!(store);

    let req = TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp.headers().get("Content-Type").unwrap().to_str().unwrap();
    assert!(content_type.starts_with("text/plain"));
    let body = test::read_body(resp).await;
    assert!(std::str::from_utf8(&body).unwrap().contains("shortlnk"));
}

// =============================================================================
// Creation Tests
// =============================================================================

#[actix_rt::test]
async fn test_create_link() {
    let store = Arc::new(MockStore::new());
    let app = shorten_app!(store);

    let req = TestRequest::post()
        .uri("/")
        .insert_header(("Content-Type", "application/json"))
        .set_payload(r#"{"url":"https://example.com"}"#)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["url"], "https://example.com");
    assert_eq!(body["views"], 0);
    assert!(body["id"].is_i64());
    assert!(body["createdAt"].is_string());
}

#[actix_rt::test]
async fn test_created_hash_is_derivable_from_url() {
    let store = Arc::new(MockStore::new());
    let app = shorten_app!(store.clone());

    let req = TestRequest::post()
        .uri("/")
        .set_payload(r#"{"url":"https://example.org"}"#)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // sha256("https://example.org") truncated to 6 hex chars
    let hash = short_hash("https://example.org");
    assert_eq!(hash, "50d7a9");
    let stored = store.find_by_hash(&hash).await.unwrap();
    assert_eq!(stored.unwrap().url, "https://example.org");
}

#[actix_rt::test]
async fn test_create_then_resolve_round_trip() {
    let store = Arc::new(MockStore::new());
    let app = shorten_app!(store);

    let req = TestRequest::post()
        .uri("/")
        .set_payload(r#"{"url":"https://example.com/round-trip"}"#)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let hash = short_hash("https://example.com/round-trip");
    let req = TestRequest::get().uri(&format!("/{hash}")).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
    let location = resp.headers().get("Location").unwrap().to_str().unwrap();
    assert_eq!(location, "https://example.com/round-trip");
}

#[actix_rt::test]
async fn test_create_rejects_empty_body() {
    let store = Arc::new(MockStore::new());
    let app = shorten_app!(store);

    let req = TestRequest::post().uri("/").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = test::read_body(resp).await;
    assert_eq!(&body[..], b"Bad request");
}

#[actix_rt::test]
async fn test_create_rejects_malformed_json() {
    let store = Arc::new(MockStore::new());
    let app = shorten_app!(store);

    let req = TestRequest::post()
        .uri("/")
        .set_payload("not json at all")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = test::read_body(resp).await;
    assert_eq!(&body[..], b"Bad request");
}

#[actix_rt::test]
async fn test_create_rejects_missing_url_field() {
    let store = Arc::new(MockStore::new());
    let app = shorten_app!(store);

    let req = TestRequest::post().uri("/").set_payload("{}").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = test::read_body(resp).await;
    assert_eq!(&body[..], b"Missing url field");
}

#[actix_rt::test]
async fn test_create_rejects_empty_url_field() {
    let store = Arc::new(MockStore::new());
    let app = shorten_app!(store);

    let req = TestRequest::post()
        .uri("/")
        .set_payload(r#"{"url":""}"#)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = test::read_body(resp).await;
    assert_eq!(&body[..], b"Missing url field");
}

#[actix_rt::test]
async fn test_create_rejects_duplicate_url() {
    let store = Arc::new(MockStore::new());
    let app = shorten_app!(store);

    let payload = r#"{"url":"https://example.com/twice"}"#;
    let req = TestRequest::post().uri("/").set_payload(payload).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = TestRequest::post().uri("/").set_payload(payload).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = test::read_body(resp).await;
    assert_eq!(&body[..], b"Url already exists");
}

#[actix_rt::test]
async fn test_create_insert_failure_is_internal_error() {
    let store = Arc::new(MockStore::failing_inserts());
    let app = shorten_app!(store);

    let req = TestRequest::post()
        .uri("/")
        .set_payload(r#"{"url":"https://example.com/doomed"}"#)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = test::read_body(resp).await;
    assert_eq!(&body[..], b"Cannot create link");
}

#[actix_rt::test]
async fn test_create_ignores_extra_fields() {
    let store = Arc::new(MockStore::new());
    let app = shorten_app!(store);

    let req = TestRequest::post()
        .uri("/")
        .set_payload(r#"{"url":"https://example.com/extra","note":"ignored"}"#)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["url"], "https://example.com/extra");
}
