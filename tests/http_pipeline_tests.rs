//! HTTP pipeline and endpoint tests
//! Uses an in-process transport that records requests and replays canned responses
//!
//! Run with: cargo test --test http_pipeline_tests

use async_trait::async_trait;
use bookadmin::api::{self, Pagination, RankingPeriod, RankingType};
use bookadmin::auth::{FixedClock, MemoryStorage, Role, SessionStore, UserInfo};
use bookadmin::http::{ApiRequest, RawResponse, Transport};
use bookadmin::router::{RecordingNotifier, LOGIN_PATH};
use bookadmin::{App, Config, Error};
use jsonwebtoken::{encode, EncodingKey, Header};
use parking_lot::Mutex;
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, StatusCode};
use serde_json::json;
use std::collections::VecDeque;
use std::sync::Arc;

const NOW: i64 = 1_750_000_000;

#[derive(Default)]
struct FakeTransport {
    sent: Mutex<Vec<ApiRequest>>,
    replies: Mutex<VecDeque<RawResponse>>,
}

impl FakeTransport {
    fn reply(&self, status: StatusCode, body: serde_json::Value) {
        self.replies
            .lock()
            .push_back(RawResponse::new(status, body.to_string()));
    }

    fn ok(&self, data: serde_json::Value) {
        self.reply(StatusCode::OK, json!({ "code": 200, "msg": "success", "data": data }));
    }

    fn sent(&self) -> Vec<ApiRequest> {
        self.sent.lock().clone()
    }

    fn last(&self) -> ApiRequest {
        self.sent().pop().expect("no request was sent")
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, request: &ApiRequest) -> bookadmin::error::Result<RawResponse> {
        self.sent.lock().push(request.clone());
        self.replies
            .lock()
            .pop_front()
            .ok_or_else(|| Error::Other("no canned response".to_string()))
    }
}

fn token() -> String {
    encode(
        &Header::default(),
        &json!({ "role": "reader", "exp": NOW + 3600 }),
        &EncodingKey::from_secret(b"bookadmin-test-secret"),
    )
    .expect("Failed to create token")
}

fn setup() -> (App, Arc<FakeTransport>) {
    let session = SessionStore::new(
        Arc::new(MemoryStorage::new()),
        Arc::new(FixedClock::at_secs(NOW)),
    );
    let transport = Arc::new(FakeTransport::default());
    let app = App::with_parts(
        Config::default(),
        session,
        Arc::new(RecordingNotifier::new()),
        transport.clone(),
    );
    (app, transport)
}

fn logged_in() -> (App, Arc<FakeTransport>) {
    let (app, transport) = setup();
    app.session
        .set_session(&token(), &UserInfo::with_role(Role::Reader))
        .unwrap();
    (app, transport)
}

fn query(request: &ApiRequest) -> Vec<(&str, &str)> {
    request
        .query
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect()
}

// ============================================================================
// Pipeline behaviour
// ============================================================================

#[tokio::test]
async fn test_bearer_token_attached_when_logged_in() {
    let (app, transport) = logged_in();
    transport.ok(json!({ "is_liked": true, "like_count": 3 }));

    api::like::status(&app.client, 7).await.unwrap();

    let request = transport.last();
    let expected = format!("Bearer {}", token());
    assert_eq!(request.headers.get(AUTHORIZATION).unwrap(), expected.as_str());
    println!("✓ Authorization header attached");
}

#[tokio::test]
async fn test_no_header_without_token() {
    let (app, transport) = setup();
    transport.ok(json!({ "is_liked": false, "like_count": 0 }));

    api::like::status(&app.client, 7).await.unwrap();
    assert!(transport.last().headers.get(AUTHORIZATION).is_none());
}

#[tokio::test]
async fn test_unauthorized_logs_out_and_returns_to_login() {
    let (app, transport) = logged_in();
    app.enter("/books").unwrap();
    transport.reply(
        StatusCode::UNAUTHORIZED,
        json!({ "code": 401, "msg": "token expired" }),
    );

    let result = api::favorite::toggle(&app.client, 1).await;

    assert!(matches!(result, Err(Error::Unauthorized)));
    assert_eq!(app.session.token(), None);
    assert_eq!(app.session.user_info(), None);
    assert_eq!(app.router.current().unwrap().route.path, LOGIN_PATH);
    println!("✓ 401 cleared the session and redirected to /login");
}

#[tokio::test]
async fn test_server_error_status_keeps_session() {
    let (app, transport) = logged_in();
    transport.reply(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "code": 500, "msg": "database unavailable" }),
    );

    match api::favorite::toggle(&app.client, 1).await {
        Err(Error::Status { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "database unavailable");
        }
        other => panic!("expected status error, got {:?}", other),
    }
    assert!(app.session.is_logged_in());
    assert_eq!(transport.sent().len(), 1, "no retry");
}

#[tokio::test]
async fn test_envelope_error_code_is_api_error() {
    let (app, transport) = logged_in();
    transport.reply(StatusCode::OK, json!({ "code": 500, "msg": "book not found" }));

    match api::like::toggle(&app.client, 99).await {
        Err(Error::Api { code, message }) => {
            assert_eq!(code, 500);
            assert_eq!(message, "book not found");
        }
        other => panic!("expected api error, got {:?}", other),
    }
    assert!(app.session.is_logged_in());
}

#[tokio::test]
async fn test_transport_failure_propagates() {
    let (app, _transport) = logged_in();
    let result = api::like::status(&app.client, 1).await;
    assert!(matches!(result, Err(Error::Other(_))));
}

// ============================================================================
// Endpoint request shapes
// ============================================================================

#[tokio::test]
async fn test_favorite_requests() {
    let (app, transport) = logged_in();

    transport.ok(json!({ "is_favorited": true, "favorite_count": 5 }));
    let status = api::favorite::toggle(&app.client, 12).await.unwrap();
    assert!(status.is_favorited);
    assert_eq!(status.favorite_count, 5);
    let request = transport.last();
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.path, "/favorite/toggle/12");

    transport.ok(json!({ "is_favorited": false, "favorite_count": 4 }));
    api::favorite::status(&app.client, 12).await.unwrap();
    let request = transport.last();
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.path, "/favorite/status/12");

    transport.ok(json!([
        { "book_id": 1, "is_favorited": true, "favorite_count": 2 },
        { "book_id": 2, "is_favorited": false, "favorite_count": 0 }
    ]));
    let batch = api::favorite::batch_status(&app.client, &[1, 2, 3])
        .await
        .unwrap();
    assert_eq!(batch.len(), 2);
    let request = transport.last();
    assert_eq!(request.path, "/favorite/batch-status");
    assert_eq!(query(&request), vec![("bookIds", "1,2,3")]);
    println!("✓ Favorite endpoints shaped correctly");
}

#[tokio::test]
async fn test_like_list_pagination() {
    let (app, transport) = logged_in();
    transport.ok(json!({
        "list": [{
            "id": 10,
            "book_id": 3,
            "created_at": "2025-06-01T08:30:00Z",
            "book": { "id": 3, "title": "Dune", "author": "Frank Herbert", "like_count": 8 }
        }],
        "total": 1,
        "page": 2,
        "pageSize": 5
    }));

    let page = api::like::list(&app.client, Pagination { page: 2, page_size: 5 })
        .await
        .unwrap();

    let request = transport.last();
    assert_eq!(request.path, "/like/list");
    assert_eq!(query(&request), vec![("page", "2"), ("pageSize", "5")]);
    assert_eq!(page.total, 1);
    assert_eq!(page.page_size, 5);
    assert_eq!(page.list[0].book.title, "Dune");
    assert_eq!(page.list[0].book.like_count, 8);
    assert!(page.list[0].created_at.is_some());
}

#[tokio::test]
async fn test_empty_batch_sends_nothing() {
    let (app, transport) = logged_in();

    assert!(api::favorite::batch_status(&app.client, &[])
        .await
        .unwrap()
        .is_empty());
    assert!(api::like::batch_status(&app.client, &[])
        .await
        .unwrap()
        .is_empty());
    assert!(transport.sent().is_empty());
    println!("✓ Empty batch short-circuits");
}

#[tokio::test]
async fn test_ranking_defaults_limit() {
    let (app, transport) = logged_in();
    transport.ok(json!({
        "type": "favorite",
        "period": "month",
        "period_key": "2025-06",
        "items": [{ "rank": 1, "book_id": 4, "score": 17 }],
        "total": 1
    }));

    let ranking = api::ranking::get(&app.client, RankingType::Favorite, RankingPeriod::Month, None)
        .await
        .unwrap();

    let request = transport.last();
    assert_eq!(request.path, "/ranking/list");
    assert_eq!(
        query(&request),
        vec![("type", "favorite"), ("period", "month"), ("limit", "100")]
    );
    assert_eq!(ranking.kind, RankingType::Favorite);
    assert_eq!(ranking.items[0].score, 17);
    assert!(ranking.items[0].book.is_none());
}

#[tokio::test]
async fn test_ranking_rebuild_body() {
    let (app, transport) = logged_in();
    transport.reply(
        StatusCode::OK,
        json!({ "code": 200, "msg": "ranking rebuilt" }),
    );

    let message = api::ranking::rebuild(&app.client, RankingType::Like, RankingPeriod::Week)
        .await
        .unwrap();

    let request = transport.last();
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.path, "/ranking/rebuild");
    assert_eq!(request.body, Some(json!({ "type": "like", "period": "week" })));
    assert_eq!(message, "ranking rebuilt");
}

// ============================================================================
// Auth endpoints
// ============================================================================

#[tokio::test]
async fn test_login_stores_session() {
    let (app, transport) = setup();
    let issued = token();
    transport.ok(json!({
        "token": issued,
        "user_id": 5,
        "username": "libby",
        "role": "librarian",
        "real_name": "Libby Stacks"
    }));

    let user = api::auth::login(&app.client, &app.session, "libby", "secret")
        .await
        .unwrap();

    let request = transport.last();
    assert_eq!(request.path, "/auth/login");
    assert_eq!(
        request.body,
        Some(json!({ "username": "libby", "password": "secret" }))
    );
    assert!(request.headers.get(AUTHORIZATION).is_none());

    assert_eq!(user.role, Role::Librarian);
    assert_eq!(app.session.token(), Some(issued));
    assert!(app.session.is_logged_in());
    assert!(app.session.has_elevated_role());
    assert_eq!(app.enter("/readers").unwrap().route.path, "/readers");
    println!("✓ Login stored the session");
}

#[tokio::test]
async fn test_failed_login_stores_nothing() {
    let (app, transport) = setup();
    transport.reply(
        StatusCode::OK,
        json!({ "code": 400, "msg": "invalid username or password" }),
    );

    let result = api::auth::login(&app.client, &app.session, "libby", "wrong").await;
    assert!(matches!(result, Err(Error::Api { code: 400, .. })));
    assert_eq!(app.session.token(), None);
}

#[tokio::test]
async fn test_logout_clears_session() {
    let (app, _transport) = logged_in();
    api::auth::logout(&app.session).unwrap();
    assert!(!app.session.is_logged_in());
    assert!(matches!(app.enter("/books"), Err(Error::NotLoggedIn)));
}

// ============================================================================
// App entry checks
// ============================================================================

#[test]
fn test_enter_maps_redirects_to_errors() {
    let (app, _transport) = logged_in();

    assert!(app.enter("/ranking").is_ok());
    match app.enter("/system") {
        Err(Error::Forbidden(path)) => assert_eq!(path, "/system"),
        other => panic!("expected forbidden, got {:?}", other.map(|n| n.route.path)),
    }

    app.teardown().unwrap();
    assert!(matches!(app.enter("/ranking"), Err(Error::NotLoggedIn)));
}
