use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use identity_cell::router::identity_routes;
use identity_cell::{
    Account, AccountStore, IdentityState, InMemoryAccountStore, NotificationKind, NotificationRecord,
};
use shared_utils::test_utils::{JwtTestUtils, TestConfig, TestUser};

struct Harness {
    app: Router,
    store: Arc<InMemoryAccountStore>,
    secret: String,
}

impl Harness {
    async fn new(accounts: &[Account]) -> Self {
        let config = TestConfig::default();
        let store = Arc::new(InMemoryAccountStore::new());
        for account in accounts {
            store.insert(account.clone()).await.unwrap();
        }

        let state = IdentityState::new(config.to_arc(), store.clone());
        Self {
            app: identity_routes(state),
            store,
            secret: config.jwt_secret,
        }
    }

    fn token_for(&self, account: &Account) -> String {
        let user = TestUser::for_account(account.id, &account.email);
        JwtTestUtils::create_test_token(&user, &self.secret, Some(1))
    }

    async fn send(&self, method: &str, uri: &str, token: Option<String>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json");
        if let Some(token) = token {
            builder = builder.header("Authorization", JwtTestUtils::bearer(&token));
        }
        let body = body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty);

        let response = self.app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
        (status, json)
    }
}

#[tokio::test]
async fn test_notifications_require_token() {
    let harness = Harness::new(&[]).await;

    let (status, body) = harness.send("POST", "/user/get-all-notification", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_get_all_notification_moves_unseen_to_seen() {
    let patient = Account::new("Pat", "pat@example.com", "h");
    let harness = Harness::new(&[patient.clone()]).await;
    harness.store
        .append_notification(patient.id, NotificationRecord::new(NotificationKind::StatusUpdated, "accepted"))
        .await
        .unwrap();

    let token = harness.token_for(&patient);
    let (status, body) = harness.send("POST", "/user/get-all-notification", Some(token), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["notification"], json!([]));
    assert_eq!(body["data"]["seenNotification"][0]["type"], "status-updated");
    assert!(body["data"].get("credentialHash").is_none());
}

#[tokio::test]
async fn test_delete_all_notification_clears_queues() {
    let patient = Account::new("Pat", "pat@example.com", "h");
    let harness = Harness::new(&[patient.clone()]).await;
    let record = NotificationRecord::new(NotificationKind::StatusUpdated, "rejected");
    harness.store.append_notification(patient.id, record.clone()).await.unwrap();
    harness.store.mark_notifications_seen(patient.id).await.unwrap();
    harness.store.append_notification(patient.id, record).await.unwrap();

    let token = harness.token_for(&patient);
    let (status, body) = harness.send("POST", "/user/delete-all-notification", Some(token), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["notification"], json!([]));
    assert_eq!(body["data"]["seenNotification"], json!([]));
}

#[tokio::test]
async fn test_unknown_caller_gets_not_found() {
    let harness = Harness::new(&[]).await;
    let ghost = Account::new("Ghost", "ghost@example.com", "h");

    let (status, body) = harness
        .send("POST", "/user/get-all-notification", Some(harness.token_for(&ghost)), None)
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");
}

#[tokio::test]
async fn test_admin_routes_reject_non_admins() {
    let patient = Account::new("Pat", "pat@example.com", "h");
    let harness = Harness::new(&[patient.clone()]).await;

    let (status, body) = harness
        .send("GET", "/admin/getAllUsers", Some(harness.token_for(&patient)), None)
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_admin_lists_and_removes_users() {
    let admin = Account::new("Root", "root@example.com", "h").with_admin(true);
    let patient = Account::new("Pat", "pat@example.com", "h");
    let harness = Harness::new(&[admin.clone(), patient.clone()]).await;
    let token = harness.token_for(&admin);

    let (status, body) = harness.send("GET", "/admin/getAllUsers", Some(token.clone()), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (status, body) = harness
        .send("POST", "/admin/removeUser", Some(token.clone()), Some(json!({ "userId": patient.id })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "pat@example.com");
    assert!(harness.store.get(patient.id).await.unwrap().is_none());

    let (status, _) = harness
        .send("POST", "/admin/removeUser", Some(token), Some(json!({ "userId": admin.id })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_body_is_validation_failure() {
    let admin = Account::new("Root", "root@example.com", "h").with_admin(true);
    let harness = Harness::new(&[admin.clone()]).await;

    let (status, body) = harness
        .send("POST", "/admin/removeUser", Some(harness.token_for(&admin)), Some(json!({ "user": "x" })))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}
