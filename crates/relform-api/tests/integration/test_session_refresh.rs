//! Integration tests for the session refresh path
//!
//! Drives HttpRelatedUserApi through SessionRetryGuard with the real
//! HttpSessionRefresher and MemorySessionStore against a mock backend.

use relform_core::domain::{Credentials, RecordId};
use relform_core::ports::{IRelatedUserApi, ISessionRefresher, ISessionStore};
use relform_core::usecases::GuardError;
use relform_api::auth::HttpSessionRefresher;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{self, OLD_ACCESS, OLD_REFRESH};

async fn mount_refresh(server: &wiremock::MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/auth/refresh-token"))
        .and(body_json(serde_json::json!({ "refreshToken": OLD_REFRESH })))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

fn refreshed_tokens() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "data": { "authToken": "new-access", "authRefreshToken": "new-refresh" }
    }))
}

#[tokio::test]
async fn test_refresher_returns_new_credentials() {
    let backend = common::setup_backend().await;
    mount_refresh(&backend.server, refreshed_tokens()).await;

    let refresher = HttpSessionRefresher::new(backend.client.clone());
    let credentials = refresher.refresh(OLD_REFRESH).await.expect("refresh failed");

    assert_eq!(credentials, Credentials::new("new-access", "new-refresh"));
    // Persisting is the guard's job
    assert_eq!(
        backend.store.get().unwrap(),
        Some(Credentials::new(OLD_ACCESS, OLD_REFRESH))
    );
}

#[tokio::test]
async fn test_guard_refreshes_and_retries_with_new_token() {
    let backend = common::setup_backend().await;
    common::mount_find_for_token(&backend.server, "u1", OLD_ACCESS, common::expired_response())
        .await;
    common::mount_find_for_token(
        &backend.server,
        "u1",
        "new-access",
        ResponseTemplate::new(200)
            .set_body_json(serde_json::json!({ "data": common::related_user_json("u1") })),
    )
    .await;
    mount_refresh(&backend.server, refreshed_tokens()).await;

    let (guard, messenger, navigator) = common::guard_for(&backend);
    let id = RecordId::new("u1".to_string()).unwrap();
    let api = &backend.api;

    let user = guard
        .execute(|| api.find(&id))
        .await
        .expect("guarded find failed");

    assert_eq!(user.id.as_deref(), Some("u1"));
    assert_eq!(
        backend.store.get().unwrap(),
        Some(Credentials::new("new-access", "new-refresh"))
    );
    assert!(messenger.texts().is_empty());
    assert!(navigator.routes().is_empty());
}

#[tokio::test]
async fn test_guard_ends_session_when_refresh_is_rejected() {
    let backend = common::setup_backend().await;
    common::mount_find_for_token(&backend.server, "u1", OLD_ACCESS, common::expired_response())
        .await;
    mount_refresh(
        &backend.server,
        ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "message": "Refresh token revoked",
            "logMessage": "invalid signature"
        })),
    )
    .await;

    let (guard, messenger, navigator) = common::guard_for(&backend);
    let id = RecordId::new("u1".to_string()).unwrap();
    let api = &backend.api;

    let err = guard.execute(|| api.find(&id)).await.unwrap_err();

    assert!(matches!(
        err,
        GuardError::RefreshFailed { ref message } if message == "Refresh token revoked"
    ));
    assert_eq!(messenger.texts(), vec!["Refresh token revoked".to_string()]);
    assert!(backend.store.get().unwrap().is_none());
    assert_eq!(navigator.routes(), vec!["/".to_string()]);
}

#[tokio::test]
async fn test_guard_retries_only_once_when_still_expired() {
    let backend = common::setup_backend().await;
    common::mount_find_for_token(&backend.server, "u1", OLD_ACCESS, common::expired_response())
        .await;
    common::mount_find_for_token(&backend.server, "u1", "new-access", common::expired_response())
        .await;
    mount_refresh(&backend.server, refreshed_tokens()).await;

    let (guard, _messenger, navigator) = common::guard_for(&backend);
    let id = RecordId::new("u1".to_string()).unwrap();
    let api = &backend.api;

    let err = guard.execute(|| api.find(&id)).await.unwrap_err();

    match err {
        GuardError::Remote(remote) => assert!(remote.is_expired_session()),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(navigator.routes().is_empty());
    let received = backend.server.received_requests().await.unwrap();
    assert_eq!(received.len(), 3);
}
