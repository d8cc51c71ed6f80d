//! Integration tests for the related-user endpoints
//!
//! Verifies request shapes, envelope unwrapping and error classification
//! of HttpRelatedUserApi against a mock backend.

use relform_core::domain::{
    PermissionGroupFilter, RecordId, RelatedUserInput, RemoteErrorKind,
};
use relform_core::ports::IRelatedUserApi;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{self, OLD_ACCESS};

fn record_id(id: &str) -> RecordId {
    RecordId::new(id.to_string()).unwrap()
}

#[tokio::test]
async fn test_find_unwraps_data_envelope() {
    let backend = common::setup_backend().await;
    common::mount_find_for_token(
        &backend.server,
        "u1",
        OLD_ACCESS,
        ResponseTemplate::new(200)
            .set_body_json(serde_json::json!({ "data": common::related_user_json("u1") })),
    )
    .await;

    let user = backend.api.find(&record_id("u1")).await.expect("find failed");

    assert_eq!(user.id.as_deref(), Some("u1"));
    assert_eq!(user.email.as_deref(), Some("ana@example.com"));
    assert_eq!(user.permission_group_id, vec!["g1".to_string()]);
    assert_eq!(user.permission_group[0].name, "Admins");
    assert_eq!(
        user.populated_permission_group.map(|g| g.name).as_deref(),
        Some("Admins")
    );
}

#[tokio::test]
async fn test_save_posts_form_value() {
    let backend = common::setup_backend().await;
    let input = RelatedUserInput {
        email: Some("ana@example.com".into()),
        name: Some("Ana".into()),
        unique_id: None,
        business_name: None,
        permission_group_id: vec!["g1".into(), "g2".into()],
    };

    Mock::given(method("POST"))
        .and(path("/related-user"))
        .and(header("authorization", "Bearer old-access"))
        .and(body_json(serde_json::json!({
            "email": "ana@example.com",
            "name": "Ana",
            "uniqueId": null,
            "businessName": null,
            "permissionGroupId": ["g1", "g2"]
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(serde_json::json!({ "data": common::related_user_json("new-1") })),
        )
        .expect(1)
        .mount(&backend.server)
        .await;

    let saved = backend.api.save(&input).await.expect("save failed");
    assert_eq!(saved.id.as_deref(), Some("new-1"));
}

#[tokio::test]
async fn test_update_puts_to_record_path() {
    let backend = common::setup_backend().await;

    Mock::given(method("PUT"))
        .and(path("/related-user/u1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "data": common::related_user_json("u1") })),
        )
        .expect(1)
        .mount(&backend.server)
        .await;

    let updated = backend
        .api
        .update(&RelatedUserInput::default(), &record_id("u1"))
        .await
        .expect("update failed");
    assert_eq!(updated.id.as_deref(), Some("u1"));
}

#[tokio::test]
async fn test_list_permission_groups_sends_filter() {
    let backend = common::setup_backend().await;
    let filter = PermissionGroupFilter::new(&["name".to_string()], "adm").unwrap();

    Mock::given(method("GET"))
        .and(path("/permission-group"))
        .and(query_param(
            "filter",
            r#"{"or":[{"name":{"like":"adm","options":"i"}}]}"#,
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {
                "result": [
                    { "_id": "g1", "name": "Admins" },
                    { "_id": "g2", "name": "Administrators" }
                ]
            }
        })))
        .mount(&backend.server)
        .await;

    let groups = backend
        .api
        .list_permission_groups(&filter)
        .await
        .expect("list failed");

    let names: Vec<_> = groups.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["Admins", "Administrators"]);
}

#[tokio::test]
async fn test_expired_marker_is_classified_as_expired_session() {
    let backend = common::setup_backend().await;
    common::mount_find_for_token(&backend.server, "u1", OLD_ACCESS, common::expired_response())
        .await;

    let err = backend.api.find(&record_id("u1")).await.unwrap_err();

    assert_eq!(err.kind, RemoteErrorKind::ExpiredSession);
    assert_eq!(err.message, "Your session has expired");
}

#[tokio::test]
async fn test_other_error_body_is_classified_as_other() {
    let backend = common::setup_backend().await;
    Mock::given(method("POST"))
        .and(path("/related-user"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "message": "Email already in use",
            "logMessage": "E11000 duplicate key"
        })))
        .mount(&backend.server)
        .await;

    let err = backend
        .api
        .save(&RelatedUserInput::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind, RemoteErrorKind::Other);
    assert_eq!(err.message, "Email already in use");
}

#[tokio::test]
async fn test_malformed_success_body_is_other() {
    let backend = common::setup_backend().await;
    common::mount_find_for_token(
        &backend.server,
        "u1",
        OLD_ACCESS,
        ResponseTemplate::new(200).set_body_string("not json"),
    )
    .await;

    let err = backend.api.find(&record_id("u1")).await.unwrap_err();
    assert_eq!(err.kind, RemoteErrorKind::Other);
    assert!(err.message.starts_with("Invalid response"));
}
