//! HTTP-level integration tests for the group configuration endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router.
//! Courses are created via the repository layer to keep tests focused on
//! HTTP behaviour.

mod common;

use axum::http::header::{CONTENT_TYPE, LOCATION};
use axum::http::StatusCode;
use common::{
    body_json, body_text, build_test_app, create_course, delete, get, get_json, post_json,
    post_raw, put_json, test_pool,
};
use serde_json::json;

const COURSE: &str = "course-v1:edX+DemoX+Demo";

fn collection_uri() -> String {
    format!("/api/v1/courses/{COURSE}/group_configurations")
}

fn item_uri(id: i64) -> String {
    format!("/api/v1/courses/{COURSE}/group_configurations/{id}")
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_returns_normalized_configuration_with_location() {
    let pool = test_pool().await;
    create_course(&pool, COURSE).await;
    let app = build_test_app(pool);

    let response = post_json(
        app,
        &collection_uri(),
        json!({"name": "Test name", "description": "Test description"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        response.headers().get(LOCATION).unwrap().to_str().unwrap(),
        item_uri(1)
    );

    let json = body_json(response).await;
    assert_eq!(
        json,
        json!({
            "id": 1,
            "name": "Test name",
            "description": "Test description",
            "version": 1,
            "groups": [
                {"id": 0, "name": "Group A", "version": 1},
                {"id": 1, "name": "Group B", "version": 1}
            ]
        })
    );
}

#[tokio::test]
async fn ids_increment_regardless_of_client_hints() {
    let pool = test_pool().await;
    create_course(&pool, COURSE).await;
    let app = build_test_app(pool);

    let first = post_json(app.clone(), &collection_uri(), json!({"name": "First", "id": 42})).await;
    assert_eq!(first.status(), StatusCode::CREATED);
    assert_eq!(body_json(first).await["id"], 1);

    let second =
        post_json(app.clone(), &collection_uri(), json!({"name": "Second", "id": "7"})).await;
    assert_eq!(second.status(), StatusCode::CREATED);
    assert_eq!(body_json(second).await["id"], 2);

    let third = post_json(app, &collection_uri(), json!({"name": "Third"})).await;
    assert_eq!(body_json(third).await["id"], 3);
}

#[tokio::test]
async fn client_version_fields_are_ignored() {
    let pool = test_pool().await;
    create_course(&pool, COURSE).await;
    let app = build_test_app(pool);

    let response = post_json(
        app,
        &collection_uri(),
        json!({
            "name": "Versioned",
            "version": 99,
            "groups": [{"name": "X", "version": 5}, {"name": "Y"}]
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["version"], 1);
    assert_eq!(json["groups"][0], json!({"id": 0, "name": "X", "version": 1}));
    assert_eq!(json["groups"][1], json!({"id": 1, "name": "Y", "version": 1}));
}

#[tokio::test]
async fn one_group_is_rejected_and_not_listed() {
    let pool = test_pool().await;
    create_course(&pool, COURSE).await;
    let app = build_test_app(pool);

    let response = post_json(
        app.clone(),
        &collection_uri(),
        json!({"name": "Test name", "groups": [{"name": "Only"}]}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("at least 2 groups"));
    assert_eq!(json["code"], "VALIDATION_ERROR");

    let listing = body_json(get_json(app, &collection_uri()).await).await;
    assert_eq!(listing["data"], json!([]));
}

#[tokio::test]
async fn missing_name_is_rejected() {
    let pool = test_pool().await;
    create_course(&pool, COURSE).await;
    let app = build_test_app(pool);

    let response = post_json(app, &collection_uri(), json!({"description": "no name"})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn non_numeric_id_is_rejected() {
    let pool = test_pool().await;
    create_course(&pool, COURSE).await;
    let app = build_test_app(pool);

    let response = post_json(
        app.clone(),
        &collection_uri(),
        json!({"name": "Test name", "id": "asdf"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());

    // A rejected create does not consume an id.
    let next = post_json(app, &collection_uri(), json!({"name": "Next"})).await;
    assert_eq!(body_json(next).await["id"], 1);
}

#[tokio::test]
async fn malformed_json_is_rejected_with_error_field() {
    let pool = test_pool().await;
    create_course(&pool, COURSE).await;
    let app = build_test_app(pool);

    let response = post_raw(app.clone(), &collection_uri(), "{\"name\": \"Test").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().starts_with("invalid JSON"));

    let response = post_raw(app, &collection_uri(), "[1, 2, 3]").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn unknown_course_is_404() {
    let pool = test_pool().await;
    let app = build_test_app(pool);

    let response = post_json(
        app.clone(),
        "/api/v1/courses/missing/group_configurations",
        json!({"name": "Test name"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");

    let response = get(app, "/api/v1/courses/missing/group_configurations").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn id_sequences_are_per_course() {
    let pool = test_pool().await;
    create_course(&pool, COURSE).await;
    create_course(&pool, "other-course").await;
    let app = build_test_app(pool);

    post_json(app.clone(), &collection_uri(), json!({"name": "A"})).await;
    let other = post_json(
        app,
        "/api/v1/courses/other-course/group_configurations",
        json!({"name": "B"}),
    )
    .await;
    assert_eq!(body_json(other).await["id"], 1);
}

// ---------------------------------------------------------------------------
// Index
// ---------------------------------------------------------------------------

#[tokio::test]
async fn index_page_offers_new_configuration_control() {
    let pool = test_pool().await;
    create_course(&pool, COURSE).await;
    let app = build_test_app(pool);

    let response = get(app.clone(), &collection_uri()).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    assert!(body_text(response).await.contains("New Group Configuration"));

    post_json(app.clone(), &collection_uri(), json!({"name": "Listed <config>"})).await;
    let html = body_text(get(app, &collection_uri()).await).await;
    assert!(html.contains("New Group Configuration"));
    assert!(html.contains("Listed &lt;config&gt;"));
}

#[tokio::test]
async fn json_listing_is_ordered_by_id() {
    let pool = test_pool().await;
    create_course(&pool, COURSE).await;
    let app = build_test_app(pool);

    for name in ["One", "Two", "Three"] {
        post_json(app.clone(), &collection_uri(), json!({"name": name})).await;
    }

    let json = body_json(get_json(app, &collection_uri()).await).await;
    let ids: Vec<i64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

// ---------------------------------------------------------------------------
// Get / update / delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_preserves_id_and_overwrites_fields() {
    let pool = test_pool().await;
    create_course(&pool, COURSE).await;
    let app = build_test_app(pool);

    post_json(
        app.clone(),
        &collection_uri(),
        json!({"name": "Test name", "description": "Test description"}),
    )
    .await;

    let response = put_json(
        app.clone(),
        &item_uri(1),
        json!({
            "id": 1,
            "name": "Edit Test name",
            "description": "Edit Test description",
            "version": 7,
            "groups": [
                {"id": 0, "name": "New Group Name"},
                {"id": 2, "name": "Group C"},
                {"name": "Group D"}
            ]
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let expected = json!({
        "id": 1,
        "name": "Edit Test name",
        "description": "Edit Test description",
        "version": 1,
        "groups": [
            {"id": 0, "name": "New Group Name", "version": 1},
            {"id": 2, "name": "Group C", "version": 1},
            {"id": 1, "name": "Group D", "version": 1}
        ]
    });
    assert_eq!(body_json(response).await, expected);

    let fetched = body_json(get(app, &item_uri(1)).await).await;
    assert_eq!(fetched, expected);
}

#[tokio::test]
async fn update_of_unknown_id_is_404_without_mutation() {
    let pool = test_pool().await;
    create_course(&pool, COURSE).await;
    let app = build_test_app(pool);

    let response = put_json(
        app.clone(),
        &item_uri(5),
        json!({"id": 5, "name": "Ghost"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let listing = body_json(get_json(app.clone(), &collection_uri()).await).await;
    assert_eq!(listing["data"], json!([]));

    // The counter was not advanced either.
    let created = post_json(app, &collection_uri(), json!({"name": "Real"})).await;
    assert_eq!(body_json(created).await["id"], 1);
}

#[tokio::test]
async fn update_requires_matching_body_id() {
    let pool = test_pool().await;
    create_course(&pool, COURSE).await;
    let app = build_test_app(pool);
    post_json(app.clone(), &collection_uri(), json!({"name": "Test name"})).await;

    let missing = put_json(app.clone(), &item_uri(1), json!({"name": "No id"})).await;
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);

    let mismatched = put_json(app.clone(), &item_uri(1), json!({"id": 2, "name": "Wrong"})).await;
    assert_eq!(mismatched.status(), StatusCode::BAD_REQUEST);

    let unchanged = body_json(get(app, &item_uri(1)).await).await;
    assert_eq!(unchanged["name"], "Test name");
}

#[tokio::test]
async fn update_without_groups_is_rejected_and_keeps_groups() {
    let pool = test_pool().await;
    create_course(&pool, COURSE).await;
    let app = build_test_app(pool);
    post_json(
        app.clone(),
        &collection_uri(),
        json!({
            "name": "Colors",
            "groups": [
                {"name": "Red"},
                {"name": "Green"},
                {"name": "Blue"},
                {"name": "Yellow"}
            ]
        }),
    )
    .await;

    let response = put_json(app.clone(), &item_uri(1), json!({"id": 1, "name": "Renamed"})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = body_json(response).await;
    assert!(error["error"].as_str().unwrap().contains("groups"));

    let stored = body_json(get(app, &item_uri(1)).await).await;
    assert_eq!(stored["name"], "Colors");
    let names: Vec<&str> = stored["groups"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Red", "Green", "Blue", "Yellow"]);
}

#[tokio::test]
async fn update_with_one_group_is_rejected() {
    let pool = test_pool().await;
    create_course(&pool, COURSE).await;
    let app = build_test_app(pool);
    post_json(app.clone(), &collection_uri(), json!({"name": "Test name"})).await;

    let response = put_json(
        app.clone(),
        &item_uri(1),
        json!({"id": 1, "name": "Test name", "groups": [{"name": "Lonely"}]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let unchanged = body_json(get(app, &item_uri(1)).await).await;
    assert_eq!(unchanged["groups"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn get_unknown_configuration_is_404() {
    let pool = test_pool().await;
    create_course(&pool, COURSE).await;
    let app = build_test_app(pool);

    let response = get(app, &item_uri(1)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await["error"],
        "GroupConfiguration with id 1 not found"
    );
}

#[tokio::test]
async fn deleted_ids_are_not_reused() {
    let pool = test_pool().await;
    create_course(&pool, COURSE).await;
    let app = build_test_app(pool);

    post_json(app.clone(), &collection_uri(), json!({"name": "One"})).await;
    post_json(app.clone(), &collection_uri(), json!({"name": "Two"})).await;

    let response = delete(app.clone(), &item_uri(2)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(delete(app.clone(), &item_uri(2)).await.status(), StatusCode::NOT_FOUND);

    let created = post_json(app, &collection_uri(), json!({"name": "Three"})).await;
    assert_eq!(body_json(created).await["id"], 3);
}
