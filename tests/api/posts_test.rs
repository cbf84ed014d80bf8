//! Post endpoint tests

use crate::common::*;
use forum_server::traits::ForumStore;
use serde_json::json;

fn post_body(thread: i64, parent: Option<i64>, message: &str) -> serde_json::Value {
    json!({
        "thread": thread,
        "forum": "forum",
        "user": "author@example.com",
        "date": "2014-01-02 00:00:00",
        "message": message,
        "parent": parent
    })
}

#[tokio::test]
async fn test_create_post_returns_parent() {
    let store = Arc::new(test_store());
    let thread = create_thread(store.as_ref(), "create");
    let root = create_post(store.as_ref(), thread.id, None, "root", 0);
    let app = test_app_with_store(store.clone());

    let response = send(&app, post_json("/v1/posts", post_body(thread.id, Some(root.id), "reply"))).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["parent"], root.id);
    assert_eq!(json["message"], "reply");
    assert_eq!(json["date"], "2014-01-02 00:00:00");

    // The stored path hangs under the root
    let id = json["id"].as_i64().unwrap();
    let stored = store.get_post(id).unwrap();
    assert_eq!(stored.path, root.path.child(1).unwrap());
}

#[tokio::test]
async fn test_create_post_missing_parent_is_404() {
    let store = Arc::new(test_store());
    let thread = create_thread(store.as_ref(), "missing");
    let app = test_app_with_store(store);

    let response = send(&app, post_json("/v1/posts", post_body(thread.id, Some(9999), "x"))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_error_code(&body_json(response).await, "POST_NOT_FOUND");
}

#[tokio::test]
async fn test_create_post_missing_thread_is_404() {
    let app = test_app();

    let response = send(&app, post_json("/v1/posts", post_body(31, None, "x"))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_error_code(&body_json(response).await, "THREAD_NOT_FOUND");
}

#[tokio::test]
async fn test_create_post_bad_date_is_400() {
    let store = Arc::new(test_store());
    let thread = create_thread(store.as_ref(), "bad-date");
    let app = test_app_with_store(store);

    let mut body = post_body(thread.id, None, "x");
    body["date"] = json!("02/01/2014");

    let response = send(&app, post_json("/v1/posts", body)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_error_code(&body_json(response).await, "INVALID_ARGUMENT");
}

#[tokio::test]
async fn test_get_post() {
    let store = Arc::new(test_store());
    let thread = create_thread(store.as_ref(), "get");
    let root = create_post(store.as_ref(), thread.id, None, "root", 0);
    let app = test_app_with_store(store);

    let response = send(&app, get(&format!("/v1/posts/{}", root.id))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["id"], root.id);
    assert_eq!(json["parent"], serde_json::Value::Null);
    assert!(json.get("path").is_none());

    let response = send(&app, get("/v1/posts/4242")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_remove_restore_post_reports_changes() {
    let store = Arc::new(test_store());
    let thread = create_thread(store.as_ref(), "flags");
    let root = create_post(store.as_ref(), thread.id, None, "root", 0);
    let app = test_app_with_store(store.clone());

    let remove = format!("/v1/posts/{}/remove", root.id);
    let json = body_json(send(&app, post_json(&remove, json!({}))).await).await;
    assert_eq!(json, json!({ "post": root.id, "changed": true }));

    let json = body_json(send(&app, post_json(&remove, json!({}))).await).await;
    assert_eq!(json["changed"], false);
    assert_eq!(store.get_thread(thread.id).unwrap().posts, 0);

    let restore = format!("/v1/posts/{}/restore", root.id);
    let json = body_json(send(&app, post_json(&restore, json!({}))).await).await;
    assert_eq!(json["changed"], true);
    assert_eq!(store.get_thread(thread.id).unwrap().posts, 1);
}

#[tokio::test]
async fn test_update_and_vote() {
    let store = Arc::new(test_store());
    let thread = create_thread(store.as_ref(), "edit");
    let root = create_post(store.as_ref(), thread.id, None, "root", 0);
    let app = test_app_with_store(store);

    let response = send(
        &app,
        post_json(
            &format!("/v1/posts/{}/update", root.id),
            json!({ "message": "edited" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "edited");
    assert_eq!(json["isEdited"], true);

    let vote = format!("/v1/posts/{}/vote", root.id);
    send(&app, post_json(&vote, json!({ "vote": 1 }))).await;
    let json = body_json(send(&app, post_json(&vote, json!({ "vote": -1 }))).await).await;
    assert_eq!(json["likes"], 1);
    assert_eq!(json["dislikes"], 1);
    assert_eq!(json["points"], 0);

    let response = send(&app, post_json(&vote, json!({ "vote": 5 }))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_posts_filters() {
    let store = Arc::new(test_store());
    let thread = create_thread(store.as_ref(), "list");
    let root = create_post(store.as_ref(), thread.id, None, "root", 0);
    create_post(store.as_ref(), thread.id, Some(root.id), "reply", 1);
    let app = test_app_with_store(store);

    let response = send(
        &app,
        get(&format!("/v1/posts?thread={}&sort=parent_tree&order=asc", thread.id)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["message"], "reply");

    let response = send(&app, get("/v1/posts?forum=forum&order=asc")).await;
    let json = body_json(response).await;
    assert_eq!(json[0]["message"], "root");
    assert_eq!(json[1]["message"], "reply");

    let response = send(&app, get("/v1/posts?forum=forum&sort=tree")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(&app, get("/v1/posts")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_error_code(&body_json(response).await, "INVALID_ARGUMENT");
}
