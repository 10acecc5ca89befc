// ============================================================================
// REST API Movie Tests
// ============================================================================
//
// Drives the full router over HTTP with an in-memory store:
// - create / retrieve / update / delete happy paths
// - conditional write failures (duplicate id, missing id)
// - request body and path validation
//
// ============================================================================

use serde_json::{json, Value};

use test_utils::{movie_json, spawn_app, VALID_TOKEN};

#[tokio::test]
async fn test_end_to_end_lifecycle() {
    let app = spawn_app().await;
    let movie = movie_json("m1", "X");

    let response = app.create(&movie).await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "movie": movie }));

    let response = app.retrieve("m1").await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["movie"], movie);

    let response = app.delete("m1").await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Movie deleted." }));

    let response = app.retrieve("m1").await;
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error_code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_update_replaces_record() {
    let app = spawn_app().await;
    app.create(&movie_json("m1", "X")).await;

    let mut replacement = movie_json("m1", "Y");
    replacement["runtime"] = json!(120);
    let response = app.update("m1", &replacement).await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["movie"], replacement);

    let body: Value = app.retrieve("m1").await.json().await.unwrap();
    assert_eq!(body["movie"]["title"], "Y");
    assert_eq!(body["movie"]["runtime"], 120);
}

#[tokio::test]
async fn test_duplicate_create_is_rejected() {
    let app = spawn_app().await;
    app.create(&movie_json("m1", "First")).await;

    let response = app.create(&movie_json("m1", "Second")).await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error_code"], "DUPLICATE_ID");

    let body: Value = app.retrieve("m1").await.json().await.unwrap();
    assert_eq!(body["movie"]["title"], "First");
}

#[tokio::test]
async fn test_update_unknown_id_does_not_create() {
    let app = spawn_app().await;

    let response = app.update("ghost", &movie_json("ghost", "X")).await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error_code"], "NOT_FOUND");
    assert_eq!(app.retrieve("ghost").await.status(), 400);
}

#[tokio::test]
async fn test_update_stores_under_path_id() {
    let app = spawn_app().await;
    app.create(&movie_json("Y", "Original")).await;

    let response = app.update("Y", &movie_json("X", "Replaced")).await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["movie"]["movie-id"], "Y");
    assert_eq!(app.retrieve("X").await.status(), 400);

    let body: Value = app.retrieve("Y").await.json().await.unwrap();
    assert_eq!(body["movie"]["title"], "Replaced");
}

#[tokio::test]
async fn test_update_without_body_id() {
    let app = spawn_app().await;
    app.create(&movie_json("m1", "X")).await;

    let mut replacement = movie_json("", "Y");
    replacement.as_object_mut().unwrap().remove("movie-id");
    let response = app.update("m1", &replacement).await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["movie"]["movie-id"], "m1");
}

#[tokio::test]
async fn test_delete_twice() {
    let app = spawn_app().await;
    app.create(&movie_json("m1", "X")).await;

    assert_eq!(app.delete("m1").await.status(), 200);

    let response = app.delete("m1").await;
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error_code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_malformed_json_never_reaches_store() {
    let app = spawn_app().await;

    let response = app
        .client
        .post(app.url("/v1/api/movies"))
        .bearer_auth(VALID_TOKEN)
        .header("content-type", "application/json")
        .body("{\"movie-id\": \"m1\",")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error_code"], "VALIDATION_ERROR");
    assert_eq!(app.store.calls(), 0);
}

#[tokio::test]
async fn test_missing_field_is_rejected() {
    let app = spawn_app().await;
    let mut movie = movie_json("m1", "X");
    movie.as_object_mut().unwrap().remove("budget");

    let response = app.create(&movie).await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error_code"], "VALIDATION_ERROR");
    assert!(body["message"].as_str().unwrap().contains("budget"));
    assert_eq!(app.store.calls(), 0);
}

#[tokio::test]
async fn test_create_without_movie_id_is_rejected() {
    let app = spawn_app().await;
    let mut movie = movie_json("", "X");
    movie.as_object_mut().unwrap().remove("movie-id");

    let response = app.create(&movie).await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Missing movie id property");
    assert_eq!(app.store.calls(), 0);
}

#[tokio::test]
async fn test_release_date_accepts_timestamp() {
    let app = spawn_app().await;
    let mut movie = movie_json("m1", "X");
    movie["release-date"] = json!("2020-01-01T00:00:00Z");

    let response = app.create(&movie).await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["movie"]["release-date"], "2020-01-01");
}

#[tokio::test]
async fn test_empty_path_id_is_rejected() {
    let app = spawn_app().await;

    let response = app.retrieve("").await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Missing required id parameter.");
    assert_eq!(app.store.calls(), 0);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = spawn_app().await;

    let response = app
        .client
        .get(app.url("/v1/api/shows"))
        .bearer_auth(VALID_TOKEN)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_zero_vote_count_is_rejected() {
    let app = spawn_app().await;
    let mut movie = movie_json("m1", "X");
    movie["vote-count"] = json!(0);

    let response = app.create(&movie).await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Missing vote-count property");
    assert_eq!(body["error_code"], "VALIDATION_ERROR");
    assert_eq!(app.store.calls(), 0);
}

#[tokio::test]
async fn test_zero_numerics_and_zero_date_are_rejected() {
    let app = spawn_app().await;
    let cases = [
        ("budget", json!(0)),
        ("revenue", json!(0)),
        ("runtime", json!(0)),
        ("vote-average", json!(0.0)),
        ("release-date", json!("0001-01-01T00:00:00Z")),
    ];

    for (field, zero) in cases {
        let mut movie = movie_json("m1", "X");
        movie[field] = zero;

        let response = app.create(&movie).await;

        assert_eq!(response.status(), 400, "{} = 0 should be rejected", field);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["message"], format!("Missing {} property", field));
    }
    assert_eq!(app.store.calls(), 0);
}

#[tokio::test]
async fn test_negative_budget_is_accepted() {
    let app = spawn_app().await;
    let mut movie = movie_json("m1", "X");
    movie["budget"] = json!(-5);

    let response = app.create(&movie).await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["movie"]["budget"], -5);
}
