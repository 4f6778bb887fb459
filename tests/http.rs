//! HTTP-level tests driving the router through tower's oneshot, backed by a
//! throwaway SQLite database per test.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use bandstand::{app, DatabaseState};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn test_app(dir: &tempfile::TempDir) -> Router {
    let db_path = dir.path().join("test.db");
    let db_url = format!("sqlite:{}", db_path.display());
    let pool = queries::init_db(&db_url)
        .await
        .expect("failed to init test db");
    app(DatabaseState { pool })
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn list_is_empty_on_a_fresh_store() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir).await;

    let response = app.oneshot(get("/bands")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn create_normalizes_genre_and_assigns_id() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir).await;

    let response = app
        .oneshot(post_json(
            "/bands",
            json!({ "name": "Wu-Tang Clan", "genre": "hip-hop" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let band = body_json(response).await;
    assert!(band["id"].as_i64().unwrap() > 0);
    assert_eq!(band["name"], "Wu-Tang Clan");
    assert_eq!(band["genre"], "Hip-Hop");
    assert_eq!(band["albums"], json!([]));
}

#[tokio::test]
async fn create_with_nested_albums_assigns_band_id() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir).await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/bands",
            json!({
                "name": "Black Sabbath",
                "genre": "METAL",
                "albums": [
                    { "title": "Paranoid", "release_date": "1970-09-18" },
                    { "title": "Master of Reality", "release_date": "1971-07-21" }
                ]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let band = body_json(response).await;
    let band_id = band["id"].as_i64().unwrap();
    let albums = band["albums"].as_array().unwrap();
    assert_eq!(albums.len(), 2);
    for album in albums {
        assert_eq!(album["band_id"].as_i64().unwrap(), band_id);
        assert!(album["id"].as_i64().unwrap() > 0);
    }
    assert_eq!(albums[0]["release_date"], "1970-09-18");

    // The created band is readable back with its albums nested.
    let response = app
        .oneshot(get(&format!("/bands/{}", band_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = body_json(response).await;
    assert_eq!(fetched["albums"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn create_rejects_unknown_genre() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir).await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/bands",
            json!({ "name": "Miles Davis", "genre": "jazz" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Nothing was persisted by the rejected request.
    let response = app.oneshot(get("/bands")).await.unwrap();
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn create_rejects_bad_release_date() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir).await;

    let response = app
        .oneshot(post_json(
            "/bands",
            json!({
                "name": "Black Sabbath",
                "genre": "metal",
                "albums": [{ "title": "Paranoid", "release_date": "18/09/1970" }]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn get_band_returns_404_when_absent() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir).await;

    let response = app.oneshot(get("/bands/9000")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!({ "detail": "Band not found" }));
}

#[tokio::test]
async fn genre_query_filter_selects_the_subset() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir).await;
    for (name, genre) in [
        ("The Kinks", "rock"),
        ("Aphex Twin", "electronic"),
        ("Black Sabbath", "metal"),
    ] {
        let response = app
            .clone()
            .oneshot(post_json("/bands", json!({ "name": name, "genre": genre })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .clone()
        .oneshot(get("/bands?genre=Electronic"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bands = body_json(response).await;
    assert_eq!(bands.as_array().unwrap().len(), 1);
    assert_eq!(bands[0]["name"], "Aphex Twin");

    // The token casing is irrelevant.
    let response = app
        .clone()
        .oneshot(get("/bands?genre=ELECTRONIC"))
        .await
        .unwrap();
    let bands = body_json(response).await;
    assert_eq!(bands.as_array().unwrap().len(), 1);

    let response = app.oneshot(get("/bands?genre=polka")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn name_query_is_length_limited() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir).await;

    let response = app.clone().oneshot(get("/bands?q=sabbath")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(get("/bands?q=waytoolongquery"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn has_albums_filter_composes_with_genre() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir).await;
    let response = app
        .clone()
        .oneshot(post_json(
            "/bands",
            json!({
                "name": "Pink Floyd",
                "genre": "rock",
                "albums": [{ "title": "Meddle", "release_date": "1971-10-30" }]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let response = app
        .clone()
        .oneshot(post_json(
            "/bands",
            json!({ "name": "The Kinks", "genre": "rock" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(get("/bands?genre=rock&has_albums=true"))
        .await
        .unwrap();
    let bands = body_json(response).await;
    assert_eq!(bands.as_array().unwrap().len(), 1);
    assert_eq!(bands[0]["name"], "Pink Floyd");

    let response = app
        .oneshot(get("/bands?genre=rock&has_albums=false"))
        .await
        .unwrap();
    let bands = body_json(response).await;
    assert_eq!(bands.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn genre_path_endpoint_filters_case_insensitively() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir).await;
    for (name, genre) in [("The Kinks", "rock"), ("Aphex Twin", "electronic")] {
        app.clone()
            .oneshot(post_json("/bands", json!({ "name": name, "genre": genre })))
            .await
            .unwrap();
    }

    let response = app.clone().oneshot(get("/bands/genre/ROCK")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bands = body_json(response).await;
    assert_eq!(bands.as_array().unwrap().len(), 1);
    assert_eq!(bands[0]["name"], "The Kinks");

    let response = app.oneshot(get("/bands/genre/polka")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
