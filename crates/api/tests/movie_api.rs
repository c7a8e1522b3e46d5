//! HTTP-level integration tests for the `/movies` endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, delete, get, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_person(pool: &PgPool, name: &str) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/people",
        json!({"name": name, "date_of_birth": "1970-01-01"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

async fn create_movie(pool: &PgPool, title: &str, actors: &[i64]) -> serde_json::Value {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/movies",
        json!({
            "title": title,
            "description": "desc",
            "language": "English",
            "release_date": "1999-03-31",
            "cover_image": null,
            "actors": actors,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

fn actor_ids(movie: &serde_json::Value) -> Vec<i64> {
    let mut ids: Vec<i64> = movie["actors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_i64().unwrap())
        .collect();
    ids.sort_unstable();
    ids
}

fn update_body(actors: &[i64]) -> serde_json::Value {
    json!({
        "title": "Updated",
        "description": null,
        "language": "German",
        "release_date": "2000-01-01",
        "cover_image": "http://test.local/static-files/a.png",
        "actors": actors,
    })
}

// ---------------------------------------------------------------------------
// Create / read
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_movie_returns_201_with_cast(pool: PgPool) {
    let a = create_person(&pool, "Alice").await;
    let movie = create_movie(&pool, "The Matrix", &[a]).await;

    assert_eq!(movie["title"], "The Matrix");
    assert_eq!(movie["release_date"], "1999-03-31");
    assert_eq!(movie["actors"][0]["name"], "Alice");
    assert_eq!(movie["actors"][0]["date_of_birth"], "1970-01-01");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_movie_with_unknown_actor_returns_400(pool: PgPool) {
    let a = create_person(&pool, "Alice").await;

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/movies",
        json!({
            "title": "Bad Cast",
            "language": "English",
            "release_date": "1999-03-31",
            "actors": [a, 999999],
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_REFERENCE");
    assert!(json["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid Actors assigned"));

    let list = body_json(get(build_test_app(pool), "/api/v1/movies").await).await;
    assert_eq!(list["data"]["count"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_movie_with_blank_title_returns_400(pool: PgPool) {
    let response = post_json(
        build_test_app(pool),
        "/api/v1/movies",
        json!({
            "title": "  ",
            "language": "English",
            "release_date": "1999-03-31",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("Name of the movie is required"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_movie_by_id(pool: PgPool) {
    let a = create_person(&pool, "Alice").await;
    let created = create_movie(&pool, "Get Me", &[a]).await;
    let id = created["id"].as_i64().unwrap();

    let response = get(build_test_app(pool), &format!("/api/v1/movies/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Get Me");
    assert_eq!(actor_ids(&json["data"]), vec![a]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_nonexistent_movie_returns_404(pool: PgPool) {
    let response = get(build_test_app(pool), "/api/v1/movies/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Movie with id 999999 not found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_movies_is_paginated_with_total_count(pool: PgPool) {
    for i in 0..3 {
        create_movie(&pool, &format!("Movie {i}"), &[]).await;
    }

    let response = get(
        build_test_app(pool),
        "/api/v1/movies?page_index=1&page_size=2",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["count"], 3);
    let movies = json["data"]["movies"].as_array().unwrap();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0]["title"], "Movie 2");
}

// ---------------------------------------------------------------------------
// Update (cast reconciliation)
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_movie_reconciles_cast(pool: PgPool) {
    let a = create_person(&pool, "Alice").await;
    let b = create_person(&pool, "Bob").await;
    let c = create_person(&pool, "Carol").await;
    let movie = create_movie(&pool, "Original", &[a, b]).await;
    let id = movie["id"].as_i64().unwrap();

    let response = put_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/movies/{id}"),
        update_body(&[b, c, c]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Updated");
    assert_eq!(json["data"]["language"], "German");
    assert!(json["data"]["description"].is_null());
    assert_eq!(actor_ids(&json["data"]), vec![b, c]);

    let stored = body_json(get(build_test_app(pool), &format!("/api/v1/movies/{id}")).await).await;
    assert_eq!(actor_ids(&stored["data"]), vec![b, c]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_with_unknown_actor_leaves_movie_unchanged(pool: PgPool) {
    let a = create_person(&pool, "Alice").await;
    let movie = create_movie(&pool, "Stable", &[a]).await;
    let id = movie["id"].as_i64().unwrap();

    let response = put_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/movies/{id}"),
        update_body(&[a, 999999]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_REFERENCE");

    let stored = body_json(get(build_test_app(pool), &format!("/api/v1/movies/{id}")).await).await;
    assert_eq!(stored["data"]["title"], "Stable");
    assert_eq!(actor_ids(&stored["data"]), vec![a]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_nonexistent_movie_returns_404(pool: PgPool) {
    let response = put_json(
        build_test_app(pool),
        "/api/v1/movies/999999",
        update_body(&[]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_with_empty_actor_list_clears_cast(pool: PgPool) {
    let a = create_person(&pool, "Alice").await;
    let movie = create_movie(&pool, "Solo", &[a]).await;
    let id = movie["id"].as_i64().unwrap();

    let response = put_json(
        build_test_app(pool),
        &format!("/api/v1/movies/{id}"),
        update_body(&[]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(actor_ids(&body_json(response).await["data"]).is_empty());
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_movie_returns_204_then_404(pool: PgPool) {
    let a = create_person(&pool, "Alice").await;
    let movie = create_movie(&pool, "Delete Me", &[a]).await;
    let id = movie["id"].as_i64().unwrap();

    let response = delete(build_test_app(pool.clone()), &format!("/api/v1/movies/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(build_test_app(pool.clone()), &format!("/api/v1/movies/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete(build_test_app(pool.clone()), &format!("/api/v1/movies/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The actor survives.
    let response = get(build_test_app(pool), &format!("/api/v1/people/{a}")).await;
    assert_eq!(response.status(), StatusCode::OK);
}
