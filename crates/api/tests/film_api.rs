//! Integration tests for the film endpoints, driven against the in-memory
//! backend through the full middleware stack.

mod common;

use axum::http::StatusCode;
use axum::Router;
use common::{body_json, build_test_app, delete, get, post_json, put, put_json};
use serde_json::{json, Value};

/// Minimal valid film payload.
fn film_payload(name: &str) -> Value {
    json!({
        "name": name,
        "description": "A film used in tests",
        "releaseDate": "2023-01-01",
        "duration": 120,
        "mpa": { "id": 1 }
    })
}

/// Create a film and return its parsed body.
async fn create_film(app: &Router, payload: Value) -> Value {
    let response = post_json(app.clone(), "/api/v1/films", payload).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

/// Create a user (likes need one) and return its id.
async fn create_user(app: &Router, login: &str) -> i64 {
    let response = post_json(
        app.clone(),
        "/api/v1/users",
        json!({
            "login": login,
            "email": format!("{login}@example.com"),
            "birthday": "1990-05-17"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_film_assigns_id_and_resolves_references() {
    let app = build_test_app();

    let film = create_film(&app, film_payload("Test Film")).await;

    assert_eq!(film["id"], 1);
    assert_eq!(film["name"], "Test Film");
    assert_eq!(film["releaseDate"], "2023-01-01");
    assert_eq!(film["duration"], 120);
    assert_eq!(film["mpa"], json!({ "id": 1, "name": "G" }));
    assert_eq!(film["genres"], json!([]));
    assert_eq!(film["likes"], json!([]));
}

#[tokio::test]
async fn film_ids_are_monotonically_increasing() {
    let app = build_test_app();

    let first = create_film(&app, film_payload("First")).await;
    let second = create_film(&app, film_payload("Second")).await;

    assert_eq!(first["id"], 1);
    assert_eq!(second["id"], 2);
}

#[tokio::test]
async fn create_film_before_earliest_release_date_rejected() {
    let app = build_test_app();

    let mut payload = film_payload("Too Early");
    payload["releaseDate"] = json!("1895-12-27");
    let response = post_json(app, "/api/v1/films", payload).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn create_film_on_earliest_release_date_accepted() {
    let app = build_test_app();

    let mut payload = film_payload("Cinema Birthday");
    payload["releaseDate"] = json!("1895-12-28");
    let film = create_film(&app, payload).await;

    assert_eq!(film["releaseDate"], "1895-12-28");
}

#[tokio::test]
async fn create_film_with_blank_name_rejected() {
    let app = build_test_app();

    let response = post_json(app, "/api/v1/films", film_payload("   ")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_film_with_oversized_description_rejected() {
    let app = build_test_app();

    let mut payload = film_payload("Wordy");
    payload["description"] = json!("x".repeat(201));
    let response = post_json(app, "/api/v1/films", payload).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_film_with_nonpositive_duration_rejected() {
    let app = build_test_app();

    let mut payload = film_payload("Instant");
    payload["duration"] = json!(0);
    let response = post_json(app, "/api/v1/films", payload).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_film_without_mpa_rejected() {
    let app = build_test_app();

    let mut payload = film_payload("Unrated");
    payload.as_object_mut().unwrap().remove("mpa");
    let response = post_json(app, "/api/v1/films", payload).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_film_with_unknown_mpa_not_found() {
    let app = build_test_app();

    let mut payload = film_payload("Mystery Rating");
    payload["mpa"] = json!({ "id": 99 });
    let response = post_json(app, "/api/v1/films", payload).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_film_with_unknown_genre_not_found() {
    let app = build_test_app();

    let mut payload = film_payload("Mystery Genre");
    payload["genres"] = json!([{ "id": 1 }, { "id": 42 }]);
    let response = post_json(app, "/api/v1/films", payload).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_genre_refs_collapse_to_one() {
    let app = build_test_app();

    let mut payload = film_payload("Double Drama");
    payload["genres"] = json!([{ "id": 2 }, { "id": 2 }]);
    let film = create_film(&app, payload).await;

    assert_eq!(film["genres"], json!([{ "id": 2, "name": "Drama" }]));
}

// ---------------------------------------------------------------------------
// Read and update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_missing_film_returns_404() {
    let app = build_test_app();

    let response = get(app, "/api/v1/films/999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn update_missing_film_returns_404() {
    let app = build_test_app();

    let mut payload = film_payload("Ghost");
    payload["id"] = json!(999);
    let response = put_json(app, "/api/v1/films", payload).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_replaces_fields_and_genre_set() {
    let app = build_test_app();

    let mut payload = film_payload("Original Cut");
    payload["genres"] = json!([{ "id": 1 }, { "id": 2 }]);
    let film = create_film(&app, payload).await;

    let updated_payload = json!({
        "id": film["id"],
        "name": "Director's Cut",
        "description": "Recut for release",
        "releaseDate": "2023-06-01",
        "duration": 142,
        "mpa": { "id": 4 },
        "genres": [{ "id": 3 }]
    });
    let response = put_json(app.clone(), "/api/v1/films", updated_payload).await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;

    assert_eq!(updated["name"], "Director's Cut");
    assert_eq!(updated["duration"], 142);
    assert_eq!(updated["mpa"]["name"], "R");
    // The genre set is fully replaced, not merged.
    assert_eq!(updated["genres"], json!([{ "id": 3, "name": "Cartoon" }]));

    let fetched = body_json(get(app, &format!("/api/v1/films/{}", film["id"])).await).await;
    assert_eq!(fetched["name"], "Director's Cut");
}

// ---------------------------------------------------------------------------
// Likes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn like_requires_existing_film_and_user() {
    let app = build_test_app();
    let user_id = create_user(&app, "onlyuser").await;
    let film = create_film(&app, film_payload("Likeable")).await;

    let response = put(app.clone(), &format!("/api/v1/films/999/like/{user_id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = put(app, &format!("/api/v1/films/{}/like/999", film["id"])).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn liking_twice_does_not_duplicate_the_like() {
    let app = build_test_app();
    let user_id = create_user(&app, "fan").await;
    let film = create_film(&app, film_payload("Crowd Pleaser")).await;
    let uri = format!("/api/v1/films/{}/like/{user_id}", film["id"]);

    let response = put(app.clone(), &uri).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = put(app.clone(), &uri).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let fetched = body_json(get(app, &format!("/api/v1/films/{}", film["id"])).await).await;
    assert_eq!(fetched["likes"], json!([user_id]));
}

#[tokio::test]
async fn removing_a_missing_like_returns_404() {
    let app = build_test_app();
    let user_id = create_user(&app, "nolike").await;
    let film = create_film(&app, film_payload("Unliked")).await;

    let response = delete(
        app,
        &format!("/api/v1/films/{}/like/{user_id}", film["id"]),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn remove_like_undoes_add_like() {
    let app = build_test_app();
    let user_id = create_user(&app, "fickle").await;
    let film = create_film(&app, film_payload("Divisive")).await;
    let uri = format!("/api/v1/films/{}/like/{user_id}", film["id"]);

    put(app.clone(), &uri).await;
    let response = delete(app.clone(), &uri).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let fetched = body_json(get(app, &format!("/api/v1/films/{}", film["id"])).await).await;
    assert_eq!(fetched["likes"], json!([]));
}

// ---------------------------------------------------------------------------
// Popular films
// ---------------------------------------------------------------------------

#[tokio::test]
async fn popular_orders_by_like_count_then_id_and_truncates() {
    let app = build_test_app();
    let alice = create_user(&app, "alice").await;
    let bob = create_user(&app, "bob").await;

    let quiet = create_film(&app, film_payload("Quiet")).await;
    let hit = create_film(&app, film_payload("Hit")).await;
    let cult = create_film(&app, film_payload("Cult")).await;

    for user in [alice, bob] {
        put(app.clone(), &format!("/api/v1/films/{}/like/{user}", hit["id"])).await;
    }
    put(app.clone(), &format!("/api/v1/films/{}/like/{alice}", cult["id"])).await;

    let response = get(app.clone(), "/api/v1/films/popular?count=10").await;
    assert_eq!(response.status(), StatusCode::OK);
    let films = body_json(response).await;
    let ids: Vec<_> = films
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["id"].clone())
        .collect();
    assert_eq!(ids, vec![hit["id"].clone(), cult["id"].clone(), quiet["id"].clone()]);

    let truncated = body_json(get(app, "/api/v1/films/popular?count=2").await).await;
    assert_eq!(truncated.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn popular_defaults_to_ten() {
    let app = build_test_app();
    for i in 0..12 {
        create_film(&app, film_payload(&format!("Film {i}"))).await;
    }

    let films = body_json(get(app, "/api/v1/films/popular").await).await;

    assert_eq!(films.as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn popular_rejects_nonpositive_count() {
    let app = build_test_app();

    let response = get(app, "/api/v1/films/popular?count=0").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn films_are_listed_in_id_order() {
    let app = build_test_app();
    create_film(&app, film_payload("A")).await;
    create_film(&app, film_payload("B")).await;

    let response = get(app, "/api/v1/films").await;
    assert_eq!(response.status(), StatusCode::OK);
    let films = body_json(response).await;
    let ids: Vec<_> = films
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["id"].as_i64().unwrap())
        .collect();

    assert_eq!(ids, vec![1, 2]);
}
