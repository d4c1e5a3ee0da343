use crate::{app, auth::Identity, config::Config, state::AppState};
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header::CONTENT_TYPE},
    middleware::{self, Next},
    response::{IntoResponse, Response},
};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database};
use serde_json::{Value, json};
use std::time::Duration;
use tower::ServiceExt;

const ADMIN: &str = "auth0|admin";
const ALICE: &str = "auth0|alice";
const BOB: &str = "auth0|bob";

async fn state() -> AppState {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1);

    let db = Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();

    let config = Config {
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        database_max_connections: 1,
        oidc_issuer_url: "http://localhost/issuer".to_string(),
        admin_subjects: vec![ADMIN.to_string()],
        request_timeout: Duration::from_secs(30),
        run_migrations: false,
    };

    AppState::new(db, config)
}

async fn setup() -> Router {
    // Identities are attached to each request directly instead of via a token
    app(state().await, |routes| routes)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    subject: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(subject) = subject {
        request = request.extension(Identity(subject.to_string()));
    }

    let body = match body {
        Some(json) => {
            request = request.header(CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();

    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

async fn register(app: &Router, subject: &str, name: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/auth/register",
        Some(subject),
        Some(json!({ "name": name, "email": format!("{name}@example.com") })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");

    body["data"]["id"].as_str().unwrap().to_string()
}

async fn create_restaurant(app: &Router, name: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/restaurants",
        Some(ADMIN),
        Some(json!({
            "name": name,
            "address": "12 Sukhumvit Rd",
            "tel": "021234567",
            "openTime": "10:00",
            "closeTime": "21:30",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");

    body["data"]["id"].as_str().unwrap().to_string()
}

async fn book(app: &Router, subject: &str, restaurant: &str) -> (StatusCode, Value) {
    send(
        app,
        Method::POST,
        &format!("/api/v1/restaurants/{restaurant}/reservations"),
        Some(subject),
        Some(json!({
            "reservationDate": "2026-06-01T19:00:00Z",
            "details": { "partySize": 2 },
        })),
    )
    .await
}

async fn rate(
    app: &Router,
    subject: &str,
    restaurant: &str,
    rating: Value,
) -> (StatusCode, Value) {
    send(
        app,
        Method::POST,
        &format!("/api/v1/restaurants/{restaurant}/feedbacks"),
        Some(subject),
        Some(json!({ "rating": rating, "description": "Great broth" })),
    )
    .await
}

#[tokio::test]
async fn test_public_routes_need_no_identity() {
    let app = setup().await;

    for uri in ["/", "/health", "/api-docs/openapi.json"] {
        let (status, _) = send(&app, Method::GET, uri, None, None).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
    }
}

#[tokio::test]
async fn test_identity_and_registration_are_required() {
    let app = setup().await;

    let (status, body) = send(&app, Method::GET, "/api/v1/restaurants", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let (status, body) = send(&app, Method::GET, "/api/v1/restaurants", Some(ALICE), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Please register before using this route");
}

#[tokio::test]
async fn test_register_assigns_roles() {
    let app = setup().await;

    register(&app, ADMIN, "admin").await;
    register(&app, ALICE, "alice").await;

    let (status, body) = send(&app, Method::GET, "/api/v1/auth/me", Some(ADMIN), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["role"], "admin");

    let (_, body) = send(&app, Method::GET, "/api/v1/auth/me", Some(ALICE), None).await;
    assert_eq!(body["data"]["role"], "user");
    assert_eq!(body["data"]["email"], "alice@example.com");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/auth/register",
        Some(ALICE),
        Some(json!({ "name": "alice", "email": "other@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "User already registered");
}

#[tokio::test]
async fn test_restaurant_management() {
    let app = setup().await;
    register(&app, ADMIN, "admin").await;
    register(&app, ALICE, "alice").await;

    let pho = json!({
        "name": "Pho",
        "address": "1 Main St",
        "tel": "0812345678",
        "openTime": "25:61",
        "closeTime": "22:00",
    });

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/restaurants",
        Some(ALICE),
        Some(pho.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body["message"],
        "User role user is not authorized to access this route"
    );

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/restaurants",
        Some(ADMIN),
        Some(pho),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .contains("25:61 is not a valid time")
    );

    let (_, body) = send(&app, Method::GET, "/api/v1/restaurants", Some(ALICE), None).await;
    assert_eq!(body["count"], 0);

    let id = create_restaurant(&app, "Pho").await;
    create_restaurant(&app, "Curry House").await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v1/restaurants?page=1&per_page=1",
        Some(ALICE),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["name"], "Curry House");
    assert_eq!(body["pagination"]["total_items"], 2);
    assert_eq!(body["pagination"]["has_next"], true);

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/restaurants/{id}"),
        Some(ADMIN),
        Some(json!({ "closeTime": "23:00" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["closeTime"], "23:00");
    assert_eq!(body["data"]["openTime"], "10:00");

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/v1/restaurants/{id}"),
        Some(ALICE),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Pho");
}

#[tokio::test]
async fn test_booking_quota_and_feedback() {
    let app = setup().await;
    register(&app, ADMIN, "admin").await;
    register(&app, ALICE, "alice").await;
    let pho = create_restaurant(&app, "Pho").await;

    let (status, body) = rate(&app, ALICE, &pho, json!(4)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Cannot add feedback without a prior reservation"
    );

    for _ in 0..3 {
        let (status, body) = book(&app, ALICE, &pho).await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        assert_eq!(body["data"]["restaurant"]["name"], "Pho");
        assert_eq!(body["data"]["details"]["partySize"], 2);
    }

    let (status, body) = book(&app, ALICE, &pho).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .ends_with("has already booked 3 reservations")
    );

    // Admins are not subject to the quota
    for _ in 0..4 {
        let (status, _) = book(&app, ADMIN, &pho).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, _) = rate(&app, ALICE, &pho, json!(6)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, body) = rate(&app, ALICE, &pho, json!(3.5)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Rating must be a whole number");

    let (status, body) = rate(&app, ALICE, &pho, json!(4)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["rating"], 4);
    assert_eq!(body["data"]["user"]["name"], "alice");
    assert_eq!(body["data"]["restaurant"]["tel"], "021234567");

    let (_, body) = send(
        &app,
        Method::GET,
        &format!("/api/v1/restaurants/{pho}/feedbacks"),
        Some(ALICE),
        None,
    )
    .await;
    assert_eq!(body["count"], 1);
}

#[tokio::test]
async fn test_missing_restaurant_is_a_bad_request() {
    let app = setup().await;
    register(&app, ALICE, "alice").await;

    let missing = uuid::Uuid::new_v4();
    let (status, body) = book(&app, ALICE, &missing.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        format!("Cannot find Restaurant with id of {missing}")
    );

    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/api/v1/restaurants/{missing}/reservations"),
        Some(ALICE),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_only_owner_or_admin_may_modify() {
    let app = setup().await;
    register(&app, ADMIN, "admin").await;
    register(&app, ALICE, "alice").await;
    register(&app, BOB, "bob").await;
    let pho = create_restaurant(&app, "Pho").await;

    let (_, body) = book(&app, ALICE, &pho).await;
    let reservation = body["data"]["id"].as_str().unwrap().to_string();
    let uri = format!("/api/v1/reservations/{reservation}");

    let change = json!({ "reservationDate": "2026-07-01T12:00:00Z" });

    let (status, body) = send(&app, Method::PUT, &uri, Some(BOB), Some(change.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .ends_with("is not authorized to update this reservation")
    );
    let (status, _) = send(&app, Method::DELETE, &uri, Some(BOB), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(&app, Method::PUT, &uri, Some(ALICE), Some(change)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["reservationDate"], "2026-07-01T12:00:00Z");

    // Owning the reservation is not enough for the admin routes
    let admin_uri = format!("/api/v1/reservations/admin/{reservation}");
    let (status, _) = send(&app, Method::DELETE, &admin_uri, Some(ALICE), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, Method::DELETE, &admin_uri, Some(ADMIN), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "data": {} }));

    let (status, _) = send(&app, Method::GET, &uri, Some(ALICE), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_listings_are_scoped() {
    let app = setup().await;
    register(&app, ADMIN, "admin").await;
    register(&app, ALICE, "alice").await;
    register(&app, BOB, "bob").await;
    let pho = create_restaurant(&app, "Pho").await;

    book(&app, ALICE, &pho).await;
    book(&app, BOB, &pho).await;
    book(&app, BOB, &pho).await;

    let (_, body) = send(&app, Method::GET, "/api/v1/reservations", Some(ALICE), None).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["restaurant"]["openTime"], "10:00");

    let (_, body) = send(&app, Method::GET, "/api/v1/reservations", Some(ADMIN), None).await;
    assert_eq!(body["count"], 3);

    let (status, _) = send(
        &app,
        Method::GET,
        "/api/v1/reservations/admin/all",
        Some(BOB),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v1/reservations/admin/all",
        Some(ADMIN),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 3);
    assert_eq!(body["data"][0]["user"]["email"], "alice@example.com");
}

#[tokio::test]
async fn test_deleting_restaurant_removes_dependents() {
    let app = setup().await;
    register(&app, ADMIN, "admin").await;
    register(&app, ALICE, "alice").await;
    let pho = create_restaurant(&app, "Pho").await;

    let (_, body) = book(&app, ALICE, &pho).await;
    let reservation = body["data"]["id"].as_str().unwrap().to_string();
    let (_, body) = rate(&app, ALICE, &pho, json!(5)).await;
    let feedback = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/api/v1/restaurants/{pho}"),
        Some(ADMIN),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!({}));

    for uri in [
        format!("/api/v1/restaurants/{pho}"),
        format!("/api/v1/reservations/{reservation}"),
        format!("/api/v1/feedbacks/{feedback}"),
    ] {
        let (status, body) = send(&app, Method::GET, &uri, Some(ALICE), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body["success"], false);
    }
}

#[tokio::test]
async fn test_malformed_requests() {
    let app = setup().await;
    register(&app, ALICE, "alice").await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v1/restaurants/not-a-uuid",
        Some(ALICE),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/v1/restaurants/{}/reservations", uuid::Uuid::new_v4()),
        Some(ALICE),
        Some(json!({ "reservationDate": "next tuesday" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_huge_page_is_an_empty_page() {
    let app = setup().await;
    register(&app, ADMIN, "admin").await;
    register(&app, ALICE, "alice").await;
    create_restaurant(&app, "Pho").await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v1/restaurants?page=18446744073709551615&per_page=100",
        Some(ALICE),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["count"], 0);
    assert_eq!(body["pagination"]["total_items"], 1);
    assert_eq!(body["pagination"]["has_next"], false);
}

async fn reject_all(_request: axum::extract::Request, _next: Next) -> Response {
    StatusCode::UNAUTHORIZED.into_response()
}

#[tokio::test]
async fn test_auth_layer_rejection_is_enveloped() {
    let app = app(state().await, |routes| {
        routes.layer(middleware::from_fn(reject_all))
    });

    let (status, body) = send(&app, Method::GET, "/api/v1/restaurants", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body,
        json!({ "success": false, "message": "Not authorized to access this route" })
    );

    let (status, body) = send(&app, Method::GET, "/no/such/route", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "success": false, "message": "Not Found" }));
}

#[tokio::test]
async fn test_null_clears_optional_fields() {
    let app = setup().await;
    register(&app, ADMIN, "admin").await;
    register(&app, ALICE, "alice").await;
    let pho = create_restaurant(&app, "Pho").await;

    let (_, body) = book(&app, ALICE, &pho).await;
    let uri = format!("/api/v1/reservations/{}", body["data"]["id"].as_str().unwrap());

    let (status, body) = send(&app, Method::PUT, &uri, Some(ALICE), Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["details"]["partySize"], 2);

    let clear = json!({ "details": null });
    let (status, body) = send(&app, Method::PUT, &uri, Some(ALICE), Some(clear)).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["details"], Value::Null);

    let (_, body) = rate(&app, ALICE, &pho, json!(4)).await;
    let uri = format!("/api/v1/feedbacks/{}", body["data"]["id"].as_str().unwrap());

    let clear = json!({ "description": null });
    let (status, body) = send(&app, Method::PUT, &uri, Some(ALICE), Some(clear)).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["description"], Value::Null);
    assert_eq!(body["data"]["rating"], 4);
}
