use std::env;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

use jobconnect_backend::{build_router, store::MemoryStore, AppState};

fn test_app() -> Router {
    env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
    env::set_var("JWT_SECRET", "test_secret_key");
    env::set_var("TOKEN_TTL_HOURS", "24");
    env::set_var("PUBLIC_RPS", "10000");
    env::set_var("AUTH_RPS", "10000");
    let _ = jobconnect_backend::config::init_config();

    build_router(AppState::new(MemoryStore::new()))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<JsonValue>,
) -> (StatusCode, JsonValue) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn register(app: &Router, username: &str) -> (String, String) {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "username": username,
            "email": format!("{}@example.com", username),
            "password": "secret123",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    (
        body["token"].as_str().unwrap().to_string(),
        body["user"]["id"].as_str().unwrap().to_string(),
    )
}

async fn create_offering(app: &Router, token: &str, label: &str, payment: f64) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/offerings",
        Some(token),
        Some(json!({
            "label": label,
            "description": "Some chore that needs doing",
            "location": { "lat": 42.6977, "lng": 23.3219 },
            "paymentPerHour": payment,
            "maxHours": 3.0,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {}", body);
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_endpoint_is_up() {
    let app = test_app();
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn create_and_list_offerings() {
    let app = test_app();
    let (token, user_id) = register(&app, "poster").await;

    create_offering(&app, &token, "Mow my yard", 15.0).await;
    create_offering(&app, &token, "Walk my dog", 10.0).await;

    let (status, body) = send(&app, Method::GET, "/api/offerings", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 10);
    assert_eq!(body["totalPages"], 1);

    let offerings = body["offerings"].as_array().unwrap();
    assert_eq!(offerings.len(), 2);
    assert_eq!(offerings[0]["label"], "Mow my yard");
    assert_eq!(offerings[0]["type"], "job");
    assert_eq!(offerings[0]["paymentPerHour"], 15.0);
    assert_eq!(offerings[0]["applicationsCount"], 0);
    assert_eq!(offerings[0]["requestorId"], user_id.as_str());
}

#[tokio::test]
async fn listing_filters_and_sorts_over_http() {
    let app = test_app();
    let (token, _) = register(&app, "filter_poster").await;
    create_offering(&app, &token, "Cheap chore", 8.0).await;
    create_offering(&app, &token, "Fair chore", 14.0).await;
    create_offering(&app, &token, "Pricey chore", 25.0).await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/offerings?minPay=10&sortBy=payment&sortOrder=desc",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let offerings = body["offerings"].as_array().unwrap();
    assert_eq!(offerings.len(), 2);
    assert_eq!(offerings[0]["paymentPerHour"], 25.0);
    assert_eq!(offerings[1]["paymentPerHour"], 14.0);

    // Drifted legacy parameter spelling is accepted.
    let (status, body) = send(
        &app,
        Method::GET,
        "/api/offerings?minPayment=10",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
}

#[tokio::test]
async fn garbage_query_parameters_never_fail_the_read_path() {
    let app = test_app();
    let (token, _) = register(&app, "garbage_poster").await;
    create_offering(&app, &token, "Some chore", 12.0).await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/offerings?page=-5&limit=0&minPay=abc&sortBy=bogus&lat=north&hasApplications=banana",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 10);
    assert_eq!(body["total"], 1);
}

#[tokio::test]
async fn legacy_mode_returns_a_bare_array() {
    let app = test_app();
    let (token, _) = register(&app, "legacy_poster").await;
    create_offering(&app, &token, "First chore", 12.0).await;
    create_offering(&app, &token, "Second chore", 14.0).await;

    let (status, body) = send(&app, Method::GET, "/api/offerings?legacy=true", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().expect("legacy mode must be a bare array");
    assert_eq!(items.len(), 2);
    // Newest first.
    assert_eq!(items[0]["label"], "Second chore");
}

#[tokio::test]
async fn get_offering_embeds_requestor_summary() {
    let app = test_app();
    let (token, user_id) = register(&app, "detail_poster").await;
    let id = create_offering(&app, &token, "Paint my fence", 18.0).await;

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/offerings/{}", id),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["label"], "Paint my fence");
    assert_eq!(body["requestor"]["id"], user_id.as_str());
    assert_eq!(body["requestor"]["username"], "detail_poster");
    assert_eq!(body["requestor"]["rating"], 5.0);

    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/api/offerings/{}", uuid::Uuid::new_v4()),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_requires_authentication_and_valid_payload() {
    let app = test_app();

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/offerings",
        None,
        Some(json!({
            "label": "No token chore",
            "location": { "lat": 1.0, "lng": 1.0 },
            "paymentPerHour": 10.0,
            "maxHours": 1.0,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (token, _) = register(&app, "strict_poster").await;

    // Too-short label.
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/offerings",
        Some(&token),
        Some(json!({
            "label": "ab",
            "location": { "lat": 1.0, "lng": 1.0 },
            "paymentPerHour": 10.0,
            "maxHours": 1.0,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Latitude out of range.
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/offerings",
        Some(&token),
        Some(json!({
            "label": "Broken location",
            "location": { "lat": 200.0, "lng": 1.0 },
            "paymentPerHour": 10.0,
            "maxHours": 1.0,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Non-positive payment.
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/offerings",
        Some(&token),
        Some(json!({
            "label": "Free labour",
            "location": { "lat": 1.0, "lng": 1.0 },
            "paymentPerHour": 0.0,
            "maxHours": 1.0,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_and_delete_are_owner_only() {
    let app = test_app();
    let (owner_token, _) = register(&app, "owner").await;
    let (other_token, _) = register(&app, "intruder").await;
    let id = create_offering(&app, &owner_token, "Clean my garage", 20.0).await;

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/offerings/{}", id),
        Some(&other_token),
        Some(json!({ "label": "Hijacked chore" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/offerings/{}", id),
        Some(&owner_token),
        Some(json!({ "label": "Clean my garage thoroughly", "paymentPerHour": 22.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["label"], "Clean my garage thoroughly");
    assert_eq!(body["paymentPerHour"], 22.0);
    assert!(body["updatedAt"].as_str().unwrap() >= body["createdAt"].as_str().unwrap());

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/offerings/{}", id),
        Some(&other_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/offerings/{}", id),
        Some(&owner_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/api/offerings/{}", id),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn apply_flow_rejects_duplicates_and_counts_once() {
    let app = test_app();
    let (owner_token, _) = register(&app, "apply_owner").await;
    let (applicant_token, applicant_id) = register(&app, "applicant").await;
    let id = create_offering(&app, &owner_token, "Assemble furniture", 16.0).await;

    let apply_uri = format!("/api/offerings/{}/apply", id);
    let (status, body) = send(
        &app,
        Method::POST,
        &apply_uri,
        Some(&applicant_token),
        Some(json!({ "message": "I have my own toolbox." })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Application submitted successfully");
    assert_eq!(body["application"]["status"], "pending");
    assert_eq!(body["application"]["applicantId"], applicant_id.as_str());

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/offerings/{}", id),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["applicationsCount"], 1);

    // Second attempt by the same user is rejected and the count stays put.
    let (status, body) = send(
        &app,
        Method::POST,
        &apply_uri,
        Some(&applicant_token),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Already applied"));

    let (_, body) = send(
        &app,
        Method::GET,
        &format!("/api/offerings/{}", id),
        None,
        None,
    )
    .await;
    assert_eq!(body["applicationsCount"], 1);

    // Unknown offering.
    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/offerings/{}/apply", uuid::Uuid::new_v4()),
        Some(&applicant_token),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn applied_status_and_applicant_listing() {
    let app = test_app();
    let (owner_token, _) = register(&app, "listing_owner").await;
    let (applicant_token, _) = register(&app, "keen_applicant").await;
    let id = create_offering(&app, &owner_token, "Weed the garden", 11.0).await;

    let applied_uri = format!("/api/offerings/{}/applied", id);
    let (status, body) = send(&app, Method::GET, &applied_uri, Some(&applicant_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hasApplied"], false);
    assert!(body["application"].is_null());

    send(
        &app,
        Method::POST,
        &format!("/api/offerings/{}/apply", id),
        Some(&applicant_token),
        Some(json!({ "message": "Green fingers here." })),
    )
    .await;

    let (_, body) = send(&app, Method::GET, &applied_uri, Some(&applicant_token), None).await;
    assert_eq!(body["hasApplied"], true);
    assert_eq!(body["application"]["message"], "Green fingers here.");

    let applicants_uri = format!("/api/offerings/{}/applicants", id);
    let (status, _) = send(&app, Method::GET, &applicants_uri, Some(&applicant_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, Method::GET, &applicants_uri, Some(&owner_token), None).await;
    assert_eq!(status, StatusCode::OK);
    let applicants = body.as_array().unwrap();
    assert_eq!(applicants.len(), 1);
    assert_eq!(applicants[0]["applicantDetails"]["username"], "keen_applicant");
    assert_eq!(applicants[0]["status"], "pending");
}

#[tokio::test]
async fn pagination_envelope_over_http() {
    let app = test_app();
    let (token, _) = register(&app, "paging_poster").await;
    for i in 0..5 {
        create_offering(&app, &token, &format!("Chore number {}", i), 10.0 + i as f64).await;
    }

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/offerings?sortBy=payment&sortOrder=asc&page=2&limit=2",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 5);
    assert_eq!(body["totalPages"], 3);
    let offerings = body["offerings"].as_array().unwrap();
    assert_eq!(offerings.len(), 2);
    assert_eq!(offerings[0]["paymentPerHour"], 12.0);
    assert_eq!(offerings[1]["paymentPerHour"], 13.0);
}
