mod common;

use api_lib::web::{rest::ApiDoc, router};
use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use common::{state, FailingGenerator, MemoryVault, UnconfiguredVault};
use momo_core::{mock_summary::MockSummaryGenerator, ports::PortError};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use utoipa::OpenApi;

fn app() -> Router {
    router(state(0, Arc::new(MockSummaryGenerator), Arc::new(MemoryVault::default())))
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header("content-type", "application/json");
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
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

#[tokio::test]
async fn moments_are_classified_and_appended() {
    let app = app();

    let (status, moment) = call(
        &app,
        Method::POST,
        "/days/2024-05-01/moments",
        Some(json!({ "text": "Deadline looming. Stressed.", "location": "Home Office" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(moment["emotion"], "stressed");
    assert_eq!(moment["tags"], json!(["Work", "Pressure"]));
    assert_eq!(moment["location"], "Home Office");

    call(
        &app,
        Method::POST,
        "/days/2024-05-01/moments",
        Some(json!({ "text": "Long walk by the pier" })),
    )
    .await;

    let (status, day) = call(&app, Method::GET, "/days/2024-05-01", None).await;
    assert_eq!(status, StatusCode::OK);
    let texts: Vec<_> = day["moments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["text"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(texts, ["Deadline looming. Stressed.", "Long walk by the pier"]);
    assert_eq!(day["moments"][1]["emotion"], "calm");
    assert!(day["summary"].is_null());
}

#[tokio::test]
async fn blank_moment_is_rejected() {
    let app = app();
    let (status, body) = call(
        &app,
        Method::POST,
        "/days/2024-05-01/moments",
        Some(json!({ "text": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Invalid input"));

    let (_, day) = call(&app, Method::GET, "/days/2024-05-01", None).await;
    assert_eq!(day["moments"], json!([]));
}

#[tokio::test]
async fn unknown_day_is_empty_and_bad_dates_are_rejected() {
    let app = app();
    let (status, day) = call(&app, Method::GET, "/days/1999-12-31", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(day, json!({ "moments": [], "summary": null }));

    let (status, _) = call(&app, Method::GET, "/days/yesterday", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn story_is_generated_stored_and_actions_toggle() {
    let app = app();
    call(
        &app,
        Method::POST,
        "/days/2024-05-02/moments",
        Some(json!({ "text": "Shipped the hackathon code" })),
    )
    .await;

    let (status, summary) = call(&app, Method::POST, "/days/2024-05-02/story", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["mood"], 7);
    assert_eq!(summary["highlights"].as_array().unwrap().len(), 1);

    let (_, day) = call(&app, Method::GET, "/days/2024-05-02", None).await;
    assert_eq!(day["summary"], summary);
    assert_eq!(
        day["summary"]["highlights"][0]["sourceMomentId"],
        day["moments"][0]["id"]
    );

    let (status, toggled) = call(&app, Method::PATCH, "/days/2024-05-02/actions/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(toggled, json!({ "completed": true }));

    let (status, _) = call(&app, Method::PATCH, "/days/2024-05-02/actions/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(&app, Method::GET, "/days/2024-05-02/story/progress", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn generator_failures_map_to_statuses() {
    let cases = [
        (PortError::InvalidInput("no moments".into()), StatusCode::BAD_REQUEST),
        (PortError::Configuration("no key".into()), StatusCode::SERVICE_UNAVAILABLE),
        (PortError::Network("timed out".into()), StatusCode::BAD_GATEWAY),
        (PortError::MalformedResponse("not json".into()), StatusCode::BAD_GATEWAY),
    ];

    for (err, expected) in cases {
        let app = router(state(
            0,
            Arc::new(FailingGenerator(err.clone())),
            Arc::new(MemoryVault::default()),
        ));
        let (status, body) = call(&app, Method::POST, "/days/2024-05-03/story", None).await;
        assert_eq!(status, expected, "{err:?}");
        assert_eq!(body["error"], err.to_string());

        let (_, day) = call(&app, Method::GET, "/days/2024-05-03", None).await;
        assert!(day["summary"].is_null());
    }
}

#[tokio::test]
async fn calendar_lists_days_of_the_month() {
    let app = app();
    for date in ["2024-06-02", "2024-06-20", "2024-07-01"] {
        call(
            &app,
            Method::POST,
            &format!("/days/{date}/moments"),
            Some(json!({ "text": "great day" })),
        )
        .await;
    }
    call(&app, Method::POST, "/days/2024-06-20/story", None).await;

    let (status, days) = call(&app, Method::GET, "/calendar/2024/6", None).await;
    assert_eq!(status, StatusCode::OK);
    let days = days.as_array().unwrap();
    assert_eq!(days.len(), 2);
    assert_eq!(days[0]["date"], "2024-06-02");
    assert_eq!(days[0]["momentCount"], 1);
    assert!(days[0]["mood"].is_null());
    assert_eq!(days[1]["mood"], 7);
    assert_eq!(days[1]["band"], "steady");

    let (status, _) = call(&app, Method::GET, "/calendar/2024/13", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn profile_round_trip_through_the_vault() {
    let app = app();

    let (status, _) = call(&app, Method::GET, "/profile", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, receipt) = call(
        &app,
        Method::POST,
        "/profile/sample",
        Some(json!({ "nationality": "CANADIAN" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(receipt["vaultId"], "rec-1");

    let (status, profile) = call(&app, Method::GET, "/profile", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["nationality"], "CANADIAN");
    assert_eq!(profile["name"]["first_name"], "Henry");

    let (status, _) = call(&app, Method::POST, "/profile", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn sample_profile_without_body() {
    let app = app();
    let (status, receipt) = call(&app, Method::POST, "/profile/sample", None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(receipt["vaultId"], "rec-1");

    let (_, profile) = call(&app, Method::GET, "/profile", None).await;
    assert_eq!(profile["nationality"], "vietnam");
}

#[tokio::test]
async fn unconfigured_vault_is_unavailable() {
    let app = router(state(0, Arc::new(MockSummaryGenerator), Arc::new(UnconfiguredVault)));
    let (status, body) = call(&app, Method::GET, "/profile", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["error"].as_str().unwrap().contains("not configured"));
}

#[test]
fn openapi_documents_profile_bodies() {
    let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
    let paths = &doc["paths"];

    for route in ["/profile", "/profile/sample"] {
        let body = &paths[route]["post"]["requestBody"]["content"]["application/json"];
        assert!(body["schema"].is_object(), "{route}");
    }
    assert!(paths["/days/{date}/moments"]["post"]["requestBody"].is_object());
    assert!(paths["/calendar/{year}/{month}"]["get"].is_object());
    assert!(paths["/days/{date}/actions/{action_id}"]["patch"].is_object());
}
