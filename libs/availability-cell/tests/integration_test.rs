use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use availability_cell::{availability_routes, working_hours_routes, AppState, FixedClock};
use shared_utils::test_utils::{MockBackendResponses, TestConfig, TestDoctor};

// 2026-10-16 is a Friday
fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

fn create_test_app(mock_server: &MockServer) -> Router {
    let config = TestConfig::with_backend(mock_server.uri()).to_app_config();
    let state = Arc::new(AppState::with_clock(config, Arc::new(FixedClock(today()))));

    Router::new()
        .nest("/doctors", availability_routes(state))
        .nest("/working-hours", working_hours_routes())
}

async fn mount_doctor(mock_server: &MockServer, doctor: &TestDoctor) {
    Mock::given(method("GET"))
        .and(path(format!("/api/doctors/{}", doctor.id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockBackendResponses::doctor_response(doctor)))
        .mount(mock_server)
        .await;
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_available_dates_default_booking_horizon() {
    let mock_server = MockServer::start().await;
    let doctor = TestDoctor::new("Monday, Wednesday 09:00 - 17:00");
    mount_doctor(&mock_server, &doctor).await;

    let app = create_test_app(&mock_server);
    let (status, body) = send(app, get(&format!("/doctors/{}/available-dates", doctor.id))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["horizon_days"], 30);
    assert_eq!(body["doctor_id"], doctor.id.as_str());
    assert_eq!(body["dates"].as_array().unwrap().len(), 8);
    assert_eq!(body["dates"][0], "2026-10-19");
}

#[tokio::test]
async fn test_available_dates_reschedule_horizon() {
    let mock_server = MockServer::start().await;
    let doctor = TestDoctor::new("09:00 - 17:00");
    mount_doctor(&mock_server, &doctor).await;

    let app = create_test_app(&mock_server);
    let (status, body) = send(
        app,
        get(&format!("/doctors/{}/available-dates?horizon_days=14", doctor.id)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["dates"].as_array().unwrap().len(), 14);
    assert_eq!(body["dates"][0], "2026-10-16");
    assert_eq!(body["dates"][13], "2026-10-29");
}

#[tokio::test]
async fn test_unavailable_doctor_gets_no_dates_unless_gate_ignored() {
    let mock_server = MockServer::start().await;
    let doctor = TestDoctor::unavailable("09:00 - 17:00");
    mount_doctor(&mock_server, &doctor).await;

    let (status, body) = send(
        create_test_app(&mock_server),
        get(&format!("/doctors/{}/available-dates", doctor.id)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["dates"], json!([]));

    let (status, body) = send(
        create_test_app(&mock_server),
        get(&format!("/doctors/{}/available-dates?gate=ignore", doctor.id)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["dates"].as_array().unwrap().len(), 30);
}

#[tokio::test]
async fn test_available_dates_abbreviated_matching() {
    let mock_server = MockServer::start().await;
    let doctor = TestDoctor::new("Mon-Fri 08:00 - 12:00");
    mount_doctor(&mock_server, &doctor).await;

    let (_, exact) = send(
        create_test_app(&mock_server),
        get(&format!("/doctors/{}/available-dates?horizon_days=7", doctor.id)),
    )
    .await;
    let (_, abbreviated) = send(
        create_test_app(&mock_server),
        get(&format!("/doctors/{}/available-dates?horizon_days=7&matching=abbreviated", doctor.id)),
    )
    .await;

    assert_eq!(exact["dates"], json!([]));
    assert_eq!(
        abbreviated["dates"],
        json!(["2026-10-16", "2026-10-19", "2026-10-20", "2026-10-21", "2026-10-22"])
    );
}

#[tokio::test]
async fn test_invalid_horizon_is_rejected() {
    let mock_server = MockServer::start().await;
    let doctor = TestDoctor::default();
    mount_doctor(&mock_server, &doctor).await;

    let (status, body) = send(
        create_test_app(&mock_server),
        get(&format!("/doctors/{}/available-dates?horizon_days=0", doctor.id)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Horizon"));
}

#[tokio::test]
async fn test_available_times_excludes_booked_and_forwards_token() {
    let mock_server = MockServer::start().await;
    let doctor = TestDoctor::new("Monday 09:00 - 10:00");

    Mock::given(method("GET"))
        .and(path(format!("/api/doctors/{}", doctor.id)))
        .and(header("authorization", "Bearer patient-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockBackendResponses::wrapped_doctor_response(&doctor)))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/api/doctors/{}/booked-times", doctor.id)))
        .and(query_param("date", "2026-10-19"))
        .and(header("authorization", "Bearer patient-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockBackendResponses::booked_times_response(&["09:30:00"])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let request = Request::builder()
        .method("GET")
        .uri(format!("/doctors/{}/available-times?date=2026-10-19", doctor.id))
        .header("Authorization", "Bearer patient-token")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(create_test_app(&mock_server), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["date"], "2026-10-19");
    assert_eq!(body["times"], json!(["09:00"]));
}

#[tokio::test]
async fn test_available_times_survives_booked_times_outage() {
    let mock_server = MockServer::start().await;
    let doctor = TestDoctor::new("Monday 09:00 - 10:00");
    mount_doctor(&mock_server, &doctor).await;

    Mock::given(method("GET"))
        .and(path(format!("/api/doctors/{}/booked-times", doctor.id)))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let (status, body) = send(
        create_test_app(&mock_server),
        get(&format!("/doctors/{}/available-times?date=2026-10-19", doctor.id)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["times"], json!(["09:00", "09:30"]));
}

#[tokio::test]
async fn test_available_times_rejects_bad_date() {
    let mock_server = MockServer::start().await;
    let doctor = TestDoctor::default();
    mount_doctor(&mock_server, &doctor).await;

    let (status, _) = send(
        create_test_app(&mock_server),
        get(&format!("/doctors/{}/available-times?date=19-10-2026", doctor.id)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_doctor_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/doctors/ghost"))
        .respond_with(ResponseTemplate::new(404).set_body_json(MockBackendResponses::error_response("Doctor not found")))
        .mount(&mock_server)
        .await;

    let (status, body) = send(create_test_app(&mock_server), get("/doctors/ghost/available-dates")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("ghost"));
}

#[tokio::test]
async fn test_backend_failure_on_doctor_lookup_is_bad_gateway() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/doctors/d-500"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let (status, _) = send(create_test_app(&mock_server), get("/doctors/d-500/available-times?date=2026-10-19")).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_working_hours_for_doctor_without_schedule() {
    let mock_server = MockServer::start().await;
    let doctor = TestDoctor::without_schedule();
    mount_doctor(&mock_server, &doctor).await;

    let (status, body) = send(
        create_test_app(&mock_server),
        get(&format!("/doctors/{}/working-hours", doctor.id)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["working_hours"]["days"], json!([]));
    assert_eq!(body["working_hours"]["start"], "09:00");
    assert_eq!(body["working_hours"]["end"], "17:00");
    assert_eq!(body["working_hours"]["time"], "");
}

#[tokio::test]
async fn test_preview_working_hours() {
    let mock_server = MockServer::start().await;
    let request = Request::builder()
        .method("POST")
        .uri("/working-hours/preview")
        .header("Content-Type", "application/json")
        .body(Body::from(json!({ "working_hours": "Monday, Thurs 1:00 PM - 2:00 PM" }).to_string()))
        .unwrap();

    let (status, body) = send(create_test_app(&mock_server), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["days"], json!(["Monday", "Thurs"]));
    assert_eq!(body["start"], "13:00");
    assert_eq!(body["end"], "14:00");
    assert_eq!(body["time"], "13:00 - 14:00");
    assert_eq!(body["abbreviated_days"], json!(["Mon", "Thu"]));
    assert_eq!(body["slots"], json!(["13:00", "13:30"]));
}

#[tokio::test]
async fn test_time_slots_endpoint() {
    let mock_server = MockServer::start().await;

    let (status, body) = send(
        create_test_app(&mock_server),
        get("/working-hours/slots?start=09:00&end=10:00"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["slots"], json!(["09:00", "09:30"]));

    let (status, body) = send(
        create_test_app(&mock_server),
        get("/working-hours/slots?start=17:00&end=09:00&granularity=15"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["slots"], json!([]));

    let (status, _) = send(
        create_test_app(&mock_server),
        get("/working-hours/slots?start=09:00&end=10:00&granularity=0"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_encoded_traversal_in_doctor_id_never_reaches_backend() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": "admin" }])))
        .expect(0)
        .mount(&mock_server)
        .await;

    for uri in [
        "/doctors/%2E%2E%2Fadmin%2Fusers/working-hours",
        "/doctors/..%2Fadmin%2Fusers/available-dates",
        "/doctors/..%2F..%2Fapi%2Fadmin%2Fusers/available-times?date=2026-10-19",
    ] {
        let (status, body) = send(create_test_app(&mock_server), get(uri)).await;

        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert!(body["error"].is_string(), "{}", uri);
    }
}

#[tokio::test]
async fn test_unknown_query_variant_gets_json_error_body() {
    let mock_server = MockServer::start().await;
    let doctor = TestDoctor::new("Monday 09:00 - 17:00");
    mount_doctor(&mock_server, &doctor).await;

    let (status, body) = send(
        create_test_app(&mock_server),
        get(&format!("/doctors/{}/available-dates?matching=bogus", doctor.id)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send(
        create_test_app(&mock_server),
        get(&format!("/doctors/{}/available-dates?gate=sometimes", doctor.id)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send(create_test_app(&mock_server), get("/working-hours/slots?start=09:00")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_malformed_preview_body_gets_json_error_body() {
    let mock_server = MockServer::start().await;
    let request = Request::builder()
        .method("POST")
        .uri("/working-hours/preview")
        .header("Content-Type", "application/json")
        .body(Body::from("{ not json"))
        .unwrap();

    let (status, body) = send(create_test_app(&mock_server), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}
