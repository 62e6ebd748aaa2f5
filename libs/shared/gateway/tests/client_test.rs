use std::sync::Arc;

use assert_matches::assert_matches;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shared_config::AppConfig;
use shared_gateway::ApiClient;
use shared_models::{ApiError, AppointmentStatus, LoginRequest, RegisterRequest, UpdateProfileRequest};
use shared_session::{MemoryTokenStore, SessionStore};

fn test_config(base_url: &str) -> AppConfig {
    AppConfig {
        api_base_url: base_url.to_string(),
        token_store_path: String::new(),
        request_timeout_secs: 5,
    }
}

fn logged_in_client(base_url: &str, token: &str) -> ApiClient {
    let session = SessionStore::new(Box::new(MemoryTokenStore::with_token(token))).unwrap();
    ApiClient::new(&test_config(base_url), Arc::new(session)).unwrap()
}

fn anonymous_client(base_url: &str) -> ApiClient {
    let session = SessionStore::new(Box::new(MemoryTokenStore::new())).unwrap();
    ApiClient::new(&test_config(base_url), Arc::new(session)).unwrap()
}

#[tokio::test]
async fn attaches_session_token_to_outbound_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/doctors/"))
        .and(header("Authorization", "Token secret-token-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = logged_in_client(&mock_server.uri(), "secret-token-123");
    let doctors = client.get_doctors().await.unwrap();
    assert!(doctors.is_empty());
}

#[tokio::test]
async fn sends_unauthenticated_requests_without_auth_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/doctors/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let client = anonymous_client(&mock_server.uri());
    client.get_doctors().await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn login_parses_token_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login/"))
        .and(body_json(json!({
            "email": "pat@example.com",
            "password": "hunter2"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "fresh-token",
            "user_id": 7,
            "email": "pat@example.com"
        })))
        .mount(&mock_server)
        .await;

    let client = anonymous_client(&mock_server.uri());
    let response = client
        .login(&LoginRequest {
            email: "pat@example.com".to_string(),
            password: "hunter2".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(response.token, "fresh-token");
    assert_eq!(response.user_id, 7);
}

#[tokio::test]
async fn login_failure_surfaces_server_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "non_field_errors": ["Unable to log in with provided credentials."]
        })))
        .mount(&mock_server)
        .await;

    let client = anonymous_client(&mock_server.uri());
    let err = client
        .login(&LoginRequest {
            email: "pat@example.com".to_string(),
            password: "wrong".to_string(),
        })
        .await
        .unwrap_err();

    assert_matches!(err, ApiError::Request { status: Some(400), ref message }
        if message == "Unable to log in with provided credentials.");
}

#[tokio::test]
async fn unauthorized_response_maps_to_authorization_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Invalid token."
        })))
        .mount(&mock_server)
        .await;

    let client = logged_in_client(&mock_server.uri(), "stale-token");
    let err = client.get_profile().await.unwrap_err();

    assert!(err.is_authorization());
    assert_eq!(err.status(), Some(401));
}

#[tokio::test]
async fn conflict_response_maps_to_conflict_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/appointments/"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "error": "This schedule is not available."
        })))
        .mount(&mock_server)
        .await;

    let client = logged_in_client(&mock_server.uri(), "tok");
    let err = client.create_appointment(42).await.unwrap_err();

    assert_matches!(err, ApiError::Conflict(ref message)
        if message == "This schedule is not available.");
}

#[tokio::test]
async fn create_appointment_posts_schedule_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/appointments/"))
        .and(body_json(json!({ "schedule": 101 })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 500,
            "schedule": 101,
            "status": "booked",
            "created_at": "2025-10-01T09:30:00Z"
        })))
        .mount(&mock_server)
        .await;

    let client = logged_in_client(&mock_server.uri(), "tok");
    let appointment = client.create_appointment(101).await.unwrap();

    assert_eq!(appointment.id, 500);
    assert_eq!(appointment.schedule_id, 101);
    assert_eq!(appointment.status, AppointmentStatus::Booked);
}

#[tokio::test]
async fn schedule_fetch_forwards_doctor_and_date_filters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/schedules/"))
        .and(query_param("doctor_id", "7"))
        .and(query_param("date", "2025-10-20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 101,
            "doctor": 7,
            "date": "2025-10-20",
            "start_time": "09:00:00",
            "end_time": "09:30:00",
            "is_available": true
        }])))
        .mount(&mock_server)
        .await;

    let client = logged_in_client(&mock_server.uri(), "tok");
    let slots = client
        .get_schedules(7, Some("2025-10-20".parse().unwrap()))
        .await
        .unwrap();

    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].id, 101);
    assert!(slots[0].is_available);
}

#[tokio::test]
async fn register_creates_patient_account() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/register/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 12,
            "username": "pat",
            "email": "pat@example.com",
            "phone": null,
            "birthday": null
        })))
        .mount(&mock_server)
        .await;

    let client = anonymous_client(&mock_server.uri());
    let profile = client
        .register(&RegisterRequest {
            username: "pat".to_string(),
            email: "pat@example.com".to_string(),
            password: "hunter2".to_string(),
            phone: None,
            birthday: None,
        })
        .await
        .unwrap();

    assert_eq!(profile.id, 12);
    assert_eq!(profile.username, "pat");
}

#[tokio::test]
async fn update_profile_round_trips() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/me/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3,
            "username": "pat",
            "email": "pat@example.com",
            "phone": "+35312345678",
            "birthday": "1990-01-01"
        })))
        .mount(&mock_server)
        .await;

    let client = logged_in_client(&mock_server.uri(), "tok");
    let profile = client
        .update_profile(&UpdateProfileRequest {
            username: None,
            phone: Some("+35312345678".to_string()),
            birthday: None,
        })
        .await
        .unwrap();

    assert_eq!(profile.phone, Some("+35312345678".to_string()));
    assert_eq!(profile.birthday, Some("1990-01-01".parse().unwrap()));
}

#[tokio::test]
async fn get_doctor_fetches_a_single_doctor() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/doctors/7/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "name": "Alice Williams",
            "specialty": "Cardiology",
            "department": "Internal Medicine"
        })))
        .mount(&mock_server)
        .await;

    let client = logged_in_client(&mock_server.uri(), "tok");
    let doctor = client.get_doctor(7).await.unwrap();

    assert_eq!(doctor.display_name(), "Dr. Alice Williams");
    assert_eq!(doctor.specialty, "Cardiology");
}

#[tokio::test]
async fn lists_the_patients_appointments() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/appointments/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 500, "schedule": 101, "status": "booked"},
            {"id": 400, "schedule": 90, "status": "cancelled"}
        ])))
        .mount(&mock_server)
        .await;

    let client = logged_in_client(&mock_server.uri(), "tok");
    let appointments = client.get_appointments().await.unwrap();

    assert_eq!(appointments.len(), 2);
    assert!(appointments[0].status.is_cancellable());
    assert!(!appointments[1].status.is_cancellable());
}

#[tokio::test]
async fn cancel_appointment_accepts_no_content() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/appointments/500/cancel/"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let client = logged_in_client(&mock_server.uri(), "tok");
    client.cancel_appointment(500).await.unwrap();
}
