use chrono::NaiveDate;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client, Method,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

use shared_config::AppConfig;
use shared_models::{
    ApiError, Appointment, Doctor, LoginRequest, LoginResponse, PatientProfile, RegisterRequest,
    Slot, UpdateProfileRequest,
};
use shared_session::SessionStore;

/// Typed façade over the backend. Stateless pass-through: its only added
/// behavior is attaching the session's auth token to every outbound call.
/// No retries, no caching.
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl ApiClient {
    pub fn new(config: &AppConfig, session: Arc<SessionStore>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    fn headers(&self) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = self.session.token() {
            let value = HeaderValue::from_str(&format!("Token {}", token)).map_err(|_| {
                ApiError::Validation("session token contains invalid header characters".to_string())
            })?;
            headers.insert(AUTHORIZATION, value);
        }

        Ok(headers)
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<reqwest::Response, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Making request to {}", url);

        let mut request = self.client.request(method, &url).headers(self.headers()?);

        if let Some(body_data) = body {
            request = request.json(&body_data);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("API error ({}): {}", status, error_text);
            return Err(ApiError::from_response(status.as_u16(), &error_text));
        }

        Ok(response)
    }

    async fn request<T>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let response = self.execute(method, path, body).await?;
        let data = response.json::<T>().await?;
        Ok(data)
    }

    async fn request_no_content(&self, method: Method, path: &str) -> Result<(), ApiError> {
        self.execute(method, path, None).await?;
        Ok(())
    }

    // Patient / user

    pub async fn register(&self, request: &RegisterRequest) -> Result<PatientProfile, ApiError> {
        self.request(Method::POST, "/register/", Some(to_body(request)?))
            .await
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.request(Method::POST, "/login/", Some(to_body(request)?))
            .await
    }

    pub async fn get_profile(&self) -> Result<PatientProfile, ApiError> {
        self.request(Method::GET, "/me/", None).await
    }

    pub async fn update_profile(
        &self,
        request: &UpdateProfileRequest,
    ) -> Result<PatientProfile, ApiError> {
        self.request(Method::PUT, "/me/", Some(to_body(request)?))
            .await
    }

    // Doctors

    pub async fn get_doctors(&self) -> Result<Vec<Doctor>, ApiError> {
        self.request(Method::GET, "/doctors/", None).await
    }

    pub async fn get_doctor(&self, id: i64) -> Result<Doctor, ApiError> {
        self.request(Method::GET, &format!("/doctors/{}/", id), None)
            .await
    }

    // Schedules

    /// Without a date the server answers the full upcoming schedule; with one
    /// it scopes the listing server-side.
    pub async fn get_schedules(
        &self,
        doctor_id: i64,
        date: Option<NaiveDate>,
    ) -> Result<Vec<Slot>, ApiError> {
        let mut path = format!("/schedules/?doctor_id={}", doctor_id);
        if let Some(date) = date {
            path.push_str(&format!("&date={}", date));
        }
        self.request(Method::GET, &path, None).await
    }

    // Appointments

    pub async fn create_appointment(&self, schedule_id: i64) -> Result<Appointment, ApiError> {
        self.request(
            Method::POST,
            "/appointments/",
            Some(json!({ "schedule": schedule_id })),
        )
        .await
    }

    pub async fn get_appointments(&self) -> Result<Vec<Appointment>, ApiError> {
        self.request(Method::GET, "/appointments/", None).await
    }

    /// The backend answers 204 on a successful cancellation.
    pub async fn cancel_appointment(&self, id: i64) -> Result<(), ApiError> {
        self.request_no_content(Method::PATCH, &format!("/appointments/{}/cancel/", id))
            .await
    }
}

fn to_body<T: Serialize>(value: &T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|err| ApiError::Internal(err.to_string()))
}
