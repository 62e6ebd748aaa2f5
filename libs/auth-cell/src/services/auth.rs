use std::sync::Arc;
use tracing::debug;

use shared_gateway::ApiClient;
use shared_models::{ApiError, LoginRequest, LoginResponse, PatientProfile, RegisterRequest};
use shared_session::SessionStore;

/// Login/registration orchestration: the gateway talks to the backend, the
/// session store keeps the resulting token.
pub struct AuthService {
    gateway: Arc<ApiClient>,
    session: Arc<SessionStore>,
}

impl AuthService {
    pub fn new(gateway: Arc<ApiClient>, session: Arc<SessionStore>) -> Self {
        Self { gateway, session }
    }

    /// Registration does not log the patient in; the backend only creates
    /// the account.
    pub async fn register(&self, request: &RegisterRequest) -> Result<PatientProfile, ApiError> {
        debug!("Registering patient {}", request.email);
        self.gateway.register(request).await
    }

    /// On success the token is committed to the session store before the
    /// response is handed back, so subsequent gateway calls are
    /// authenticated.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let response = self
            .gateway
            .login(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await?;

        self.session
            .set_token(Some(response.token.clone()))
            .map_err(|err| ApiError::Internal(err.to_string()))?;

        debug!("Logged in as {}", response.email);
        Ok(response)
    }

    pub fn logout(&self) -> Result<(), ApiError> {
        self.session
            .set_token(None)
            .map_err(|err| ApiError::Internal(err.to_string()))
    }
}
