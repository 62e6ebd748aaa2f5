use std::env;
use tracing::warn;

const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000/api";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub token_store_path: String,
    pub request_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            api_base_url: env::var("CLINIC_API_URL")
                .unwrap_or_else(|_| {
                    warn!("CLINIC_API_URL not set, using default");
                    DEFAULT_API_BASE_URL.to_string()
                }),
            token_store_path: env::var("CLINIC_TOKEN_PATH")
                .unwrap_or_else(|_| default_token_path()),
            request_timeout_secs: env::var("CLINIC_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|raw| {
                    raw.parse().map_err(|_| {
                        warn!("CLINIC_REQUEST_TIMEOUT_SECS is not a number, using default");
                    }).ok()
                })
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.api_base_url.is_empty() && !self.token_store_path.is_empty()
    }
}

fn default_token_path() -> String {
    match env::var("HOME") {
        Ok(home) => format!("{}/.clinic_token", home),
        Err(_) => {
            warn!("HOME not set, storing the session token in the working directory");
            ".clinic_token".to_string()
        }
    }
}
