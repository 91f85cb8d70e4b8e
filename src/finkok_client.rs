use crate::config::Config;
use crate::credentials::Credentials;
use crate::errors::AppError;
use crate::rfc::Rfc;
use serde::Serialize;
use std::time::Duration;

/// Upper bound on a single Finkok call. Requests are never retried.
pub const FINKOK_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = "Monitor-SAT/1.0";

/// Body of a Finkok CFDI status query.
#[derive(Serialize)]
struct StatusRequest<'a> {
    username: &'a str,
    password: &'a str,
    rfc: &'a str,
    certificate: &'a str,
    private_key: &'a str,
}

/// Client for the Finkok CFDI status API.
///
/// Built once at startup and shared through `AppState`; the underlying
/// `reqwest::Client` keeps its connection pool across requests.
#[derive(Clone)]
pub struct FinkokClient {
    client: reqwest::Client,
    api_url: String,
    username: String,
    password: String,
}

impl FinkokClient {
    /// Creates a new `FinkokClient`.
    ///
    /// # Arguments
    ///
    /// * `api_url` - Full URL of the status endpoint.
    /// * `username` - Finkok account user.
    /// * `password` - Finkok account password.
    pub fn new(api_url: String, username: String, password: String) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(FINKOK_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                AppError::InternalError(format!("Failed to create Finkok client: {}", e))
            })?;

        Ok(Self {
            client,
            api_url,
            username,
            password,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Self::new(
            config.finkok_api_url.clone(),
            config.finkok_username.clone(),
            config.finkok_password.clone(),
        )
    }

    /// Queries the CFDI status of a taxpayer.
    ///
    /// # Returns
    ///
    /// * `Result<serde_json::Value, AppError>` - The Finkok response body, unmodified.
    pub async fn query_status(
        &self,
        rfc: &Rfc,
        credentials: &Credentials,
    ) -> Result<serde_json::Value, AppError> {
        tracing::info!("Querying Finkok status for RFC {}", rfc);

        let body = StatusRequest {
            username: &self.username,
            password: &self.password,
            rfc: rfc.as_str(),
            certificate: &credentials.certificate,
            private_key: &credentials.private_key,
        };

        let response = self.client.post(&self.api_url).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::debug!("Finkok error body: {}", error_text);
            return Err(AppError::ExternalApiError(format!(
                "Error de conexión: Finkok returned {}",
                status
            )));
        }

        let data = response.json().await.map_err(|e| {
            AppError::ExternalApiError(format!(
                "Error de conexión: failed to parse Finkok response: {}",
                e
            ))
        })?;

        tracing::info!("✓ Finkok status received for RFC {}", rfc);
        Ok(data)
    }
}
