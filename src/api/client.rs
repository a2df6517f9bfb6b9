// Settings API HTTP client.
// Handles authentication, timeouts, and request/response processing for the
// singleton settings resource.

use std::time::Duration;

use reqwest::{
    Client, Response, StatusCode,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT},
};

use crate::error::{Result, SettingsError};
use crate::snapshot::SettingsSnapshot;

/// Environment variable naming the API base URL.
const API_URL_VAR: &str = "CARAVAN_API_URL";
/// Environment variable naming the optional bearer token.
const API_TOKEN_VAR: &str = "CARAVAN_API_TOKEN";
/// Per-request timeout. A fetch has to fail fast enough for the cache
/// fallback to be worth anything.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Typed client for the remote settings resource.
pub struct SettingsApi {
    client: Client,
    base_url: String,
}

impl SettingsApi {
    /// Create a new client against the given base URL, optionally authenticated.
    pub fn new(base_url: impl Into<String>, token: Option<&str>) -> Result<Self> {
        let mut headers = HeaderMap::new();

        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("caravan-settings"));

        if let Some(token) = token {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(|e| SettingsError::Other(e.to_string()))?,
            );
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(SettingsError::Remote)?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    /// Create a client from the CARAVAN_API_URL and CARAVAN_API_TOKEN
    /// environment variables.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var(API_URL_VAR).map_err(|_| SettingsError::MissingApiUrl)?;
        let token = std::env::var(API_TOKEN_VAR).ok();
        Self::new(base_url, token.as_deref())
    }

    /// Fetch the current settings snapshot.
    pub async fn fetch(&self) -> Result<SettingsSnapshot> {
        let url = format!("{}/settings", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(SettingsError::Remote)?;

        let response = self.check_response(response).await?;
        let snapshot: SettingsSnapshot = response.json().await?;
        Ok(snapshot)
    }

    /// Send a complete or partial snapshot. Returns the canonical snapshot as
    /// stored by the API.
    pub async fn update(&self, snapshot: &SettingsSnapshot) -> Result<SettingsSnapshot> {
        let url = format!("{}/settings", self.base_url);
        let response = self
            .client
            .put(&url)
            .json(snapshot)
            .send()
            .await
            .map_err(SettingsError::Remote)?;

        let response = self.check_response(response).await?;
        let canonical: SettingsSnapshot = response.json().await?;
        Ok(canonical)
    }

    /// Check response status and convert errors.
    async fn check_response(&self, response: Response) -> Result<Response> {
        match response.status() {
            StatusCode::OK | StatusCode::CREATED | StatusCode::ACCEPTED => Ok(response),
            StatusCode::UNAUTHORIZED => Err(SettingsError::Unauthorized),
            StatusCode::NOT_FOUND => {
                let url = response.url().to_string();
                Err(SettingsError::NotFound(url))
            }
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                Err(SettingsError::Validation {
                    message: response.text().await.unwrap_or_default(),
                })
            }
            status => Err(SettingsError::Other(format!(
                "HTTP {}: {}",
                status,
                response.text().await.unwrap_or_default()
            ))),
        }
    }
}
