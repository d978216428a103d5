use reqwest::{Client, StatusCode};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, error};
use url::Url;

use crate::config::Credentials;
use crate::error::{AppError, Result};
use crate::spotify::models::TokenResponse;

/// Tokens closer than this to expiry are refreshed before use.
const EXPIRY_MARGIN: Duration = Duration::from_secs(30);

#[derive(Debug, Default)]
struct TokenState {
    access_token: Option<String>,
    expires_at: Option<Instant>,
}

impl TokenState {
    fn usable(&self, now: Instant) -> Option<&str> {
        match (&self.access_token, self.expires_at) {
            (Some(token), Some(expires_at)) if now + EXPIRY_MARGIN < expires_at => Some(token),
            _ => None,
        }
    }
}

/// Client-credentials token cache shared by every request in the process.
///
/// The state lock is held across the exchange, so concurrent callers that find the
/// token stale queue behind the one refresh in flight and then reuse its result.
pub struct TokenProvider {
    http_client: Client,
    credentials: Option<Credentials>,
    token_url: Url,
    state: Mutex<TokenState>,
}

impl TokenProvider {
    pub fn new(http_client: Client, credentials: Option<Credentials>, token_url: Url) -> Self {
        Self {
            http_client,
            credentials,
            token_url,
            state: Mutex::new(TokenState::default()),
        }
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    pub async fn get_token(&self) -> Result<String> {
        let mut state = self.state.lock().await;

        if let Some(token) = state.usable(Instant::now()) {
            return Ok(token.to_string());
        }

        let credentials = self.credentials.as_ref().ok_or(AppError::CredentialsMissing)?;

        debug!("Fetching new Spotify access token");
        let requested_at = Instant::now();
        let token = self.exchange(credentials).await.inspect_err(|e| {
            error!("Failed to get Spotify token: {}", e);
        })?;

        debug!("Token acquired, expires in {}s", token.expires_in);
        state.access_token = Some(token.access_token.clone());
        // An unrepresentable lifetime is treated as already expired.
        state.expires_at = Some(
            requested_at
                .checked_add(Duration::from_secs(token.expires_in))
                .unwrap_or(requested_at),
        );

        Ok(token.access_token)
    }

    async fn exchange(&self, credentials: &Credentials) -> Result<TokenResponse> {
        let response = self
            .http_client
            .post(self.token_url.clone())
            .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| AppError::upstream(None, format!("Token request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            // Only a client error means the credentials were refused; an unavailable
            // or throttling accounts service is ordinary upstream trouble.
            if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
                return Err(AppError::upstream(
                    Some(status.as_u16()),
                    format!("Token request failed: {}", error_text),
                ));
            }
            return Err(AppError::Auth(format!(
                "Token request rejected ({}): {}",
                status, error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Auth(format!("Failed to parse token response: {}", e)))
    }
}
