use url::Url;

use crate::error::{AppError, Result};

const DEFAULT_API_BASE: &str = "https://api.spotify.com/v1";
const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Client-credentials pair for the Spotify accounts service.
#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub spotify_client_id: String,
    pub spotify_client_secret: String,
    pub market: String,
    pub api_base: Url,
    pub token_url: Url,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        // Missing credentials are reported per request, not at startup.
        let spotify_client_id = std::env::var("SPOTIFY_CLIENT_ID").unwrap_or_default();
        let spotify_client_secret = std::env::var("SPOTIFY_CLIENT_SECRET").unwrap_or_default();

        let market = std::env::var("SPOTIFY_MARKET").unwrap_or_else(|_| "US".to_string());

        let api_base = parse_url(
            "SPOTIFY_API_BASE",
            &std::env::var("SPOTIFY_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
        )?;
        let token_url = parse_url(
            "SPOTIFY_TOKEN_URL",
            &std::env::var("SPOTIFY_TOKEN_URL").unwrap_or_else(|_| DEFAULT_TOKEN_URL.to_string()),
        )?;

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| AppError::Config(format!("PORT is not a valid port: {}", raw)))?,
            Err(_) => 5000,
        };

        Ok(Self {
            spotify_client_id,
            spotify_client_secret,
            market,
            api_base,
            token_url,
            host,
            port,
        })
    }

    /// Configuration pointing at the public Spotify endpoints with the given credentials.
    pub fn with_credentials(client_id: &str, client_secret: &str) -> Self {
        Self {
            spotify_client_id: client_id.to_string(),
            spotify_client_secret: client_secret.to_string(),
            market: "US".to_string(),
            api_base: Url::parse(DEFAULT_API_BASE).expect("default API base is a valid URL"),
            token_url: Url::parse(DEFAULT_TOKEN_URL).expect("default token URL is a valid URL"),
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }

    pub fn get_missing_config(&self) -> Vec<String> {
        let mut missing = Vec::new();

        if self.spotify_client_id.is_empty() {
            missing.push("SPOTIFY_CLIENT_ID".to_string());
        }
        if self.spotify_client_secret.is_empty() {
            missing.push("SPOTIFY_CLIENT_SECRET".to_string());
        }

        missing
    }

    pub fn validate_spotify_config(&self) -> bool {
        !self.spotify_client_id.is_empty() && !self.spotify_client_secret.is_empty()
    }

    pub fn credentials(&self) -> Option<Credentials> {
        self.validate_spotify_config().then(|| Credentials {
            client_id: self.spotify_client_id.clone(),
            client_secret: self.spotify_client_secret.clone(),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_url(name: &str, raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| AppError::Config(format!("{} is not a valid URL: {}", name, e)))
}
