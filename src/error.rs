use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Spotify credentials not configured")]
    CredentialsMissing,

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Spotify API error ({}): {message}", status_label(.status))]
    Upstream { status: Option<u16>, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Errors no fallback can work around: without a token nothing upstream can be reached.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AppError::CredentialsMissing | AppError::Auth(_))
    }

    pub fn upstream(status: Option<u16>, message: impl Into<String>) -> Self {
        AppError::Upstream {
            status,
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::upstream(e.status().map(|s| s.as_u16()), e.to_string())
    }
}

fn status_label(status: &Option<u16>) -> String {
    match status {
        Some(code) => code.to_string(),
        None => "transport".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_errors() {
        assert!(AppError::CredentialsMissing.is_fatal());
        assert!(AppError::Auth("invalid_client".into()).is_fatal());
        assert!(!AppError::upstream(Some(429), "rate limited").is_fatal());
        assert!(!AppError::Config("bad port".into()).is_fatal());
    }

    #[test]
    fn test_upstream_display() {
        let with_status = AppError::upstream(Some(404), "not found");
        assert_eq!(with_status.to_string(), "Spotify API error (404): not found");

        let transport = AppError::upstream(None, "timed out");
        assert_eq!(transport.to_string(), "Spotify API error (transport): timed out");
    }
}
