use reqwest::StatusCode;
use thiserror::Error;

/// Errors surfaced by the API layer to the screens that issued a request.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Authentication expired")]
    AuthenticationExpired,
    #[error("Permission denied")]
    PermissionDenied { message: Option<String> },
    #[error("Not found")]
    NotFound { message: Option<String> },
    #[error("Server error ({status})")]
    Server { status: u16, message: Option<String> },
    #[error("Request rejected ({status}): {body}")]
    Rejected { status: u16, body: String },
    #[error("Network failure: {0}")]
    Network(String),
    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classifies a non-2xx response. `body` is kept verbatim for
    /// statuses without a dedicated variant.
    pub fn from_status(status: StatusCode, body: &[u8]) -> Self {
        let message = backend_message(body);
        match status {
            StatusCode::UNAUTHORIZED => ApiError::AuthenticationExpired,
            StatusCode::FORBIDDEN => ApiError::PermissionDenied { message },
            StatusCode::NOT_FOUND => ApiError::NotFound { message },
            s if s.is_server_error() => ApiError::Server {
                status: s.as_u16(),
                message,
            },
            s => ApiError::Rejected {
                status: s.as_u16(),
                body: String::from_utf8_lossy(body).into_owned(),
            },
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::AuthenticationExpired => Some(401),
            ApiError::PermissionDenied { .. } => Some(403),
            ApiError::NotFound { .. } => Some(404),
            ApiError::Server { status, .. } | ApiError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The `message` field of the backend's error body, if it sent one.
    pub fn backend_message(&self) -> Option<String> {
        match self {
            ApiError::PermissionDenied { message }
            | ApiError::NotFound { message }
            | ApiError::Server { message, .. } => message.clone(),
            ApiError::Rejected { body, .. } => backend_message(body.as_bytes()),
            ApiError::Validation(message) => Some(message.clone()),
            _ => None,
        }
    }

    /// Text to show the user: the backend message when present, `fallback` otherwise.
    pub fn user_message(&self, fallback: &str) -> String {
        self.backend_message().unwrap_or_else(|| fallback.to_string())
    }
}

fn backend_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()?
        .get("message")?
        .as_str()
        .filter(|message| !message.is_empty())
        .map(String::from)
}

/// Failures while obtaining or reading credentials.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuthError {
    #[error("No refresh token held")]
    NoRefreshToken,
    #[error("Token refresh rejected ({status})")]
    RefreshRejected { status: u16 },
    #[error("Identity provider unreachable: {0}")]
    ProviderUnreachable(String),
    #[error("Malformed token: {0}")]
    MalformedToken(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}
