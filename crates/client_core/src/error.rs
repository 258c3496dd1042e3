use reqwest::StatusCode;
use shared::error::ServerErrorBody;
use thiserror::Error;

pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Failure of a single blog API call, classified from the transport error
/// or the HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("invalid base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("server unreachable: {0}")]
    NetworkUnreachable(String),
    #[error("blog not found")]
    NotFound,
    #[error("server error ({status}): {message}")]
    ServerMessage { status: u16, message: String },
    #[error("{0}")]
    Generic(String),
}

impl ClientError {
    pub fn from_transport(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::from_response(status, "");
        }
        if err.is_decode() || err.is_body() {
            return Self::Generic(format!("invalid response body: {err}"));
        }
        if err.is_connect() || err.is_timeout() || err.is_request() {
            return Self::NetworkUnreachable(err.to_string());
        }
        Self::Generic(err.to_string())
    }

    /// Classifies a non-2xx response. `body` is the raw response text.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        if status == StatusCode::NOT_FOUND {
            return Self::NotFound;
        }

        if let Some(message) = serde_json::from_str::<ServerErrorBody>(body)
            .ok()
            .as_ref()
            .and_then(ServerErrorBody::message)
        {
            return Self::ServerMessage {
                status: status.as_u16(),
                message: message.to_string(),
            };
        }

        let body = body.trim();
        if body.is_empty() {
            Self::Generic(format!("HTTP {status}"))
        } else {
            Self::Generic(format!("HTTP {status}: {body}"))
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound => Some(StatusCode::NOT_FOUND.as_u16()),
            Self::ServerMessage { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_network_unreachable(&self) -> bool {
        matches!(self, Self::NetworkUnreachable(_))
    }

    /// Message shown to the user; `context` prefixes the generic fallback.
    pub fn describe(&self, context: &str) -> String {
        match self {
            Self::NetworkUnreachable(_) => {
                "Cannot connect to the server; check that the backend is running".to_string()
            }
            Self::NotFound => "Blog not found".to_string(),
            Self::ServerMessage { message, .. } => message.clone(),
            Self::Generic(text) => format!("{context}: {text}"),
            Self::InvalidBaseUrl { .. } => self.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "tests/error_tests.rs"]
mod tests;
