use reqwest::StatusCode;
use thiserror::Error;

/// API-specific errors
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not authorized: {0}")]
    Unauthorized(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl ApiError {
    /// Classify a non-2xx response. An empty body falls back to the
    /// canonical reason phrase.
    pub fn from_status(status: StatusCode, message: String) -> Self {
        let msg = if message.trim().is_empty() {
            status
                .canonical_reason()
                .map(|reason| format!("{} {}", status.as_u16(), reason))
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
        } else {
            message
        };

        match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized(msg),
            StatusCode::FORBIDDEN => ApiError::Unauthorized(msg),
            StatusCode::NOT_FOUND => ApiError::NotFound(msg),
            StatusCode::BAD_REQUEST => ApiError::BadRequest(msg),
            status if status.is_server_error() => ApiError::ServerError(msg),
            status if status.is_client_error() => ApiError::BadRequest(msg),
            _ => ApiError::Unknown(msg),
        }
    }

    /// True when the request never produced an HTTP response
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::NetworkError(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::InvalidResponse(err.to_string())
        } else {
            ApiError::NetworkError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::InvalidResponse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_classification() {
        let error = ApiError::from_status(StatusCode::UNAUTHORIZED, "nope".to_string());
        assert!(matches!(error, ApiError::Unauthorized(_)));

        let error = ApiError::from_status(StatusCode::NOT_FOUND, "missing".to_string());
        assert!(matches!(error, ApiError::NotFound(_)));

        let error = ApiError::from_status(StatusCode::UNPROCESSABLE_ENTITY, "bad".to_string());
        assert!(matches!(error, ApiError::BadRequest(_)));

        let error = ApiError::from_status(StatusCode::BAD_GATEWAY, "down".to_string());
        assert!(matches!(error, ApiError::ServerError(_)));
    }

    #[test]
    fn test_empty_body_uses_reason_phrase() {
        let error = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, String::new());
        assert_eq!(error.to_string(), "Server error: 500 Internal Server Error");
    }

    #[test]
    fn test_body_is_kept_verbatim() {
        let body = r#"{"email":["user with this email already exists."]}"#;
        let error = ApiError::from_status(StatusCode::BAD_REQUEST, body.to_string());
        assert!(error.to_string().contains(body));
        assert!(!error.is_transport());
    }
}
