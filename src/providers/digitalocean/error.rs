use reqwest::StatusCode;
use thiserror::Error;

use crate::providers::digitalocean::types::ErrorResponse;

#[derive(Error, Debug)]
pub enum DigitalOceanError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}, {id}): {message}")]
    Api {
        status: StatusCode,
        id: String,
        message: String,
        request_id: Option<String>,
    },

    #[error("Decode error: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Pagination error: {0}")]
    Pagination(String),
}

impl DigitalOceanError {
    /// Builds the provider-side error for a non-success response. Bodies that
    /// are not the documented error envelope are kept verbatim.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        match serde_json::from_str::<ErrorResponse>(body) {
            Ok(err) => DigitalOceanError::Api {
                status,
                id: err.id,
                message: err.message,
                request_id: err.request_id,
            },
            Err(_) => DigitalOceanError::Api {
                status,
                id: "unknown".to_string(),
                message: body.to_string(),
                request_id: None,
            },
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            DigitalOceanError::Http(err) => err.status(),
            DigitalOceanError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(StatusCode::TOO_MANY_REQUESTS)
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_from_response_error_envelope() {
        let body = r#"{"id":"unauthorized","message":"Unable to authenticate you","request_id":"4d9d8375"}"#;
        let err = DigitalOceanError::from_response(StatusCode::UNAUTHORIZED, body);
        assert_matches!(
            &err,
            DigitalOceanError::Api { id, message, request_id: Some(req), .. }
                if id == "unauthorized" && message == "Unable to authenticate you" && req == "4d9d8375"
        );
        assert!(err.is_unauthorized());
        assert!(!err.is_rate_limited());
    }

    #[test]
    fn test_from_response_unparseable_body() {
        let err = DigitalOceanError::from_response(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>");
        assert_matches!(
            &err,
            DigitalOceanError::Api { id, message, request_id: None, .. }
                if id == "unknown" && message == "<html>bad gateway</html>"
        );
        assert_eq!(err.status(), Some(StatusCode::BAD_GATEWAY));
    }

    #[test]
    fn test_status_helpers() {
        let err = DigitalOceanError::from_response(StatusCode::TOO_MANY_REQUESTS, "");
        assert!(err.is_rate_limited());
        let err = DigitalOceanError::from_response(StatusCode::NOT_FOUND, "");
        assert!(err.is_not_found());
        let err = DigitalOceanError::Pagination("no page".into());
        assert_eq!(err.status(), None);
    }
}
