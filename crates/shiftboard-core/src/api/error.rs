use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Fixed message for a failed upload whose body carried no usable text.
pub const UPLOAD_FAILED_MESSAGE: &str = "Upload misslyckades";

#[derive(Error, Debug)]
pub enum ApiError {
    /// Non-2xx response. The message is what the dashboard shows.
    #[error("{message}")]
    Status { status: StatusCode, message: String },

    #[error("Nätverksfel: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Ogiltig adress: {0}")]
    InvalidUrl(String),

    #[error("Kunde inte läsa {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body on a char boundary to keep messages short
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
    }

    /// Error for a failed GET against `path`, e.g. `Kunde inte hämta /shifts`.
    pub fn fetch_failed(status: StatusCode, path: &str) -> Self {
        ApiError::Status {
            status,
            message: format!("Kunde inte hämta {}", path),
        }
    }

    /// Error for a failed upload. A string body (plain text or a JSON
    /// string) is surfaced as-is, anything else falls back to the fixed
    /// message.
    pub fn upload_failed(status: StatusCode, text_body: Option<&str>) -> Self {
        let message = match text_body.map(str::trim) {
            Some(body) if !body.is_empty() => Self::truncate_body(body),
            _ => UPLOAD_FAILED_MESSAGE.to_string(),
        };
        ApiError::Status { status, message }
    }

    /// HTTP status of the failed response, if the server answered at all
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Network(e) => e.status(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_failed_message() {
        let err = ApiError::fetch_failed(StatusCode::INTERNAL_SERVER_ERROR, "/shifts");
        assert_eq!(err.to_string(), "Kunde inte hämta /shifts");
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[test]
    fn test_upload_failed_uses_text_body() {
        let err = ApiError::upload_failed(StatusCode::BAD_REQUEST, Some("Fel kolumner i filen"));
        assert_eq!(err.to_string(), "Fel kolumner i filen");
    }

    #[test]
    fn test_upload_failed_falls_back_without_text() {
        assert_eq!(
            ApiError::upload_failed(StatusCode::BAD_REQUEST, None).to_string(),
            UPLOAD_FAILED_MESSAGE
        );
        assert_eq!(
            ApiError::upload_failed(StatusCode::BAD_REQUEST, Some("   ")).to_string(),
            UPLOAD_FAILED_MESSAGE
        );
    }

    #[test]
    fn test_truncate_body_respects_char_boundaries() {
        let body = "ö".repeat(400); // 800 bytes
        let truncated = ApiError::truncate_body(&body);
        assert!(truncated.starts_with(&"ö".repeat(250)));
        assert!(truncated.ends_with("(truncated, 800 total bytes)"));
    }
}
