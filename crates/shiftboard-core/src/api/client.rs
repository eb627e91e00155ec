//! API client for communicating with the shift scheduling backend.
//!
//! This module provides the `ApiClient` struct for the five calls the
//! dashboard makes: fetching shifts, uploading a spreadsheet and three
//! flavours of log queries. Requests are issued exactly once; there is no
//! retry and no timeout unless one is configured.

use std::path::Path;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, Url};
use tracing::{debug, warn};

use super::{ApiError, Payload};
use crate::config::Config;

// ============================================================================
// Constants
// ============================================================================

/// Base URL used when nothing is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

/// Multipart field name the backend reads the spreadsheet from
const UPLOAD_FIELD: &str = "file";

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
const XLS_MIME: &str = "application/vnd.ms-excel";
const CSV_MIME: &str = "text/csv";
const FALLBACK_MIME: &str = "application/octet-stream";

/// Optional filters for `GET /logs`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogQuery {
    /// Day to filter on, `YYYY-MM-DD`
    pub date: Option<String>,
    /// Maximum number of entries
    pub limit: Option<u32>,
}

impl LogQuery {
    /// Query parameters to send. Empty dates and zero limits are omitted.
    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(date) = self.date.as_deref().filter(|d| !d.is_empty()) {
            params.push(("date", date.to_string()));
        }
        if let Some(limit) = self.limit.filter(|l| *l > 0) {
            params.push(("limit", limit.to_string()));
        }
        params
    }
}

/// API client for the scheduling backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client against `base_url` with no request timeout
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, None)
    }

    /// Create a new API client, optionally bounding every request
    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let base_url = Self::normalize_base_url(base_url)?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Self::with_timeout(&config.base_url, config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Validate the base URL and strip any trailing slash so endpoint
    /// paths can be appended verbatim.
    fn normalize_base_url(base_url: &str) -> Result<String, ApiError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let url = Url::parse(trimmed)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl(format!(
                "{}: scheme must be http or https",
                base_url
            )));
        }
        Ok(trimmed.to_string())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Build the `/logs` URL with whichever filters are set
    pub fn logs_url(&self, query: &LogQuery) -> Result<Url, ApiError> {
        let endpoint = self.endpoint("/logs");
        let mut url =
            Url::parse(&endpoint).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", endpoint, e)))?;

        let params = query.params();
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &params {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Read the whole body as text and normalise it into a `Payload`
    async fn read_any(response: Response) -> Result<Payload, ApiError> {
        let text = response.text().await?;
        Ok(Payload::parse(text))
    }

    /// GET `url` and normalise the answer. Non-2xx maps to the fixed
    /// "could not fetch `path`" message.
    async fn get_payload(&self, url: Url, path: &str) -> Result<Payload, ApiError> {
        debug!(%url, "GET");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let payload = Self::read_any(response).await?;

        if !status.is_success() {
            warn!(path, status = %status, "Request failed");
            return Err(ApiError::fetch_failed(status, path));
        }
        Ok(payload)
    }

    fn parse_endpoint(&self, path: &str) -> Result<Url, ApiError> {
        let endpoint = self.endpoint(path);
        Url::parse(&endpoint).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", endpoint, e)))
    }

    /// `GET /shifts`
    pub async fn fetch_shifts(&self) -> Result<Payload, ApiError> {
        let url = self.parse_endpoint("/shifts")?;
        self.get_payload(url, "/shifts").await
    }

    /// `GET /logs/latest`
    pub async fn fetch_logs_latest(&self) -> Result<Payload, ApiError> {
        let url = self.parse_endpoint("/logs/latest")?;
        self.get_payload(url, "/logs/latest").await
    }

    /// `GET /logs/errors`
    pub async fn fetch_logs_errors(&self) -> Result<Payload, ApiError> {
        let url = self.parse_endpoint("/logs/errors")?;
        self.get_payload(url, "/logs/errors").await
    }

    /// `GET /logs?date=&limit=`
    pub async fn fetch_logs(&self, query: &LogQuery) -> Result<Payload, ApiError> {
        let url = self.logs_url(query)?;
        self.get_payload(url, "/logs").await
    }

    /// Read the spreadsheet at `path` and `POST /upload` it
    pub async fn upload_excel(&self, path: &Path) -> Result<Payload, ApiError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| ApiError::File {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.xlsx".to_string());

        self.upload_bytes(&file_name, bytes).await
    }

    /// `POST /upload` with a single multipart part named `file`
    pub async fn upload_bytes(&self, file_name: &str, bytes: Vec<u8>) -> Result<Payload, ApiError> {
        let url = self.parse_endpoint("/upload")?;
        let size = bytes.len();

        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime_for(file_name))?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        debug!(%url, file_name, size, "POST upload");
        let response = self.client.post(url).multipart(form).send().await?;
        let status = response.status();
        let payload = Self::read_any(response).await?;

        if !status.is_success() {
            warn!(status = %status, file_name, "Upload rejected");
            return Err(ApiError::upload_failed(status, payload.as_str()));
        }
        Ok(payload)
    }
}

/// MIME type for a spreadsheet file name, by extension
fn mime_for(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase());
    match extension.as_deref() {
        Some("xlsx") => XLSX_MIME,
        Some("xls") => XLS_MIME,
        Some("csv") => CSV_MIME,
        _ => FALLBACK_MIME,
    }
}
