//! REST API client module for the shift scheduling backend.
//!
//! This module provides the `ApiClient` for uploading spreadsheets and
//! fetching shifts and log output. Every response body is normalised into
//! a `Payload`: JSON when it parses, raw text otherwise.

pub mod client;
pub mod error;
pub mod payload;

pub use client::{ApiClient, LogQuery};
pub use error::ApiError;
pub use payload::Payload;
pub use reqwest::StatusCode;
