use std::time::Duration;

use reqwest::blocking::{Client, multipart};

pub const FILE_FIELD: &str = "file";
pub const USER_ID_FIELD: &str = "user_id";
pub const FILE_CONTENT_TYPE: &str = "text/csv";

#[derive(Debug, Clone)]
pub struct SubmissionRequest<'a> {
    pub endpoint: &'a str,
    pub user_id: &'a str,
    pub file_name: String,
    pub contents: Vec<u8>,
}

/// Status and body text of whatever the server answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("request timed out")]
    Timeout,
    #[error("{0}")]
    Other(String),
}

pub trait Transport {
    fn post(&self, request: SubmissionRequest<'_>) -> Result<RawResponse, TransportError>;
}

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn post(&self, request: SubmissionRequest<'_>) -> Result<RawResponse, TransportError> {
        let part = multipart::Part::bytes(request.contents)
            .file_name(request.file_name)
            .mime_str(FILE_CONTENT_TYPE)
            .map_err(map_reqwest_error)?;
        let form = multipart::Form::new()
            .part(FILE_FIELD, part)
            .text(USER_ID_FIELD, request.user_id.to_string());

        let response = self
            .client
            .post(request.endpoint)
            .multipart(form)
            .send()
            .map_err(map_reqwest_error)?;
        let status = response.status().as_u16();
        let body = response.text().map_err(map_reqwest_error)?;
        Ok(RawResponse { status, body })
    }
}

// A connect timeout reports both flags; it counts as a connection failure.
fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_connect() {
        TransportError::Connect(err.to_string())
    } else if err.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Other(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/submit/transport.rs"]
mod tests;
