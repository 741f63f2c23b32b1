use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::SubmitConfig;

pub mod response;
pub mod transport;

use response::{Evaluation, classify};
use transport::{HttpTransport, SubmissionRequest, Transport, TransportError};

/// Failures that leave no server verdict to classify.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("submission file not found: {}", .0.display())]
    FileMissing(PathBuf),
    #[error("cannot connect to {url}")]
    NetworkUnreachable { url: String },
    #[error("request timed out after {}s", .timeout.as_secs())]
    Timeout { timeout: Duration },
    #[error("{0}")]
    Unexpected(String),
}

pub struct SubmissionClient<'a, T> {
    config: &'a SubmitConfig,
    transport: T,
}

impl<'a> SubmissionClient<'a, HttpTransport> {
    pub fn connect(config: &'a SubmitConfig) -> Result<Self, SubmitError> {
        let transport = HttpTransport::new(config.timeout)
            .map_err(|e| SubmitError::Unexpected(format!("failed to build HTTP client: {e}")))?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<'a, T: Transport> SubmissionClient<'a, T> {
    pub fn with_transport(config: &'a SubmitConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// One attempt: preflight, a single POST, classification. Never retries.
    pub fn submit(&self) -> Result<Evaluation, SubmitError> {
        let path = &self.config.submission_file;
        if !path.exists() {
            return Err(SubmitError::FileMissing(path.clone()));
        }

        let contents = fs::read(path).map_err(|e| {
            SubmitError::Unexpected(format!("failed to read {}: {e}", path.display()))
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        tracing::info!(
            "sending {} ({} bytes) to {}",
            path.display(),
            contents.len(),
            self.config.api_url
        );
        let raw = self
            .transport
            .post(SubmissionRequest {
                endpoint: &self.config.api_url,
                user_id: &self.config.user_id,
                file_name,
                contents,
            })
            .map_err(|e| match e {
                TransportError::Connect(reason) => {
                    tracing::debug!("connect failure: {reason}");
                    SubmitError::NetworkUnreachable {
                        url: self.config.api_url.clone(),
                    }
                }
                TransportError::Timeout => SubmitError::Timeout {
                    timeout: self.config.timeout,
                },
                TransportError::Other(msg) => SubmitError::Unexpected(msg),
            })?;

        let evaluation = classify(&raw);
        tracing::debug!("status {} classified as {}", raw.status, evaluation.kind());
        Ok(evaluation)
    }
}

pub fn submit(config: &SubmitConfig) -> Result<Evaluation, SubmitError> {
    SubmissionClient::connect(config)?.submit()
}

#[cfg(test)]
#[path = "../../tests/src_inline/submit/tests.rs"]
mod tests;
