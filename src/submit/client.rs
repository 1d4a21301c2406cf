//! Ingestion client — posts the encoded lead to the provider endpoint.

use async_trait::async_trait;
use tracing::{debug, info};

use super::entries::EntryPayload;
use crate::error::SubmissionError;

/// Capability: deliver one encoded submission.
///
/// `Ok` means the request went out and came back; the provider's response
/// body is opaque and never inspected.
#[async_trait]
pub trait FormIngest: Send + Sync {
    async fn submit(&self, payload: &EntryPayload) -> Result<(), SubmissionError>;
}

/// Google Forms `formResponse` client. One request per call, no retry.
pub struct GoogleFormsClient {
    endpoint: String,
    client: reqwest::Client,
}

impl GoogleFormsClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl FormIngest for GoogleFormsClient {
    async fn submit(&self, payload: &EntryPayload) -> Result<(), SubmissionError> {
        debug!(endpoint = %self.endpoint, entries = payload.len(), "Posting form submission");

        let resp = self
            .client
            .post(&self.endpoint)
            .multipart(payload.to_multipart())
            .send()
            .await
            .map_err(|e| SubmissionError::Transport {
                endpoint: self.endpoint.clone(),
                reason: e.to_string(),
            })?;

        // Cross-origin form posts are fire-and-forget; the status is only logged.
        info!(status = %resp.status(), "Form submission delivered");
        Ok(())
    }
}
