//! Blocking HTTP client for a JSON extraction endpoint.
//!
//! Posts `{text, context}` and decodes the response body with the
//! tolerant record decoder. The endpoint owns the model and prompting;
//! this client only speaks the contract.

use tracing::debug;

use stemma_core::Candidate;

use crate::extractor::{ExtractError, ExtractionContext, Extractor};
use crate::record::decode_candidates;

/// Extractor backed by an HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpExtractor {
    endpoint: String,
    agent: ureq::Agent,
}

impl HttpExtractor {
    /// Client for the given endpoint URL, with a generous timeout —
    /// extraction is the one operation allowed to be slow.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(std::time::Duration::from_secs(60))
            .build();
        Self {
            endpoint: endpoint.into(),
            agent,
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Extractor for HttpExtractor {
    fn extract(
        &self,
        text: &str,
        context: &ExtractionContext,
    ) -> Result<Vec<Candidate>, ExtractError> {
        let body = serde_json::json!({
            "text": text,
            "context": context,
        });

        let response = self
            .agent
            .post(&self.endpoint)
            .set("Accept", "application/json")
            .set("User-Agent", "stemma-cli")
            .send_json(body)
            .map_err(|err| match err {
                ureq::Error::Status(status, _) => ExtractError::Status { status },
                ureq::Error::Transport(transport) => {
                    ExtractError::Request(transport.to_string())
                }
            })?;

        let payload = response
            .into_string()
            .map_err(|err| ExtractError::Response(err.to_string()))?;

        let candidates = decode_candidates(&payload);
        debug!(
            endpoint = %self.endpoint,
            candidates = candidates.len(),
            "extraction response decoded"
        );
        Ok(candidates)
    }
}
