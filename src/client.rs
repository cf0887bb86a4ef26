use log::debug;
use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use std::time::Duration;

use crate::error::FetchError;
use crate::normalize::{Lead, Payload, detect_payload, normalize};
use crate::store::LeadInput;

/// Default request timeout. The upstream sheet endpoint can be slow to wake,
/// so this is generous.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// HTTP client for the lead endpoint. Fetched lists run through the
/// normalizer; transport failures are classified into [`FetchError`] kinds.
pub struct LeadClient {
    endpoint: String,
    client: Client,
}

impl LeadClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, FetchError> {
        Self::with_timeout(endpoint, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(classify_transport)?;

        Ok(LeadClient {
            endpoint: endpoint.into(),
            client,
        })
    }

    /// Fetches and normalizes the full lead list, newest first.
    pub async fn fetch_leads(&self) -> Result<Vec<Lead>, FetchError> {
        let response = self
            .client
            .get(&self.endpoint)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status();
        let body = response.text().await.map_err(classify_transport)?;
        debug!("list response: status {status}, {} bytes", body.len());

        if !status.is_success() {
            // the body may still identify the failure more precisely: an
            // error page or a reported failure beats the bare status code
            return Err(match detect_payload(&body) {
                Payload::Document => FetchError::UpstreamConfiguration,
                Payload::Failure(message) => FetchError::UpstreamLogic(message),
                Payload::Records(_) => FetchError::HttpStatus(status.as_u16()),
            });
        }

        normalize(detect_payload(&body))
    }

    /// Submits one lead. The endpoint may report failure in a 200 body, so
    /// the body is checked before the status.
    pub async fn submit_lead(&self, lead: &LeadInput) -> Result<(), FetchError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(lead)
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status();
        let body = response.text().await.map_err(classify_transport)?;
        debug!("submit response: status {status}, {} bytes", body.len());

        if let Payload::Failure(message) = detect_payload(&body) {
            return Err(FetchError::UpstreamLogic(message));
        }
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        Ok(())
    }
}

/// Timeouts, connection problems and status failures must stay
/// distinguishable for the presentation layer.
fn classify_transport(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else if let Some(status) = err.status() {
        FetchError::HttpStatus(status.as_u16())
    } else {
        FetchError::Network(err.to_string())
    }
}
