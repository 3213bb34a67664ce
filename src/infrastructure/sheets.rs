use crate::domain::payload::SubmissionPayload;
use crate::domain::ports::{SubmissionGateway, SubmissionReceipt};
use crate::error::{RegistryError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// Posts submissions as JSON to the script endpoint that appends them to the
/// spreadsheet.
///
/// Exactly one request per call. Any non-2xx status is a failure; a missing
/// or non-JSON body on success is fine.
#[derive(Debug, Clone)]
pub struct SheetsGateway {
    client: Client,
    endpoint: String,
}

#[derive(Debug, Default, Deserialize)]
struct ServerMessage {
    #[serde(default)]
    message: Option<String>,
}

impl SheetsGateway {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

/// Reads an optional `{"message": ...}` out of a response body.
pub(crate) fn server_message(body: &str) -> Option<String> {
    serde_json::from_str::<ServerMessage>(body)
        .ok()
        .and_then(|m| m.message)
        .filter(|m| !m.trim().is_empty())
}

#[async_trait]
impl SubmissionGateway for SheetsGateway {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<SubmissionReceipt> {
        log::debug!("Submitting to {}", self.endpoint);
        if log::log_enabled!(log::Level::Debug) {
            log::debug!("Payload: {}", serde_json::to_string(payload)?);
        }

        // `.json()` sets `Content-Type: application/json`.
        let response = self.client.post(&self.endpoint).json(payload).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            log::error!("Sheet endpoint answered {status}");
            return Err(RegistryError::Rejected {
                status: status.as_u16(),
                message: server_message(&body),
            });
        }

        log::info!(
            "Submitted {} beneficiaries to the sheet",
            payload.beneficiarios.len()
        );
        Ok(SubmissionReceipt {
            message: server_message(&body),
        })
    }
}
