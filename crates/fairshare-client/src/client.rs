//! # Receipt Service Client
//!
//! HTTP side of the receipt service contract.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST {base}/api/receipts/upload     multipart, field "bill"            │
//! │       200 ──► { "id": "...", ... }   ──► Ok(id)                         │
//! │       non-2xx / no connection        ──► ClientError::Upload            │
//! │                                                                         │
//! │  GET  {base}/api/receipts/{id}                                          │
//! │       200 ──► Receipt JSON           ──► Ok(Receipt)                    │
//! │       non-2xx                        ──► ClientError::NotFound          │
//! │       no connection / bad JSON       ──► ClientError::Transport         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Requests are sent once. Retrying is the user's decision.

use async_trait::async_trait;
use fairshare_core::validation::validate_receipt_id;
use fairshare_core::Receipt;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Multipart field name the upload endpoint reads the document from.
pub const UPLOAD_FIELD: &str = "bill";

/// The receipt ingestion/retrieval collaborator.
#[async_trait]
pub trait ReceiptService: Send + Sync {
    /// Uploads a receipt document and returns the id of the parsed receipt.
    async fn upload(&self, file_name: &str, document: Vec<u8>) -> ClientResult<String>;

    /// Fetches a parsed receipt by id.
    async fn fetch(&self, id: &str) -> ClientResult<Receipt>;
}

/// Only the id is needed from the upload response; the service also echoes
/// the parsed receipt.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    id: String,
}

/// [`ReceiptService`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpReceiptClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpReceiptClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ClientError::InvalidConfig(format!("HTTP client: {}", e)))?;

        Ok(HttpReceiptClient {
            http,
            base_url: config.base_url().to_string(),
        })
    }

    fn receipts_url(&self, suffix: &str) -> String {
        format!("{}/api/receipts/{}", self.base_url, suffix)
    }
}

#[async_trait]
impl ReceiptService for HttpReceiptClient {
    async fn upload(&self, file_name: &str, document: Vec<u8>) -> ClientResult<String> {
        let size = document.len();
        let part = Part::bytes(document).file_name(file_name.to_string());
        let form = Form::new().part(UPLOAD_FIELD, part);

        let response = self
            .http
            .post(self.receipts_url("upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ClientError::Upload(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, file_name, body = %body, "Receipt upload rejected");
            return Err(ClientError::Upload(format!(
                "receipt service returned {}",
                status
            )));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Upload(format!("unreadable response: {}", e)))?;

        if body.id.trim().is_empty() {
            return Err(ClientError::Upload("response carried no receipt id".into()));
        }

        info!(receipt_id = %body.id, file_name, bytes = size, "Receipt uploaded");
        Ok(body.id)
    }

    async fn fetch(&self, id: &str) -> ClientResult<Receipt> {
        // An id that cannot be a receipt id cannot resolve either.
        let id = validate_receipt_id(id).map_err(|e| {
            debug!(receipt_id = %id, error = %e, "Rejected receipt id");
            ClientError::NotFound { id: id.to_string() }
        })?;

        let response = self
            .http
            .get(self.receipts_url(&id))
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            debug!(receipt_id = %id, %status, "Receipt lookup failed");
            return Err(ClientError::NotFound { id });
        }

        let receipt: Receipt = response
            .json()
            .await
            .map_err(|e| ClientError::Transport(format!("invalid receipt body: {}", e)))?;

        debug!(receipt_id = %id, items = receipt.items.len(), "Receipt fetched");
        Ok(receipt)
    }
}
