//! # Bill Loader
//!
//! Opens a bill view: fetch the receipt, then start a [`BillSession`] with
//! the configured default roster.
//!
//! ## Stale Responses
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  open("r-1")  gen=1 ──── fetch ─────────────────────────► response     │
//! │                                                            gen is 2 now │
//! │  open("r-2")  gen=2 ──── fetch ──────► response           → discarded   │
//! │                                        gen still 2                      │
//! │                                        → BillSession(r-2)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Fetches are never cancelled. Each `open` or `abandon` bumps a generation
//! counter and a response whose generation is no longer current is dropped,
//! success or failure alike.

use std::sync::atomic::{AtomicU64, Ordering};

use fairshare_core::{BillSession, Roster};
use tracing::{debug, info};

use crate::client::ReceiptService;
use crate::config::ClientConfig;
use crate::error::ClientResult;

pub struct ReceiptLoader<S> {
    service: S,
    default_participants: Vec<String>,
    generation: AtomicU64,
}

impl<S: ReceiptService> ReceiptLoader<S> {
    /// Creates a loader using the configured default participants.
    pub fn new(service: S, config: &ClientConfig) -> Self {
        Self::with_participants(service, config.roster.default_participants.clone())
    }

    pub fn with_participants(service: S, default_participants: Vec<String>) -> Self {
        ReceiptLoader {
            service,
            default_participants,
            generation: AtomicU64::new(0),
        }
    }

    /// Uploads a document. Errors are returned as-is; nothing is retried.
    pub async fn upload(&self, file_name: &str, document: Vec<u8>) -> ClientResult<String> {
        self.service.upload(file_name, document).await
    }

    /// Fetches receipt `id` and starts a session for it.
    ///
    /// Returns `Ok(None)` when another `open` or an `abandon` happened while
    /// the fetch was in flight; the late response is ignored.
    pub async fn open(&self, id: &str) -> ClientResult<Option<BillSession>> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(receipt_id = %id, generation, "Opening bill");

        let result = self.service.fetch(id).await;

        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(receipt_id = %id, generation, "Discarding stale receipt response");
            return Ok(None);
        }

        let receipt = result?;
        info!(
            receipt_id = %receipt.id,
            items = receipt.items.len(),
            participants = self.default_participants.len(),
            "Bill opened"
        );

        let roster = Roster::with_names(&self.default_participants);
        Ok(Some(BillSession::with_roster(receipt, roster)))
    }

    /// Marks any in-flight `open` as abandoned (the user navigated away).
    pub fn abandon(&self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(generation, "Bill view abandoned");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::HttpReceiptClient;
    use crate::error::ClientError;
    use fairshare_core::Money;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn receipt_json(id: &str) -> serde_json::Value {
        json!({
            "id": id,
            "items": [
                { "description": "Pizza", "quantity": 1, "unitPrice": 20.0, "totalPrice": 20.0 },
                { "description": "Soda", "quantity": 1, "unitPrice": 4.0, "totalPrice": 4.0 }
            ]
        })
    }

    async fn loader_for(server: &MockServer, names: &[&str]) -> ReceiptLoader<HttpReceiptClient> {
        let mut config = ClientConfig::default();
        config.api.base_url = server.uri();
        config.roster.default_participants = names.iter().map(|n| n.to_string()).collect();
        ReceiptLoader::new(HttpReceiptClient::new(&config).unwrap(), &config)
    }

    #[tokio::test]
    async fn open_starts_session_with_default_roster() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/receipts/r-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(receipt_json("r-1")))
            .mount(&server)
            .await;

        let loader = loader_for(&server, &["A", "B"]).await;
        let mut session = loader.open("r-1").await.unwrap().unwrap();

        assert_eq!(session.roster().names(), vec!["A", "B"]);
        assert!(session.matrix().is_empty());

        session.toggle(0, 0).unwrap();
        session.toggle(0, 1).unwrap();
        session.toggle(1, 0).unwrap();
        let allocation = session.allocation();
        assert_eq!(allocation.shares[0].total, Money::from_cents(1400));
        assert_eq!(allocation.shares[1].total, Money::from_cents(1000));
    }

    #[tokio::test]
    async fn open_missing_receipt_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let loader = loader_for(&server, &[]).await;
        let err = loader.open("nope").await.unwrap_err();

        assert!(matches!(err, ClientError::NotFound { .. }));
    }

    #[tokio::test]
    async fn superseded_open_is_discarded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/receipts/slow"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(receipt_json("slow"))
                    .set_delay(Duration::from_millis(300)),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/receipts/fast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(receipt_json("fast")))
            .mount(&server)
            .await;

        let loader = loader_for(&server, &["A"]).await;
        let (slow, fast) = tokio::join!(loader.open("slow"), async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            loader.open("fast").await
        });

        assert!(slow.unwrap().is_none());
        assert_eq!(fast.unwrap().unwrap().receipt().id, "fast");
    }

    #[tokio::test]
    async fn abandoned_open_is_discarded_even_on_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_delay(Duration::from_millis(300)))
            .mount(&server)
            .await;

        let loader = loader_for(&server, &["A"]).await;
        let (result, _) = tokio::join!(loader.open("gone"), async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            loader.abandon();
        });

        assert!(result.unwrap().is_none());
    }
}
