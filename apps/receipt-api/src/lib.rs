//! # FairShare Receipt API
//!
//! HTTP service that turns uploaded receipt documents into [`Receipt`]s the
//! bill view can fetch.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  POST /api/receipts/upload ──► parser::parse_document ──► ReceiptStore │
//! │        (multipart "bill")            │                        │         │
//! │                                      ▼                        ▼         │
//! │                                 400 on failure        200 + Receipt     │
//! │                                                                         │
//! │  GET /api/receipts/{id} ─────────────────────────────► ReceiptStore    │
//! │                                                        200 / 404        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`Receipt`]: fairshare_core::Receipt

pub mod config;
pub mod error;
pub mod parser;
pub mod routes;
pub mod store;

pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use routes::build_router;
pub use store::ReceiptStore;

/// Shared application state.
pub struct AppState {
    pub store: ReceiptStore,
    pub config: ApiConfig,
}

impl AppState {
    pub fn new(config: ApiConfig) -> Self {
        AppState {
            store: ReceiptStore::new(),
            config,
        }
    }
}
