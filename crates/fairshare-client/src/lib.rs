//! # fairshare-client: Receipt Service Client for FairShare
//!
//! Connects the pure engine in `fairshare-core` to the receipt service.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Client Architecture                              │
//! │                                                                         │
//! │  ┌──────────────────┐      ┌────────────────────┐                      │
//! │  │  ClientConfig    │─────►│  HttpReceiptClient │── HTTP ──► receipt   │
//! │  │  TOML + env      │      │  (ReceiptService)  │           service    │
//! │  └──────────────────┘      └─────────┬──────────┘                      │
//! │                                      │                                  │
//! │                            ┌─────────▼──────────┐                      │
//! │                            │  ReceiptLoader     │                      │
//! │                            │  drops stale loads │                      │
//! │                            └─────────┬──────────┘                      │
//! │                                      ▼                                  │
//! │                           fairshare_core::BillSession                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//! - [`client`] - `ReceiptService` trait and its HTTP implementation
//! - [`config`] - Client configuration (API URL, timeout, default roster)
//! - [`error`] - Client error types
//! - [`loader`] - Opens bill sessions, ignoring superseded responses
//!
//! ## Usage
//!
//! ```rust,no_run
//! use fairshare_client::{ClientConfig, ClientError, HttpReceiptClient, ReceiptLoader};
//!
//! # async fn run() -> fairshare_client::ClientResult<()> {
//! let config = ClientConfig::load_or_default(None);
//! let loader = ReceiptLoader::new(HttpReceiptClient::new(&config)?, &config);
//!
//! let document = std::fs::read("receipt.pdf")
//!     .map_err(|e| ClientError::Upload(format!("cannot read receipt.pdf: {}", e)))?;
//! let id = loader.upload("receipt.pdf", document).await?;
//! if let Some(mut session) = loader.open(&id).await? {
//!     session.toggle(0, 0)?;
//!     println!("{:?}", session.allocation());
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod loader;

pub use client::{HttpReceiptClient, ReceiptService, UPLOAD_FIELD};
pub use config::{ApiSettings, ClientConfig, RosterSettings};
pub use error::{ClientError, ClientResult};
pub use loader::ReceiptLoader;
