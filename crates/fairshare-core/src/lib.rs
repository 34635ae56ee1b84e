//! # fairshare-core: Bill-Splitting Engine
//!
//! Pure logic for splitting a parsed receipt between a group of people:
//! who is on the bill, who shares which line item, and what each person owes.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        FairShare Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Bill View (frontend)                         │   │
//! │  │       Roster chips ──► Item checkboxes ──► Per-person totals    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ fairshare-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌─────────────┐ ┌──────────────┐   │   │
//! │  │   │  types   │ │  roster  │ │ attribution │ │  allocation  │   │   │
//! │  │   │ Receipt  │ │  Roster  │ │   Matrix    │ │  allocate()  │   │   │
//! │  │   │ LineItem │ │ Particip.│ │             │ │  Allocation  │   │   │
//! │  │   └──────────┘ └──────────┘ └─────────────┘ └──────────────┘   │   │
//! │  │                  session: BillSession ties them together       │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │           fairshare-client (receipt upload / lookup)            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Receipt and line item
//! - [`money`] - Integer-cent money, exact splitting, wire adapters
//! - [`roster`] - Ordered participants with stable ids
//! - [`attribution`] - Item to participant selections
//! - [`allocation`] - Per-participant totals
//! - [`session`] - One bill view's mutable state
//! - [`validation`] - Name and receipt id rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use fairshare_core::{BillSession, LineItem, Money, Receipt, Roster};
//!
//! let receipt = Receipt::new("r-1", vec![
//!     LineItem::single("Pizza", Money::from_cents(2000)),
//!     LineItem::single("Soda", Money::from_cents(400)),
//! ]);
//! let mut session = BillSession::with_roster(receipt, Roster::with_names(["A", "B"]));
//!
//! session.toggle(0, 0)?; // Pizza: A
//! session.toggle(0, 1)?; // Pizza: B
//! session.toggle(1, 0)?; // Soda: A
//!
//! let allocation = session.allocation();
//! assert_eq!(allocation.shares[0].total, Money::from_cents(1400));
//! assert_eq!(allocation.shares[1].total, Money::from_cents(1000));
//! # Ok::<(), fairshare_core::CoreError>(())
//! ```

pub mod allocation;
pub mod attribution;
pub mod error;
pub mod money;
pub mod roster;
pub mod session;
pub mod types;
pub mod validation;

pub use allocation::{allocate, Allocation, ParticipantShare};
pub use attribution::AttributionMatrix;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use roster::{Participant, ParticipantId, Roster};
pub use session::BillSession;
pub use types::*;

/// Longest accepted receipt identifier. UUIDs are 36.
pub const MAX_RECEIPT_ID_LEN: usize = 64;
