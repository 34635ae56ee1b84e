//! # Allocation Calculator
//!
//! Derives what each participant owes from the receipt items, the roster and
//! the attribution matrix.
//!
//! ## Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  for each item i with line total P_i:                                   │
//! │                                                                         │
//! │    S_i = selected positions on row i (roster order)                     │
//! │                                                                         │
//! │    S_i empty ──► P_i goes to `unallocated`, nobody pays it              │
//! │                                                                         │
//! │    |S_i| = k ──► P_i.split_even(k, i)                                   │
//! │                  floor(P_i / k) cents each, leftover cents one per      │
//! │                  member starting at rank (i mod k)                      │
//! │                                                                         │
//! │  subtotal[p] = Σ shares received by p                                   │
//! │  total[p]    = subtotal[p]          (tax is never apportioned)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The result is recomputed from scratch after every mutation; nothing here
//! keeps state between calls.

use serde::Serialize;
use ts_rs::TS;

use crate::attribution::AttributionMatrix;
use crate::money::Money;
use crate::roster::Roster;
use crate::types::LineItem;

/// What one participant owes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ParticipantShare {
    /// Roster position at the time of calculation.
    pub position: usize,

    pub name: String,

    /// Sum of this participant's item shares.
    pub subtotal: Money,

    /// Amount owed; equal to `subtotal` because tax is not apportioned.
    pub total: Money,
}

/// Per-participant totals plus the value nobody was attributed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Allocation {
    /// One entry per roster position, in roster order.
    pub shares: Vec<ParticipantShare>,

    /// Sum of line totals that were split among at least one participant.
    pub allocated: Money,

    /// Sum of line totals with no attributed participant. Not charged to
    /// anyone; reported so the bill view can flag it.
    pub unallocated: Money,

    /// Indices of the unattributed line items.
    pub unallocated_items: Vec<usize>,
}

impl Allocation {
    /// Share for a roster position.
    pub fn share(&self, position: usize) -> Option<&ParticipantShare> {
        self.shares.get(position)
    }

    /// Sum of every participant's total.
    pub fn grand_total(&self) -> Money {
        self.shares.iter().map(|share| share.total).sum()
    }
}

/// Computes every participant's share of the bill.
///
/// ## Example
/// ```rust
/// use fairshare_core::{allocate, AttributionMatrix, LineItem, Money, Roster};
///
/// let items = vec![LineItem::single("Tea", Money::from_cents(300))];
/// let roster = Roster::with_names(["A", "B"]);
/// let allocation = allocate(&items, &roster, &AttributionMatrix::new());
///
/// assert_eq!(allocation.grand_total(), Money::zero());
/// assert_eq!(allocation.unallocated, Money::from_cents(300));
/// ```
pub fn allocate(items: &[LineItem], roster: &Roster, matrix: &AttributionMatrix) -> Allocation {
    let mut subtotals = vec![Money::zero(); roster.len()];
    let mut allocated = Money::zero();
    let mut unallocated = Money::zero();
    let mut unallocated_items = Vec::new();

    for (index, item) in items.iter().enumerate() {
        let members = matrix.selected_positions(index, roster);

        if members.is_empty() {
            unallocated += item.total_price;
            unallocated_items.push(index);
            continue;
        }

        let shares = item.total_price.split_even(members.len(), index);
        for (position, share) in members.into_iter().zip(shares) {
            subtotals[position] += share;
        }
        allocated += item.total_price;
    }

    let shares = roster
        .iter()
        .zip(subtotals)
        .enumerate()
        .map(|(position, (participant, subtotal))| ParticipantShare {
            position,
            name: participant.name().to_string(),
            subtotal,
            total: subtotal,
        })
        .collect();

    Allocation {
        shares,
        allocated,
        unallocated,
        unallocated_items,
    }
}
