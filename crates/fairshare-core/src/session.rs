//! # Bill Session
//!
//! One bill view's worth of state: the loaded receipt, the roster and the
//! attribution matrix.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Bill Session Operations                              │
//! │                                                                         │
//! │  User Action              Session Method            State Change        │
//! │  ───────────              ──────────────            ────────────        │
//! │                                                                         │
//! │  Type name + Add ───────► add_participant() ──────► roster.push        │
//! │                                                                         │
//! │  Delete chip ───────────► remove_participant() ───► roster.remove +    │
//! │                                                     matrix.forget      │
//! │                                                                         │
//! │  Tick checkbox ─────────► toggle() ───────────────► matrix cell flip   │
//! │                                                                         │
//! │  Render totals ─────────► allocation() ───────────► (read only)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every mutation takes `&mut self` and completes before returning, so no
//! caller can observe a roster and matrix that disagree.

use crate::allocation::{allocate, Allocation};
use crate::attribution::AttributionMatrix;
use crate::error::{CoreError, CoreResult};
use crate::roster::{Participant, Roster};
use crate::types::Receipt;

#[derive(Debug, Clone)]
pub struct BillSession {
    receipt: Receipt,
    roster: Roster,
    matrix: AttributionMatrix,
}

impl BillSession {
    /// Starts a session with an empty roster.
    pub fn new(receipt: Receipt) -> Self {
        Self::with_roster(receipt, Roster::new())
    }

    /// Starts a session with a prepared roster (usually the configured
    /// default participants). The attribution matrix starts empty.
    pub fn with_roster(receipt: Receipt, roster: Roster) -> Self {
        BillSession {
            receipt,
            roster,
            matrix: AttributionMatrix::new(),
        }
    }

    pub fn receipt(&self) -> &Receipt {
        &self.receipt
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn matrix(&self) -> &AttributionMatrix {
        &self.matrix
    }

    /// Appends a participant; `None` when the trimmed name is blank.
    pub fn add_participant(&mut self, name: &str) -> Option<usize> {
        self.roster.add(name)
    }

    /// Removes the participant at `position` together with all of their
    /// attributions.
    ///
    /// Participants after `position` move down by one and keep their
    /// selections; nothing is re-attributed to a different person.
    pub fn remove_participant(&mut self, position: usize) -> CoreResult<Participant> {
        let removed = self.roster.remove(position)?;
        self.matrix.forget(removed.id());
        Ok(removed)
    }

    /// Flips whether the participant at `position` splits line item `item`.
    ///
    /// Returns the new state of the cell.
    pub fn toggle(&mut self, item: usize, position: usize) -> CoreResult<bool> {
        self.check_item(item)?;
        let participant = self.roster.id_at(position)?;
        Ok(self.matrix.toggle(item, participant))
    }

    /// Clears all selections on one line item.
    pub fn clear_item(&mut self, item: usize) -> CoreResult<()> {
        self.check_item(item)?;
        self.matrix.clear_item(item);
        Ok(())
    }

    pub fn is_selected(&self, item: usize, position: usize) -> CoreResult<bool> {
        self.check_item(item)?;
        let participant = self.roster.id_at(position)?;
        Ok(self.matrix.contains(item, participant))
    }

    pub fn selected_positions(&self, item: usize) -> CoreResult<Vec<usize>> {
        self.check_item(item)?;
        Ok(self.matrix.selected_positions(item, &self.roster))
    }

    /// Names selected on a line item, in roster order.
    pub fn selected_names(&self, item: usize) -> CoreResult<Vec<&str>> {
        Ok(self
            .selected_positions(item)?
            .into_iter()
            .filter_map(|position| self.roster.get(position).map(Participant::name))
            .collect())
    }

    /// Recomputes every participant's share from the current state.
    pub fn allocation(&self) -> Allocation {
        allocate(&self.receipt.items, &self.roster, &self.matrix)
    }

    fn check_item(&self, item: usize) -> CoreResult<()> {
        if item >= self.receipt.items.len() {
            return Err(CoreError::ItemOutOfRange {
                index: item,
                len: self.receipt.items.len(),
            });
        }
        Ok(())
    }
}
