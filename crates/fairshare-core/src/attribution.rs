//! # Attribution Matrix
//!
//! Sparse record of which participants split which line item.
//!
//! ```text
//! item index ──► { ParticipantId, ... }
//!
//!   0 (Pizza) ──► { #0, #1 }
//!   1 (Soda)  ──► { #0 }
//!   2 (Chips) ──► (no row = nobody selected)
//! ```
//!
//! A missing row and a missing id both mean "not selected". Rows that become
//! empty are dropped so two matrices with the same selections compare equal.
//!
//! Mutation is crate-private; [`crate::BillSession`] validates positions and
//! item indices before calling in, and drops a removed participant from every
//! row in the same call that removes them from the roster.

use std::collections::{BTreeMap, BTreeSet};

use crate::roster::{ParticipantId, Roster};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributionMatrix {
    rows: BTreeMap<usize, BTreeSet<ParticipantId>>,
}

impl AttributionMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips one cell and returns its new state.
    pub(crate) fn toggle(&mut self, item: usize, participant: ParticipantId) -> bool {
        let row = self.rows.entry(item).or_default();
        let selected = if row.remove(&participant) {
            false
        } else {
            row.insert(participant);
            true
        };
        if row.is_empty() {
            self.rows.remove(&item);
        }
        selected
    }

    /// Drops a participant from every row.
    pub(crate) fn forget(&mut self, participant: ParticipantId) {
        self.rows.retain(|_, row| {
            row.remove(&participant);
            !row.is_empty()
        });
    }

    /// Clears every selection on one item.
    pub(crate) fn clear_item(&mut self, item: usize) {
        self.rows.remove(&item);
    }

    pub fn contains(&self, item: usize, participant: ParticipantId) -> bool {
        self.rows
            .get(&item)
            .is_some_and(|row| row.contains(&participant))
    }

    /// Positions selected on `item`, in roster order.
    pub fn selected_positions(&self, item: usize, roster: &Roster) -> Vec<usize> {
        let Some(row) = self.rows.get(&item) else {
            return Vec::new();
        };
        roster
            .iter()
            .enumerate()
            .filter(|(_, participant)| row.contains(&participant.id()))
            .map(|(position, _)| position)
            .collect()
    }

    /// Number of item rows with at least one selection.
    pub fn attributed_item_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_flips_cell() {
        let roster = Roster::with_names(["A", "B"]);
        let a = roster.id_at(0).unwrap();
        let mut matrix = AttributionMatrix::new();

        assert!(matrix.toggle(0, a));
        assert!(matrix.contains(0, a));
        assert!(!matrix.toggle(0, a));
        assert!(!matrix.contains(0, a));
    }

    #[test]
    fn test_empty_rows_are_dropped() {
        let roster = Roster::with_names(["A"]);
        let a = roster.id_at(0).unwrap();
        let mut matrix = AttributionMatrix::new();

        matrix.toggle(3, a);
        matrix.toggle(3, a);

        assert!(matrix.is_empty());
        assert_eq!(matrix, AttributionMatrix::new());
    }

    #[test]
    fn test_selected_positions_follow_roster_order() {
        let roster = Roster::with_names(["A", "B", "C"]);
        let mut matrix = AttributionMatrix::new();
        matrix.toggle(0, roster.id_at(2).unwrap());
        matrix.toggle(0, roster.id_at(0).unwrap());

        assert_eq!(matrix.selected_positions(0, &roster), vec![0, 2]);
        assert!(matrix.selected_positions(1, &roster).is_empty());
    }

    #[test]
    fn test_forget_removes_participant_everywhere() {
        let roster = Roster::with_names(["A", "B"]);
        let a = roster.id_at(0).unwrap();
        let b = roster.id_at(1).unwrap();
        let mut matrix = AttributionMatrix::new();
        matrix.toggle(0, a);
        matrix.toggle(0, b);
        matrix.toggle(1, a);

        matrix.forget(a);

        assert!(!matrix.contains(0, a));
        assert!(matrix.contains(0, b));
        assert_eq!(matrix.attributed_item_count(), 1);
    }

    #[test]
    fn test_clear_item() {
        let roster = Roster::with_names(["A", "B"]);
        let mut matrix = AttributionMatrix::new();
        matrix.toggle(2, roster.id_at(0).unwrap());
        matrix.toggle(2, roster.id_at(1).unwrap());

        matrix.clear_item(2);

        assert!(matrix.is_empty());
    }
}
