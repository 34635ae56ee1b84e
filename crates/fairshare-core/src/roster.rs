//! # Participant Roster
//!
//! Ordered list of the people splitting a bill.
//!
//! ## Position vs Identity
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  position:  0        1        2                                         │
//! │  name:      "Ana"    "Ben"    "Ana"      ← duplicate names allowed      │
//! │  id:        #0       #1       #2         ← stable, never reused         │
//! │                                                                         │
//! │  remove(1) ──►                                                          │
//! │                                                                         │
//! │  position:  0        1                                                  │
//! │  name:      "Ana"    "Ana"                                              │
//! │  id:        #0       #2                  ← id #2 keeps its attributions │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Callers address participants by position (the column in the bill view).
//! The attribution matrix stores [`ParticipantId`]s, so removing a
//! participant never renumbers anybody's selections.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::validation::validate_participant_name;

/// Opaque participant identity, unique within one roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ParticipantId(u64);

/// A person on the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    id: ParticipantId,
    name: String,
}

impl Participant {
    pub fn id(&self) -> ParticipantId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Ordered, mutable participant list.
///
/// ## Invariants
/// - Names are trimmed and non-empty
/// - Ids are unique and never reused, even after removal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    participants: Vec<Participant>,
    next_id: u64,
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a roster from a default name list.
    ///
    /// Blank entries are skipped the same way [`Roster::add`] skips them.
    pub fn with_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut roster = Roster::new();
        for name in names {
            roster.add(name.as_ref());
        }
        roster
    }

    /// Appends a participant and returns its position.
    ///
    /// Returns `None` (and changes nothing) only when the name is blank
    /// after trimming.
    pub fn add(&mut self, name: &str) -> Option<usize> {
        let name = validate_participant_name(name).ok()?;
        let id = ParticipantId(self.next_id);
        self.next_id += 1;
        self.participants.push(Participant { id, name });
        Some(self.participants.len() - 1)
    }

    /// Removes the participant at `position`.
    ///
    /// Crate-private: removal must go through [`crate::BillSession`] so the
    /// attribution matrix drops the same id in the same call.
    pub(crate) fn remove(&mut self, position: usize) -> CoreResult<Participant> {
        self.check_position(position)?;
        Ok(self.participants.remove(position))
    }

    /// Resolves a position to its participant id.
    pub fn id_at(&self, position: usize) -> CoreResult<ParticipantId> {
        self.check_position(position)?;
        Ok(self.participants[position].id)
    }

    /// Current position of a participant id, if still on the roster.
    pub fn position_of(&self, id: ParticipantId) -> Option<usize> {
        self.participants.iter().position(|p| p.id == id)
    }

    pub fn get(&self, position: usize) -> Option<&Participant> {
        self.participants.get(position)
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Participants in position order.
    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter()
    }

    /// Display names in position order.
    pub fn names(&self) -> Vec<&str> {
        self.participants.iter().map(|p| p.name.as_str()).collect()
    }

    fn check_position(&self, position: usize) -> CoreResult<()> {
        if position >= self.participants.len() {
            return Err(CoreError::ParticipantOutOfRange {
                position,
                len: self.participants.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_appends_at_end() {
        let mut roster = Roster::new();
        assert_eq!(roster.add("A"), Some(0));
        assert_eq!(roster.add("  B  "), Some(1));
        assert_eq!(roster.names(), vec!["A", "B"]);
    }

    #[test]
    fn test_add_blank_is_noop() {
        let mut roster = Roster::with_names(["A"]);
        assert_eq!(roster.add("   "), None);
        assert_eq!(roster.add(""), None);
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_add_long_name_is_appended() {
        let mut roster = Roster::with_names(["A"]);
        let long = "N".repeat(101);
        assert_eq!(roster.add(&long), Some(1));
        assert_eq!(roster.get(1).unwrap().name(), long);
    }

    #[test]
    fn test_with_names_keeps_long_names() {
        let long = "Q".repeat(250);
        let roster = Roster::with_names([long.as_str(), "  ", "B"]);
        assert_eq!(roster.names(), vec![long.as_str(), "B"]);
    }

    #[test]
    fn test_duplicate_names_are_distinct_participants() {
        let roster = Roster::with_names(["Sam", "Sam"]);
        assert_eq!(roster.len(), 2);
        assert_ne!(roster.id_at(0).unwrap(), roster.id_at(1).unwrap());
    }

    #[test]
    fn test_remove_shifts_later_positions() {
        let mut roster = Roster::with_names(["A", "B", "C"]);
        let c = roster.id_at(2).unwrap();

        let removed = roster.remove(1).unwrap();

        assert_eq!(removed.name(), "B");
        assert_eq!(roster.names(), vec!["A", "C"]);
        assert_eq!(roster.position_of(c), Some(1));
        assert_eq!(roster.position_of(removed.id()), None);
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut roster = Roster::with_names(["A"]);
        let first = roster.id_at(0).unwrap();
        roster.remove(0).unwrap();
        roster.add("A");
        assert_ne!(roster.id_at(0).unwrap(), first);
    }

    #[test]
    fn test_out_of_range_position() {
        let mut roster = Roster::with_names(["A"]);
        assert_eq!(
            roster.remove(1),
            Err(CoreError::ParticipantOutOfRange { position: 1, len: 1 })
        );
        assert!(roster.id_at(5).is_err());
    }
}
