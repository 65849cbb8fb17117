//! Relation (typed dependency) model.
//!
//! A relation is a directed edge between two entries with one of the four
//! precedence-diagramming kinds. Relations are only ever created or
//! removed — never mutated — and are never implied by hierarchy.
//!
//! The per-kind constraint checkers live here as
//! [`RelationKind::is_satisfied`]: pure predicates over the two ranges,
//! boundary inclusive (equal bounds satisfy all four kinds).
//!
//! # Reference
//! PMBOK Guide, Precedence Diagramming Method (FS/SS/FF/SF dependencies)

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Range, TimePoint};

/// The four precedence-diagramming dependency kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationKind {
    /// Successor may not start before the predecessor finishes.
    FinishToStart,
    /// Successor may not start before the predecessor starts.
    StartToStart,
    /// Successor may not finish before the predecessor finishes.
    FinishToFinish,
    /// Successor may not finish before the predecessor starts.
    StartToFinish,
}

impl RelationKind {
    /// Whether the constraint holds for the given predecessor and
    /// successor ranges. Ties on the compared bounds count as satisfied.
    pub fn is_satisfied<T: TimePoint>(self, predecessor: &Range<T>, successor: &Range<T>) -> bool {
        match self {
            RelationKind::FinishToStart => successor.lower >= predecessor.upper,
            RelationKind::StartToStart => successor.lower >= predecessor.lower,
            RelationKind::FinishToFinish => successor.upper >= predecessor.upper,
            RelationKind::StartToFinish => predecessor.lower <= successor.upper,
        }
    }

    /// Whether the kind anchors the successor's start (FS/SS) rather
    /// than its finish (FF/SF).
    pub fn anchors_start(self) -> bool {
        matches!(
            self,
            RelationKind::FinishToStart | RelationKind::StartToStart
        )
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RelationKind::FinishToStart => "finish-to-start",
            RelationKind::StartToStart => "start-to-start",
            RelationKind::FinishToFinish => "finish-to-finish",
            RelationKind::StartToFinish => "start-to-finish",
        };
        f.write_str(label)
    }
}

/// A directed dependency between two entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relation {
    /// ID of the predecessor entry.
    pub predecessor_id: String,
    /// ID of the successor entry.
    pub successor_id: String,
    /// Dependency kind.
    pub kind: RelationKind,
}

impl Relation {
    /// Creates a new relation.
    pub fn new(
        predecessor_id: impl Into<String>,
        successor_id: impl Into<String>,
        kind: RelationKind,
    ) -> Self {
        Self {
            predecessor_id: predecessor_id.into(),
            successor_id: successor_id.into(),
            kind,
        }
    }

    /// Whether this relation references the given entry on either end.
    pub fn touches(&self, entry_id: &str) -> bool {
        self.predecessor_id == entry_id || self.successor_id == entry_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_to_start() {
        let p = Range::new(10i64, 20);
        assert!(RelationKind::FinishToStart.is_satisfied(&p, &Range::new(20, 30)));
        assert!(RelationKind::FinishToStart.is_satisfied(&p, &Range::new(25, 30)));
        assert!(!RelationKind::FinishToStart.is_satisfied(&p, &Range::new(19, 30)));
    }

    #[test]
    fn test_start_to_start() {
        let p = Range::new(10i64, 20);
        assert!(RelationKind::StartToStart.is_satisfied(&p, &Range::new(10, 12)));
        assert!(RelationKind::StartToStart.is_satisfied(&p, &Range::new(15, 18)));
        assert!(!RelationKind::StartToStart.is_satisfied(&p, &Range::new(9, 30)));
    }

    #[test]
    fn test_finish_to_finish() {
        let p = Range::new(10i64, 20);
        assert!(RelationKind::FinishToFinish.is_satisfied(&p, &Range::new(5, 20)));
        assert!(RelationKind::FinishToFinish.is_satisfied(&p, &Range::new(5, 25)));
        assert!(!RelationKind::FinishToFinish.is_satisfied(&p, &Range::new(5, 19)));
    }

    #[test]
    fn test_start_to_finish() {
        let p = Range::new(10i64, 20);
        assert!(RelationKind::StartToFinish.is_satisfied(&p, &Range::new(0, 10)));
        assert!(RelationKind::StartToFinish.is_satisfied(&p, &Range::new(0, 15)));
        assert!(!RelationKind::StartToFinish.is_satisfied(&p, &Range::new(0, 9)));
    }

    #[test]
    fn test_boundary_equality_satisfies_all_kinds() {
        // Degenerate equal ranges: every compared bound ties.
        let p = Range::new(10i64, 10);
        let s = Range::new(10i64, 10);
        for kind in [
            RelationKind::FinishToStart,
            RelationKind::StartToStart,
            RelationKind::FinishToFinish,
            RelationKind::StartToFinish,
        ] {
            assert!(kind.is_satisfied(&p, &s), "{kind} should accept ties");
        }
    }

    #[test]
    fn test_anchors_start() {
        assert!(RelationKind::FinishToStart.anchors_start());
        assert!(RelationKind::StartToStart.anchors_start());
        assert!(!RelationKind::FinishToFinish.anchors_start());
        assert!(!RelationKind::StartToFinish.anchors_start());
    }

    #[test]
    fn test_relation_touches() {
        let r = Relation::new("A", "B", RelationKind::FinishToStart);
        assert!(r.touches("A"));
        assert!(r.touches("B"));
        assert!(!r.touches("C"));
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(RelationKind::FinishToStart.to_string(), "finish-to-start");
        assert_eq!(RelationKind::StartToFinish.to_string(), "start-to-finish");
    }
}
