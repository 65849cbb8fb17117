//! Structural model errors.
//!
//! These are caller contract violations surfaced at mutation time —
//! dangling references are rejected when a relation is inserted, never
//! discovered mid-propagation.

use thiserror::Error;

/// Error raised by structural mutations of a chart model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("duplicate entry id: {id}")]
    DuplicateEntry { id: String },

    #[error("unknown entry: {id}")]
    UnknownEntry { id: String },

    #[error("relation references unknown entry: {id} ({end})")]
    UnknownRelationEndpoint { id: String, end: RelationEnd },

    #[error("relation from entry {id} to itself")]
    SelfRelation { id: String },

    #[error("duplicate relation: {predecessor_id} -> {successor_id}")]
    DuplicateRelation {
        predecessor_id: String,
        successor_id: String,
    },
}

/// Which end of a relation referenced a missing entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationEnd {
    Predecessor,
    Successor,
}

impl std::fmt::Display for RelationEnd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RelationEnd::Predecessor => f.write_str("predecessor"),
            RelationEnd::Successor => f.write_str("successor"),
        }
    }
}
