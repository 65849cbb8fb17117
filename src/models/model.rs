//! Chart model container.
//!
//! Owns the flat, insertion-ordered entry collection and the relation
//! set. All structural mutations go through this type so that referential
//! integrity holds by construction: relations with dangling endpoints are
//! rejected at insertion, and deleting an entry cascades removal of every
//! relation touching it.
//!
//! The model is single-caller: no interior locking, callers must not
//! re-enter mutation methods from within propagation callbacks.

use serde::{Deserialize, Serialize};

use super::{Entry, Range, Relation, TimePoint};
use crate::error::{ModelError, RelationEnd};

/// A chart model: entries plus the relations constraining them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartModel<T: TimePoint> {
    entries: Vec<Entry<T>>,
    relations: Vec<Relation>,
}

impl<T: TimePoint> Default for ChartModel<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            relations: Vec::new(),
        }
    }
}

impl<T: TimePoint> ChartModel<T> {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Entries =====

    /// Adds an entry. Rejects duplicate IDs.
    pub fn add_entry(&mut self, entry: Entry<T>) -> Result<(), ModelError> {
        if self.entry(&entry.id).is_some() {
            return Err(ModelError::DuplicateEntry { id: entry.id });
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Looks up an entry by ID.
    pub fn entry(&self, id: &str) -> Option<&Entry<T>> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Looks up an entry mutably by ID.
    pub fn entry_mut(&mut self, id: &str) -> Option<&mut Entry<T>> {
        self.entries.iter_mut().find(|e| e.id == id)
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> &[Entry<T>] {
        &self.entries
    }

    /// Children of an entry, in insertion order.
    pub fn children<'a>(&'a self, parent_id: &'a str) -> impl Iterator<Item = &'a Entry<T>> + 'a {
        self.entries
            .iter()
            .filter(move |e| e.parent_id.as_deref() == Some(parent_id))
    }

    /// Removes an entry, cascading removal of every relation touching it.
    ///
    /// Children are kept; their `parent_id` becomes dangling and is
    /// surfaced by `validation::validate_model`, mirroring how the chart
    /// consumer decides whether to re-parent or delete them.
    pub fn remove_entry(&mut self, id: &str) -> Result<Entry<T>, ModelError> {
        let pos = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| ModelError::UnknownEntry { id: id.to_string() })?;
        self.relations.retain(|r| !r.touches(id));
        Ok(self.entries.remove(pos))
    }

    /// Replaces an entry's range wholesale.
    pub fn set_range(&mut self, id: &str, range: Range<T>) -> Result<(), ModelError> {
        let entry = self
            .entry_mut(id)
            .ok_or_else(|| ModelError::UnknownEntry { id: id.to_string() })?;
        entry.range = range;
        Ok(())
    }

    /// Marks an entry as mid-gesture (`true`) or committed (`false`).
    pub fn set_adjusting(&mut self, id: &str, adjusting: bool) -> Result<(), ModelError> {
        let entry = self
            .entry_mut(id)
            .ok_or_else(|| ModelError::UnknownEntry { id: id.to_string() })?;
        entry.is_adjusting = adjusting;
        Ok(())
    }

    // ===== Relations =====

    /// Adds a relation. Rejects dangling endpoints, self-relations, and
    /// exact duplicates (same endpoints and kind).
    pub fn add_relation(&mut self, relation: Relation) -> Result<(), ModelError> {
        if relation.predecessor_id == relation.successor_id {
            return Err(ModelError::SelfRelation {
                id: relation.predecessor_id,
            });
        }
        if self.entry(&relation.predecessor_id).is_none() {
            return Err(ModelError::UnknownRelationEndpoint {
                id: relation.predecessor_id,
                end: RelationEnd::Predecessor,
            });
        }
        if self.entry(&relation.successor_id).is_none() {
            return Err(ModelError::UnknownRelationEndpoint {
                id: relation.successor_id,
                end: RelationEnd::Successor,
            });
        }
        if self.relations.contains(&relation) {
            return Err(ModelError::DuplicateRelation {
                predecessor_id: relation.predecessor_id,
                successor_id: relation.successor_id,
            });
        }
        self.relations.push(relation);
        Ok(())
    }

    /// Removes a relation. No propagation follows a removal.
    pub fn remove_relation(&mut self, relation: &Relation) -> bool {
        let before = self.relations.len();
        self.relations.retain(|r| r != relation);
        self.relations.len() != before
    }

    /// All relations in insertion order.
    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// Relations where the entry is predecessor or successor.
    pub fn relations_touching(&self, entry_id: &str) -> Vec<Relation> {
        self.relations
            .iter()
            .filter(|r| r.touches(entry_id))
            .cloned()
            .collect()
    }
}
