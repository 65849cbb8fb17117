//! Enforcement policies for violated relations.
//!
//! Two interchangeable reactions to an unsatisfied relation:
//!
//! - **Notify** ([`check`]): report the violation, mutate nothing. Used
//!   interactively to block an illegal edit; the presentation layer
//!   renders the message and undoes the gesture.
//! - **Auto-correct** ([`auto_correct`]): reschedule the successor to a
//!   duration-preserving range that satisfies the constraint, then
//!   cascade the fix to affected children of the successor.
//!
//! The child cascade is asymmetric by design: start-anchored kinds
//! (FS/SS) can violate any child independently, so every child is
//! re-checked; finish-anchored kinds (FF/SF) only risk the child
//! extending furthest, so only the child with the maximum upper bound
//! is re-checked.

use serde::{Deserialize, Serialize};

use crate::models::{ChartModel, Range, Relation, RelationKind, TimePoint};

/// Which enforcement policy is active.
///
/// Maps to the external `validation` toggle: `true` blocks and notifies,
/// `false` silently auto-corrects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnforcementMode {
    /// Report violations; never mutate.
    Notify,
    /// Reschedule the successor (and affected children) to restore
    /// consistency.
    #[default]
    AutoCorrect,
}

impl EnforcementMode {
    /// Maps the external `validation` flag to a mode.
    pub fn from_validation_flag(validation: bool) -> Self {
        if validation {
            EnforcementMode::Notify
        } else {
            EnforcementMode::AutoCorrect
        }
    }
}

/// A single applied range replacement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Correction<T: TimePoint> {
    /// Entry whose range was replaced.
    pub entry_id: String,
    /// Range before the correction.
    pub old_range: Range<T>,
    /// Range after the correction. Same duration as `old_range`.
    pub new_range: Range<T>,
}

/// Result of applying an enforcement policy to one relation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Outcome<T: TimePoint> {
    /// The relation already holds; nothing was changed.
    Satisfied,
    /// The relation is violated (Notify policy; data unchanged).
    Violated {
        kind: RelationKind,
        predecessor_id: String,
        successor_id: String,
    },
    /// The relation was violated and the listed corrections were applied
    /// (Auto-correct policy). The first correction is the successor's.
    Corrected { corrections: Vec<Correction<T>> },
    /// An involved entry has a negative-duration range. Caller contract
    /// violation; nothing was mutated.
    Invalid { entry_id: String },
}

impl<T: TimePoint> Outcome<T> {
    /// Whether this outcome left the relation satisfied.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Outcome::Satisfied | Outcome::Corrected { .. })
    }
}

/// Applies the active policy to one relation.
pub fn apply<T: TimePoint>(
    mode: EnforcementMode,
    model: &mut ChartModel<T>,
    relation: &Relation,
) -> Outcome<T> {
    match mode {
        EnforcementMode::Notify => check(model, relation),
        EnforcementMode::AutoCorrect => auto_correct(model, relation),
    }
}

/// Notify policy: reports whether the relation holds. Never mutates.
pub fn check<T: TimePoint>(model: &ChartModel<T>, relation: &Relation) -> Outcome<T> {
    let (Some(pre), Some(suc)) = (
        model.entry(&relation.predecessor_id),
        model.entry(&relation.successor_id),
    ) else {
        // Insertion-time checks make this unreachable for well-formed models.
        tracing::warn!(
            predecessor = %relation.predecessor_id,
            successor = %relation.successor_id,
            "relation references missing entry"
        );
        return Outcome::Satisfied;
    };

    if relation.kind.is_satisfied(&pre.range, &suc.range) {
        Outcome::Satisfied
    } else {
        Outcome::Violated {
            kind: relation.kind,
            predecessor_id: relation.predecessor_id.clone(),
            successor_id: relation.successor_id.clone(),
        }
    }
}

/// The duration-preserving range that satisfies `kind` for a successor
/// range, given the predecessor range.
fn corrected_range<T: TimePoint>(
    kind: RelationKind,
    predecessor: &Range<T>,
    successor: &Range<T>,
) -> Range<T> {
    match kind {
        RelationKind::FinishToStart => successor.anchored_at(predecessor.upper),
        RelationKind::StartToStart => successor.anchored_at(predecessor.lower),
        RelationKind::FinishToFinish => successor.anchored_until(predecessor.upper),
        RelationKind::StartToFinish => successor.anchored_until(predecessor.lower),
    }
}

/// Auto-correct policy: reschedules the successor, then affected
/// children, preserving every corrected entry's duration.
///
/// Returns [`Outcome::Invalid`] without mutating if the successor or any
/// cascade-eligible child has a negative-duration range.
pub fn auto_correct<T: TimePoint>(model: &mut ChartModel<T>, relation: &Relation) -> Outcome<T> {
    let checked = check(model, relation);
    if !matches!(checked, Outcome::Violated { .. }) {
        return checked;
    }

    // Both entries exist: check() already resolved them.
    let pre_range = match model.entry(&relation.predecessor_id) {
        Some(e) => e.range,
        None => return Outcome::Satisfied,
    };
    let successor = match model.entry(&relation.successor_id) {
        Some(e) => e,
        None => return Outcome::Satisfied,
    };
    let suc_id = successor.id.clone();
    let suc_range = successor.range;

    // Cascade-eligible children: all of them for start-anchored kinds,
    // only the max-upper child for finish-anchored kinds.
    let children: Vec<(String, Range<T>)> = if relation.kind.anchors_start() {
        model
            .children(&suc_id)
            .map(|c| (c.id.clone(), c.range))
            .collect()
    } else {
        model
            .children(&suc_id)
            .max_by_key(|c| c.range.upper)
            .map(|c| (c.id.clone(), c.range))
            .into_iter()
            .collect()
    };

    // Validate every involved duration before mutating anything.
    if !suc_range.is_well_formed() {
        return Outcome::Invalid { entry_id: suc_id };
    }
    if let Some((id, _)) = children.iter().find(|(_, r)| !r.is_well_formed()) {
        return Outcome::Invalid {
            entry_id: id.clone(),
        };
    }

    let mut corrections = vec![Correction {
        entry_id: suc_id,
        old_range: suc_range,
        new_range: corrected_range(relation.kind, &pre_range, &suc_range),
    }];

    for (child_id, child_range) in children {
        if !relation.kind.is_satisfied(&pre_range, &child_range) {
            corrections.push(Correction {
                entry_id: child_id,
                old_range: child_range,
                new_range: corrected_range(relation.kind, &pre_range, &child_range),
            });
        }
    }

    for c in &corrections {
        if let Some(entry) = model.entry_mut(&c.entry_id) {
            entry.range = c.new_range;
        }
        tracing::debug!(
            entry = %c.entry_id,
            kind = %relation.kind,
            "auto-corrected entry range"
        );
    }

    Outcome::Corrected { corrections }
}
