//! Propagation coordinator.
//!
//! Orchestrates enforcement passes over a model's relation set. A pass
//! runs when an entry edit is committed (`is_adjusting` back to `false`),
//! when a model is loaded, or when a single relation is inserted.
//!
//! Each `Corrected` outcome re-enqueues the relations touching the
//! corrected entries, so fixes cascade transitively. A visited-relation
//! guard bounds every pass: each relation is applied at most once, which
//! guarantees termination even on cyclic relation graphs. A cyclic graph
//! may therefore end a pass with relations still violated — callers
//! observe these via [`PropagationCoordinator::check_all`] and the next
//! pass picks them up.
//!
//! Single-threaded, call-and-return. Callers must not re-enter model
//! mutation entry points from within the `on_entry_changed` callback.

use std::collections::{HashSet, VecDeque};

use tracing::{debug, trace};

use crate::enforcement::{self, Correction, EnforcementMode, Outcome};
use crate::error::ModelError;
use crate::models::{ChartModel, Entry, Relation, TimePoint};

/// Callback fired for every entry whose range was corrected. Injection
/// point for the persistence layer's write-back.
pub type EntryChangedFn<T> = Box<dyn FnMut(&Entry<T>)>;

/// Coordinates constraint enforcement across a model.
pub struct PropagationCoordinator<T: TimePoint> {
    mode: EnforcementMode,
    on_entry_changed: Option<EntryChangedFn<T>>,
}

impl<T: TimePoint> PropagationCoordinator<T> {
    /// Creates a coordinator with the given enforcement mode.
    pub fn new(mode: EnforcementMode) -> Self {
        Self {
            mode,
            on_entry_changed: None,
        }
    }

    /// Creates a coordinator from the external `validation` toggle.
    pub fn from_validation_flag(validation: bool) -> Self {
        Self::new(EnforcementMode::from_validation_flag(validation))
    }

    /// Injects the entry-changed callback.
    pub fn with_entry_changed(mut self, callback: EntryChangedFn<T>) -> Self {
        self.on_entry_changed = Some(callback);
        self
    }

    /// Active enforcement mode.
    pub fn mode(&self) -> EnforcementMode {
        self.mode
    }

    /// Handles a committed or mid-gesture update of one entry.
    ///
    /// While the entry `is_adjusting` the update is visually live but
    /// uncommitted: no propagation runs. On a committed update, every
    /// relation touching the entry is enforced, cascading through
    /// corrections.
    pub fn entry_updated(
        &mut self,
        model: &mut ChartModel<T>,
        entry_id: &str,
    ) -> Result<PropagationReport<T>, ModelError> {
        let entry = model.entry(entry_id).ok_or_else(|| ModelError::UnknownEntry {
            id: entry_id.to_string(),
        })?;
        if entry.is_adjusting {
            trace!(entry = %entry_id, "mid-gesture update, propagation suppressed");
            return Ok(PropagationReport::default());
        }

        let seed = model.relations_touching(entry_id);
        Ok(self.run_pass(model, seed))
    }

    /// Normalizes a freshly loaded model: one guarded pass seeded with
    /// every existing relation.
    pub fn model_loaded(&mut self, model: &mut ChartModel<T>) -> PropagationReport<T> {
        let seed = model.relations().to_vec();
        debug!(relations = seed.len(), "normalizing loaded model");
        self.run_pass(model, seed)
    }

    /// Inserts a relation and enforces it once. Does not cascade to
    /// unrelated relations. Dangling endpoints are rejected here, never
    /// reached during propagation.
    pub fn relation_added(
        &mut self,
        model: &mut ChartModel<T>,
        relation: Relation,
    ) -> Result<Outcome<T>, ModelError> {
        model.add_relation(relation.clone())?;
        let outcome = enforcement::apply(self.mode, model, &relation);
        if let Outcome::Corrected { corrections } = &outcome {
            self.fire_entry_changed(model, corrections);
        }
        Ok(outcome)
    }

    /// Non-mutating sweep reporting every currently violated relation.
    ///
    /// Useful after a pass over a cyclic graph, where the visited guard
    /// may have terminated with residual violations.
    pub fn check_all(&self, model: &ChartModel<T>) -> PropagationReport<T> {
        let mut report = PropagationReport::default();
        for relation in model.relations() {
            let outcome = enforcement::check(model, relation);
            if !matches!(outcome, Outcome::Satisfied) {
                report.outcomes.push((relation.clone(), outcome));
            }
        }
        report
    }

    fn run_pass(
        &mut self,
        model: &mut ChartModel<T>,
        seed: Vec<Relation>,
    ) -> PropagationReport<T> {
        let mut report = PropagationReport::default();
        let mut visited: HashSet<Relation> = HashSet::new();
        let mut worklist: VecDeque<Relation> = seed.into();

        while let Some(relation) = worklist.pop_front() {
            if !visited.insert(relation.clone()) {
                trace!(
                    predecessor = %relation.predecessor_id,
                    successor = %relation.successor_id,
                    "relation already enforced in this pass, skipping"
                );
                continue;
            }

            let outcome = enforcement::apply(self.mode, model, &relation);
            match &outcome {
                Outcome::Satisfied => continue,
                Outcome::Corrected { corrections } => {
                    self.fire_entry_changed(model, corrections);
                    // A corrected entry counts as a committed update:
                    // its other relations join the pass.
                    for correction in corrections {
                        for next in model.relations_touching(&correction.entry_id) {
                            if !visited.contains(&next) {
                                worklist.push_back(next);
                            }
                        }
                    }
                }
                Outcome::Violated { kind, .. } => {
                    debug!(
                        predecessor = %relation.predecessor_id,
                        successor = %relation.successor_id,
                        %kind,
                        "relation violated"
                    );
                }
                Outcome::Invalid { entry_id } => {
                    debug!(entry = %entry_id, "negative-duration range, correction refused");
                }
            }
            report.outcomes.push((relation, outcome));
        }

        report
    }

    fn fire_entry_changed(&mut self, model: &ChartModel<T>, corrections: &[Correction<T>]) {
        let Some(callback) = self.on_entry_changed.as_mut() else {
            return;
        };
        for correction in corrections {
            if let Some(entry) = model.entry(&correction.entry_id) {
                callback(entry);
            }
        }
    }
}

/// Ordered outcomes of one propagation pass. `Satisfied` outcomes are
/// omitted.
#[derive(Debug, Clone)]
pub struct PropagationReport<T: TimePoint> {
    /// Relation/outcome pairs in enforcement order.
    pub outcomes: Vec<(Relation, Outcome<T>)>,
}

impl<T: TimePoint> Default for PropagationReport<T> {
    fn default() -> Self {
        Self {
            outcomes: Vec::new(),
        }
    }
}

impl<T: TimePoint> PropagationReport<T> {
    /// Whether the pass found nothing to report.
    pub fn is_clean(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// All violated relations (Notify policy, or residual).
    pub fn violations(&self) -> Vec<&Relation> {
        self.outcomes
            .iter()
            .filter(|(_, o)| matches!(o, Outcome::Violated { .. }))
            .map(|(r, _)| r)
            .collect()
    }

    /// All applied corrections across the pass, in order.
    pub fn corrections(&self) -> Vec<&Correction<T>> {
        self.outcomes
            .iter()
            .filter_map(|(_, o)| match o {
                Outcome::Corrected { corrections } => Some(corrections.iter()),
                _ => None,
            })
            .flatten()
            .collect()
    }
}
