//! Entry (schedulable unit) model.
//!
//! An entry is a single bar on the chart: it has identity, a time
//! [`Range`], a completion fraction, and an optional parent link forming
//! a hierarchy. Hierarchy is a lookup relationship (`parent_id`), not
//! ownership — the model owns all entries in a flat, ordered collection.
//!
//! Parent/child range containment is deliberately *not* enforced; only
//! explicit relations between entries are constrained.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{Range, TimePoint};

/// A schedulable entry on the chart.
///
/// # Adjusting State
///
/// `is_adjusting` is `true` while an interactive edit gesture (drag,
/// resize) is in progress. Constraint propagation is suppressed until it
/// transitions back to `false`, at which point the edit is committed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry<T: TimePoint> {
    /// Unique entry identifier (opaque, unique within a model).
    pub id: String,
    /// Parent entry ID. `None` for top-level entries.
    pub parent_id: Option<String>,
    /// Human-readable name.
    pub name: String,
    /// Scheduled time range.
    pub range: Range<T>,
    /// Completion fraction in `[0, 1]`.
    pub completion: f64,
    /// Whether an interactive edit gesture is mid-flight.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_adjusting: bool,
    /// Domain-specific key-value metadata.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, String>,
}

impl<T: TimePoint> Entry<T> {
    /// Creates a new entry with the given ID and range.
    pub fn new(id: impl Into<String>, range: Range<T>) -> Self {
        Self {
            id: id.into(),
            parent_id: None,
            name: String::new(),
            range,
            completion: 0.0,
            is_adjusting: false,
            attributes: HashMap::new(),
        }
    }

    /// Sets the entry name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the parent entry ID.
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Sets the completion fraction, clamped to `[0, 1]`.
    pub fn with_completion(mut self, completion: f64) -> Self {
        self.set_completion(completion);
        self
    }

    /// Adds a domain-specific attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Sets the completion fraction, clamped to `[0, 1]`.
    pub fn set_completion(&mut self, completion: f64) {
        self.completion = completion.clamp(0.0, 1.0);
    }

    /// Whether the entry is fully complete.
    pub fn is_complete(&self) -> bool {
        self.completion >= 1.0
    }

    /// Scheduled duration of this entry.
    pub fn duration(&self) -> T::Span {
        self.range.duration()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_builder() {
        let e = Entry::new("T1", Range::new(0i64, 100))
            .with_name("Design")
            .with_parent("phase-1")
            .with_completion(0.25)
            .with_attribute("owner", "alice");

        assert_eq!(e.id, "T1");
        assert_eq!(e.name, "Design");
        assert_eq!(e.parent_id.as_deref(), Some("phase-1"));
        assert!((e.completion - 0.25).abs() < 1e-12);
        assert_eq!(e.attributes.get("owner"), Some(&"alice".to_string()));
        assert!(!e.is_adjusting);
    }

    #[test]
    fn test_completion_clamped() {
        let mut e = Entry::new("T1", Range::new(0i64, 10));
        e.set_completion(1.7);
        assert!((e.completion - 1.0).abs() < 1e-12);
        assert!(e.is_complete());

        e.set_completion(-0.3);
        assert!((e.completion - 0.0).abs() < 1e-12);
        assert!(!e.is_complete());
    }

    #[test]
    fn test_entry_duration() {
        let e = Entry::new("T1", Range::new(10i64, 45));
        assert_eq!(e.duration(), 35);
    }
}
