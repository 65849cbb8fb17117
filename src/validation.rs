//! Model integrity validation.
//!
//! Checks structural integrity of a chart model, primarily for data
//! arriving from outside (deserialized or imported models, which bypass
//! the insertion-time checks). Detects:
//! - Duplicate entry IDs
//! - Dangling parent links
//! - Dangling relation endpoints
//! - Malformed (negative-duration) ranges
//! - Relation cycles (advisory — cycles are legal but bound propagation
//!   to the visited guard, leaving residual violations)
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (DFS cycle detection)

use std::collections::{HashMap, HashSet};

use crate::models::{ChartModel, TimePoint};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entries share the same ID.
    DuplicateId,
    /// An entry's `parent_id` points to a missing entry.
    DanglingParent,
    /// A relation endpoint points to a missing entry.
    DanglingRelationEndpoint,
    /// An entry's range has `upper < lower`.
    MalformedRange,
    /// The relation graph contains a cycle.
    RelationCycle,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the structural integrity of a model.
///
/// Checks:
/// 1. No duplicate entry IDs
/// 2. All parent links point to existing entries
/// 3. All relation endpoints point to existing entries
/// 4. All entry ranges are well-formed
/// 5. The relation graph is acyclic (advisory, see module docs)
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_model<T: TimePoint>(model: &ChartModel<T>) -> ValidationResult {
    let mut errors = Vec::new();

    let mut entry_ids = HashSet::new();
    for entry in model.entries() {
        if !entry_ids.insert(entry.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate entry ID: {}", entry.id),
            ));
        }
        if !entry.range.is_well_formed() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MalformedRange,
                format!("Entry '{}' has a negative-duration range", entry.id),
            ));
        }
    }

    for entry in model.entries() {
        if let Some(parent_id) = entry.parent_id.as_deref() {
            if !entry_ids.contains(parent_id) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DanglingParent,
                    format!("Entry '{}' references unknown parent '{parent_id}'", entry.id),
                ));
            }
        }
    }

    for relation in model.relations() {
        for id in [&relation.predecessor_id, &relation.successor_id] {
            if !entry_ids.contains(id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DanglingRelationEndpoint,
                    format!(
                        "Relation {} -> {} references unknown entry '{id}'",
                        relation.predecessor_id, relation.successor_id
                    ),
                ));
            }
        }
    }

    if let Some(cycle_err) = detect_relation_cycles(model) {
        errors.push(cycle_err);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Detects cycles in the relation graph using DFS.
///
/// # Algorithm
/// DFS with a recursion stack; a back-edge (an edge into a node still on
/// the stack) proves a cycle.
pub fn detect_relation_cycles<T: TimePoint>(model: &ChartModel<T>) -> Option<ValidationError> {
    // Adjacency list: predecessor → successors.
    let mut adj: HashMap<&str, Vec<&str>> = HashMap::new();
    let mut nodes: HashSet<&str> = HashSet::new();

    for relation in model.relations() {
        nodes.insert(&relation.predecessor_id);
        nodes.insert(&relation.successor_id);
        adj.entry(&relation.predecessor_id)
            .or_default()
            .push(&relation.successor_id);
    }

    let mut visited = HashSet::new();
    let mut in_stack = HashSet::new();

    for &node in &nodes {
        if !visited.contains(node) && has_cycle_dfs(node, &adj, &mut visited, &mut in_stack) {
            return Some(ValidationError::new(
                ValidationErrorKind::RelationCycle,
                format!("Relation cycle detected involving entry '{node}'"),
            ));
        }
    }

    None
}

fn has_cycle_dfs<'a>(
    node: &'a str,
    adj: &HashMap<&'a str, Vec<&'a str>>,
    visited: &mut HashSet<&'a str>,
    in_stack: &mut HashSet<&'a str>,
) -> bool {
    visited.insert(node);
    in_stack.insert(node);

    if let Some(successors) = adj.get(node) {
        for &next in successors {
            if in_stack.contains(next) {
                return true; // Back edge → cycle
            }
            if !visited.contains(next) && has_cycle_dfs(next, adj, visited, in_stack) {
                return true;
            }
        }
    }

    in_stack.remove(node);
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Entry, Range, Relation, RelationKind};

    fn sample_model() -> ChartModel<i64> {
        let mut m = ChartModel::new();
        m.add_entry(Entry::new("A", Range::new(0, 10))).unwrap();
        m.add_entry(Entry::new("B", Range::new(10, 20))).unwrap();
        m.add_entry(Entry::new("B1", Range::new(10, 15)).with_parent("B"))
            .unwrap();
        m.add_relation(Relation::new("A", "B", RelationKind::FinishToStart))
            .unwrap();
        m
    }

    #[test]
    fn test_valid_model() {
        assert!(validate_model(&sample_model()).is_ok());
    }

    #[test]
    fn test_duplicate_entry_id() {
        // Duplicates can only arrive via deserialization.
        let json = r#"{
            "entries": [
                {"id": "A", "parent_id": null, "name": "", "range": {"lower": 0, "upper": 10}, "completion": 0.0},
                {"id": "A", "parent_id": null, "name": "", "range": {"lower": 5, "upper": 15}, "completion": 0.0}
            ],
            "relations": []
        }"#;
        let m: ChartModel<i64> = serde_json::from_str(json).unwrap();

        let errors = validate_model(&m).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId));
    }

    #[test]
    fn test_dangling_parent() {
        let mut m = sample_model();
        m.add_entry(Entry::new("orphan", Range::new(0, 5)).with_parent("GHOST"))
            .unwrap();

        let errors = validate_model(&m).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DanglingParent));
    }

    #[test]
    fn test_dangling_parent_after_remove() {
        let mut m = sample_model();
        m.remove_entry("B").unwrap(); // B1's parent link now dangles

        let errors = validate_model(&m).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DanglingParent
                && e.message.contains("B1")));
    }

    #[test]
    fn test_dangling_relation_endpoint() {
        let json = r#"{
            "entries": [
                {"id": "A", "parent_id": null, "name": "", "range": {"lower": 0, "upper": 10}, "completion": 0.0}
            ],
            "relations": [
                {"predecessor_id": "A", "successor_id": "GHOST", "kind": "FinishToStart"}
            ]
        }"#;
        let m: ChartModel<i64> = serde_json::from_str(json).unwrap();

        let errors = validate_model(&m).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DanglingRelationEndpoint));
    }

    #[test]
    fn test_malformed_range() {
        let mut m = sample_model();
        m.add_entry(Entry::new("bad", Range::new(10, 3))).unwrap();

        let errors = validate_model(&m).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::MalformedRange));
    }

    #[test]
    fn test_relation_cycle_detected() {
        // A → B → C → A
        let mut m = sample_model();
        m.add_entry(Entry::new("C", Range::new(20, 30))).unwrap();
        m.add_relation(Relation::new("B", "C", RelationKind::FinishToStart))
            .unwrap();
        m.add_relation(Relation::new("C", "A", RelationKind::FinishToStart))
            .unwrap();

        let errors = validate_model(&m).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::RelationCycle));
    }

    #[test]
    fn test_no_cycle_in_chain() {
        let mut m = sample_model();
        m.add_entry(Entry::new("C", Range::new(20, 30))).unwrap();
        m.add_relation(Relation::new("B", "C", RelationKind::StartToStart))
            .unwrap();

        assert!(detect_relation_cycles(&m).is_none());
    }

    #[test]
    fn test_multiple_errors() {
        let mut m = sample_model();
        m.add_entry(Entry::new("bad", Range::new(10, 3)).with_parent("GHOST"))
            .unwrap();

        let errors = validate_model(&m).unwrap_err();
        assert!(errors.len() >= 2);
    }
}
