//! Task-dependency constraint engine for Gantt-style chart models.
//!
//! Maintains temporal ordering invariants between related entries
//! (predecessor/successor pairs with one of the four precedence kinds)
//! and, depending on the configured policy, either rejects violating
//! edits or automatically reschedules entries to restore consistency,
//! cascading fixes through child entries and transitive relations.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Range`, `Entry`, `Relation`,
//!   `RelationKind`, `ChartModel`
//! - **`enforcement`**: The two policies — notify-and-block vs.
//!   silent auto-correct
//! - **`propagation`**: The coordinator driving enforcement passes on
//!   committed edits, model load, and relation insertion
//! - **`validation`**: Integrity checks for externally supplied models
//! - **`error`**: Structural mutation errors
//!
//! # Concurrency
//!
//! Single-threaded, call-and-return: propagation runs on the thread that
//! committed the edit. Callers must not re-enter mutation entry points
//! from within the `on_entry_changed` callback.
//!
//! # Example
//!
//! ```
//! use gantt_engine::enforcement::EnforcementMode;
//! use gantt_engine::models::{ChartModel, Entry, Range, Relation, RelationKind};
//! use gantt_engine::propagation::PropagationCoordinator;
//!
//! let mut model = ChartModel::new();
//! model.add_entry(Entry::new("design", Range::new(0i64, 10))).unwrap();
//! model.add_entry(Entry::new("build", Range::new(5i64, 20))).unwrap();
//!
//! let mut coordinator = PropagationCoordinator::new(EnforcementMode::AutoCorrect);
//! coordinator
//!     .relation_added(
//!         &mut model,
//!         Relation::new("design", "build", RelationKind::FinishToStart),
//!     )
//!     .unwrap();
//!
//! // "build" was rolled forward to start when "design" finishes.
//! assert_eq!(model.entry("build").unwrap().range, Range::new(10, 25));
//! ```

pub mod enforcement;
pub mod error;
pub mod models;
pub mod propagation;
pub mod validation;
