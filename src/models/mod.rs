//! Chart domain models.
//!
//! Core data types for the constraint engine: time [`Range`]s over a
//! pluggable [`TimePoint`] domain, schedulable [`Entry`]s with hierarchy,
//! typed [`Relation`]s between them, and the owning [`ChartModel`].
//!
//! # Domain Mappings
//!
//! | gantt-engine | Project chart | Resource chart |
//! |--------------|---------------|----------------|
//! | Entry | Task bar | Allocation bar |
//! | Relation | Dependency arrow | — |
//! | Range | Task span | Booking span |

mod entry;
mod model;
mod range;
mod relation;

pub use entry::Entry;
pub use model::ChartModel;
pub use range::{Range, TimePoint};
pub use relation::{Relation, RelationKind};
