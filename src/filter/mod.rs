//! Filter engine over an augmented job table.
//!
//! Predicates are built against the table's `Schema` and combined by
//! conjunction into a `View`; the `aggregate` functions summarize any view
//! without touching the table.

pub mod aggregate;
pub mod engine;
pub mod predicate;

pub use engine::{FilterEngine, FilterSpec, View};
pub use predicate::{FlagMode, Predicate};
