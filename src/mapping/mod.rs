//! Sort-field mapping: translates client-facing `orderBy` keys into storage field names.
//!
//! A [`MappingRegistry`] is built once at start-up (see [`default_registry`]) and shared
//! read-only through the application state. Handlers resolve the table for their
//! (source, destination) shape pair and translate the raw `orderBy` string into
//! [`SortClause`]s for the repository.

mod defaults;
mod registry;
mod sort;

pub use defaults::{default_registry, REQUIRED_PAIRS};
pub use registry::{MappingEntry, MappingError, MappingRegistry, MappingTable, Shape, ShapePair};
pub use sort::{parse_order_by, SortClause, SortDirection, SortToken};
