//! Collection layer
//!
//! Turns typed cluster queries into `Snapshot`s. Nothing here touches the
//! filesystem or the report.

mod collector;
mod query;
mod snapshot;

pub use collector::{Collector, DEADLINE_EXCEEDED, NOT_ISSUED};
pub use query::ResourceQuery;
pub use snapshot::Snapshot;

#[cfg(test)]
pub use query::MockResourceQuery;
