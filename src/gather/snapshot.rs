//! Outcome of one collection attempt

use super::collector::{DEADLINE_EXCEEDED, NOT_ISSUED};
use crate::models::Resource;

/// Result of collecting one resource kind
#[derive(Debug, Clone)]
pub enum Snapshot {
    /// Query succeeded with at least one item, in API order
    Found(Vec<Resource>),
    /// Query succeeded with zero items
    Empty,
    /// Query could not be made or failed
    Error(String),
}

impl Snapshot {
    pub fn from_items(items: Vec<Resource>) -> Self {
        if items.is_empty() {
            Snapshot::Empty
        } else {
            Snapshot::Found(items)
        }
    }

    /// Items of a `Found` snapshot
    pub fn items(&self) -> Option<&[Resource]> {
        match self {
            Snapshot::Found(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Snapshot::Found(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Snapshot::Error(cause) => Some(cause),
            _ => None,
        }
    }

    /// Whether the run deadline, rather than the API, ended this attempt
    pub fn cut_by_deadline(&self) -> bool {
        matches!(self.error(), Some(cause) if cause == NOT_ISSUED || cause == DEADLINE_EXCEEDED)
    }

    /// Short label for logging
    pub fn label(&self) -> String {
        match self {
            Snapshot::Found(items) => format!("found {}", items.len()),
            Snapshot::Empty => "empty".to_string(),
            Snapshot::Error(cause) => format!("error: {}", cause),
        }
    }
}
