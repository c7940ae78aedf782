//! Artifact layer
//!
//! Buckets collected resources by namespace, tags them with their type
//! identity and writes them into the must-gather tree.

mod bucket;
mod document;
pub mod layout;
mod writer;

pub use bucket::{Bucket, bucket};
pub use document::encode_list;
pub use layout::ArtifactPath;
pub use writer::{ArtifactWriter, WriteResult, write_atomic};
