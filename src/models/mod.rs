//! Must-gather model layer
//!
//! Structure:
//! - `gather_kind.rs` - Catalogue of gathered kinds and their policies
//! - `gvk.rs` - Group/version/kind identity
//! - `resource.rs` - Collected objects and their tagged serialized form

pub mod gather_kind;
pub mod gvk;
pub mod resource;

pub use gather_kind::{EmptyPolicy, GatherKind, Scope};
pub use gvk::Gvk;
pub use resource::{Resource, TaggedResource};
