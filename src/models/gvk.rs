//! Group/version/kind identity attached to serialized objects

use std::fmt;

/// Directory name used on disk for the core (empty) API group
pub const CORE_GROUP_DIR: &str = "core";

/// Canonical type identity of a Kubernetes object
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Gvk {
    pub group: String,
    pub version: String,
    pub kind: String,
}

impl Gvk {
    pub fn new(group: &str, version: &str, kind: &str) -> Self {
        Self {
            group: group.to_string(),
            version: version.to_string(),
            kind: kind.to_string(),
        }
    }

    /// The `v1` `List` envelope used for serialized collections
    pub fn list() -> Self {
        Self::new("", "v1", "List")
    }

    /// `apiVersion` field value: `group/version`, or just `version` for core
    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.clone()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }

    /// Group directory in the must-gather layout
    pub fn group_dir(&self) -> &str {
        if self.group.is_empty() {
            CORE_GROUP_DIR
        } else {
            &self.group
        }
    }
}

impl fmt::Display for Gvk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, Kind={}", self.api_version(), self.kind)
    }
}
