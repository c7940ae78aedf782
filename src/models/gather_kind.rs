//! Gathered resource kind definitions
//!
//! This module provides a centralized enum for every resource kind the
//! must-gather collects. Group, version, plural, scope and reporting policy
//! live here so no other module hardcodes API coordinates.

use kube::core::ApiResource;
use std::fmt;
use std::str::FromStr;

use super::gvk::Gvk;

/// Whether a kind lives at cluster scope or inside namespaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Cluster,
    Namespaced,
}

/// How an empty (successful, zero item) collection is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyPolicy {
    /// Nothing to warn about, the kind is optional
    Silent,
    /// The kind is expected to exist, emptiness is reported as a warning
    Warn,
}

/// Enumeration of all gathered resource kinds, in report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GatherKind {
    // Cluster identity and infrastructure
    ClusterVersion,
    Infrastructure,
    Node,
    // Operator Lifecycle Manager
    ClusterServiceVersion,
    // OADP operator
    DataProtectionApplication,
    // Velero
    BackupStorageLocation,
    VolumeSnapshotLocation,
    // Storage
    StorageClass,
    // API extensions
    CustomResourceDefinition,
}

impl GatherKind {
    /// Get the kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            GatherKind::ClusterVersion => "ClusterVersion",
            GatherKind::Infrastructure => "Infrastructure",
            GatherKind::Node => "Node",
            GatherKind::ClusterServiceVersion => "ClusterServiceVersion",
            GatherKind::DataProtectionApplication => "DataProtectionApplication",
            GatherKind::BackupStorageLocation => "BackupStorageLocation",
            GatherKind::VolumeSnapshotLocation => "VolumeSnapshotLocation",
            GatherKind::StorageClass => "StorageClass",
            GatherKind::CustomResourceDefinition => "CustomResourceDefinition",
        }
    }

    /// API group, empty for the core group
    pub fn group(&self) -> &'static str {
        match self {
            GatherKind::ClusterVersion | GatherKind::Infrastructure => "config.openshift.io",
            GatherKind::Node => "",
            GatherKind::ClusterServiceVersion => "operators.coreos.com",
            GatherKind::DataProtectionApplication => "oadp.openshift.io",
            GatherKind::BackupStorageLocation | GatherKind::VolumeSnapshotLocation => "velero.io",
            GatherKind::StorageClass => "storage.k8s.io",
            GatherKind::CustomResourceDefinition => "apiextensions.k8s.io",
        }
    }

    /// API version queried for this kind
    pub fn version(&self) -> &'static str {
        match self {
            GatherKind::ClusterServiceVersion | GatherKind::DataProtectionApplication => {
                "v1alpha1"
            }
            _ => "v1",
        }
    }

    /// Plural resource name (CRD `spec.names.plural`)
    pub fn plural(&self) -> &'static str {
        match self {
            GatherKind::ClusterVersion => "clusterversions",
            GatherKind::Infrastructure => "infrastructures",
            GatherKind::Node => "nodes",
            GatherKind::ClusterServiceVersion => "clusterserviceversions",
            GatherKind::DataProtectionApplication => "dataprotectionapplications",
            GatherKind::BackupStorageLocation => "backupstoragelocations",
            GatherKind::VolumeSnapshotLocation => "volumesnapshotlocations",
            GatherKind::StorageClass => "storageclasses",
            GatherKind::CustomResourceDefinition => "customresourcedefinitions",
        }
    }

    pub fn scope(&self) -> Scope {
        match self {
            GatherKind::ClusterServiceVersion
            | GatherKind::DataProtectionApplication
            | GatherKind::BackupStorageLocation
            | GatherKind::VolumeSnapshotLocation => Scope::Namespaced,
            _ => Scope::Cluster,
        }
    }

    /// Kinds whose failure makes the rest of the report meaningless
    pub fn is_foundational(&self) -> bool {
        matches!(
            self,
            GatherKind::ClusterVersion | GatherKind::Infrastructure | GatherKind::Node
        )
    }

    pub fn empty_policy(&self) -> EmptyPolicy {
        match self {
            GatherKind::BackupStorageLocation | GatherKind::VolumeSnapshotLocation => {
                EmptyPolicy::Silent
            }
            _ => EmptyPolicy::Warn,
        }
    }

    /// Whether this kind is served by a CustomResourceDefinition we track
    pub fn is_custom(&self) -> bool {
        matches!(
            self,
            GatherKind::ClusterServiceVersion
                | GatherKind::DataProtectionApplication
                | GatherKind::BackupStorageLocation
                | GatherKind::VolumeSnapshotLocation
        )
    }

    /// Name of the CustomResourceDefinition backing this kind, if tracked
    pub fn crd_name(&self) -> Option<String> {
        self.is_custom()
            .then(|| format!("{}.{}", self.plural(), self.group()))
    }

    /// Names of every tracked CustomResourceDefinition, in catalogue order
    pub fn tracked_crd_names() -> Vec<String> {
        Self::all().iter().filter_map(|kind| kind.crd_name()).collect()
    }

    pub fn gvk(&self) -> Gvk {
        Gvk::new(self.group(), self.version(), self.as_str())
    }

    /// Build the kube-rs ApiResource used for dynamic queries
    pub fn api_resource(&self) -> ApiResource {
        ApiResource {
            group: self.group().to_string(),
            version: self.version().to_string(),
            api_version: self.gvk().api_version(),
            kind: self.as_str().to_string(),
            plural: self.plural().to_string(),
        }
    }

    /// Get all gathered kinds in report order
    pub fn all() -> &'static [Self] {
        &[
            GatherKind::ClusterVersion,
            GatherKind::Infrastructure,
            GatherKind::Node,
            GatherKind::ClusterServiceVersion,
            GatherKind::DataProtectionApplication,
            GatherKind::BackupStorageLocation,
            GatherKind::VolumeSnapshotLocation,
            GatherKind::StorageClass,
            GatherKind::CustomResourceDefinition,
        ]
    }

    pub fn foundational() -> Vec<Self> {
        Self::all()
            .iter()
            .copied()
            .filter(|kind| kind.is_foundational())
            .collect()
    }

    pub fn non_foundational() -> Vec<Self> {
        Self::all()
            .iter()
            .copied()
            .filter(|kind| !kind.is_foundational())
            .collect()
    }
}

impl fmt::Display for GatherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GatherKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GatherKind::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("Unknown gathered resource kind: {}", s))
    }
}
