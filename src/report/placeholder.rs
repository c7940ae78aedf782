use std::fmt;
use std::str::FromStr;

/// Named sections of the summary template
///
/// This is the closed set of keys the report is built from. Adding a variant
/// without a matching `<<KEY>>` token in the template fails rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Placeholder {
    MustGatherVersion,
    Errors,
    ClusterId,
    OcpVersion,
    Cloud,
    Arch,
    ClusterVersion,
    OadpVersions,
    DataProtectionApplications,
    BackupStorageLocations,
    VolumeSnapshotLocations,
    StorageClasses,
    CustomResourceDefinition,
}

impl Placeholder {
    /// Every key, in template order
    pub const ALL: [Placeholder; 13] = [
        Placeholder::MustGatherVersion,
        Placeholder::Errors,
        Placeholder::ClusterId,
        Placeholder::OcpVersion,
        Placeholder::Cloud,
        Placeholder::Arch,
        Placeholder::ClusterVersion,
        Placeholder::OadpVersions,
        Placeholder::DataProtectionApplications,
        Placeholder::BackupStorageLocations,
        Placeholder::VolumeSnapshotLocations,
        Placeholder::StorageClasses,
        Placeholder::CustomResourceDefinition,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Placeholder::MustGatherVersion => "MUST_GATHER_VERSION",
            Placeholder::Errors => "ERRORS",
            Placeholder::ClusterId => "CLUSTER_ID",
            Placeholder::OcpVersion => "OCP_VERSION",
            Placeholder::Cloud => "CLOUD",
            Placeholder::Arch => "ARCH",
            Placeholder::ClusterVersion => "CLUSTER_VERSION",
            Placeholder::OadpVersions => "OADP_VERSIONS",
            Placeholder::DataProtectionApplications => "DATA_PROTECTION_APPLICATIONS",
            Placeholder::BackupStorageLocations => "BACKUP_STORAGE_LOCATIONS",
            Placeholder::VolumeSnapshotLocations => "VOLUME_SNAPSHOT_LOCATIONS",
            Placeholder::StorageClasses => "STORAGE_CLASSES",
            Placeholder::CustomResourceDefinition => "CUSTOM_RESOURCE_DEFINITION",
        }
    }

    /// Literal token as it appears in the template
    pub fn token(&self) -> String {
        format!("<<{}>>", self.key())
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Placeholder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|placeholder| placeholder.key() == s)
            .ok_or_else(|| format!("Unknown placeholder: {}", s))
    }
}
