//! must-gather directory layout
//!
//! The tree shape is parsed by downstream tooling (`omg` and friends), so
//! paths are only ever built here:
//!
//! ```text
//! <output>/clusters/<id8>/
//!   cluster-scoped-resources/<api-group>/<plural>/<plural>.yaml
//!   namespaces/<ns>/<api-group>/<plural>/<plural>.yaml
//!   oadp-must-gather-summary.md
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use crate::models::GatherKind;

pub const CLUSTERS_DIR: &str = "clusters";
pub const CLUSTER_SCOPED_DIR: &str = "cluster-scoped-resources";
pub const NAMESPACES_DIR: &str = "namespaces";
pub const SUMMARY_FILE: &str = "oadp-must-gather-summary.md";

/// Length of the cluster ID prefix used as directory name
pub const CLUSTER_ID_LEN: usize = 8;

/// Per-cluster root directory under the output directory
pub fn cluster_root(output_dir: &Path, cluster_id: &str) -> PathBuf {
    output_dir.join(CLUSTERS_DIR).join(cluster_id)
}

/// A `/`-separated path relative to the per-cluster root
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArtifactPath(String);

impl ArtifactPath {
    /// Directory holding the artifacts of `kind` for `namespace` ("" for cluster scope)
    pub fn dir_for(kind: GatherKind, namespace: &str) -> Self {
        let gvk = kind.gvk();
        if namespace.is_empty() {
            Self(format!(
                "{}/{}/{}",
                CLUSTER_SCOPED_DIR,
                gvk.group_dir(),
                kind.plural()
            ))
        } else {
            Self(format!(
                "{}/{}/{}/{}",
                NAMESPACES_DIR,
                namespace,
                gvk.group_dir(),
                kind.plural()
            ))
        }
    }

    /// The list document of `kind` for `namespace`
    pub fn file_for(kind: GatherKind, namespace: &str) -> Self {
        Self::dir_for(kind, namespace).join(&format!("{}.yaml", kind.plural()))
    }

    pub fn join(&self, segment: &str) -> Self {
        Self(format!("{}/{}", self.0, segment))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Absolute location under `root`
    pub fn resolve(&self, root: &Path) -> PathBuf {
        self.0
            .split('/')
            .fold(root.to_path_buf(), |path, segment| path.join(segment))
    }
}

impl fmt::Display for ArtifactPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cluster_scoped_paths() {
        assert_eq!(
            ArtifactPath::file_for(GatherKind::StorageClass, "").as_str(),
            "cluster-scoped-resources/storage.k8s.io/storageclasses/storageclasses.yaml"
        );
        assert_eq!(
            ArtifactPath::file_for(GatherKind::Node, "").as_str(),
            "cluster-scoped-resources/core/nodes/nodes.yaml"
        );
    }

    #[test]
    fn test_namespaced_paths() {
        assert_eq!(
            ArtifactPath::file_for(GatherKind::DataProtectionApplication, "openshift-adp").as_str(),
            "namespaces/openshift-adp/oadp.openshift.io/dataprotectionapplications/dataprotectionapplications.yaml"
        );
        assert_eq!(
            ArtifactPath::dir_for(GatherKind::ClusterServiceVersion, "openshift-adp").as_str(),
            "namespaces/openshift-adp/operators.coreos.com/clusterserviceversions"
        );
    }

    #[test]
    fn test_resolve() {
        let path = ArtifactPath::file_for(GatherKind::BackupStorageLocation, "oadp");

        let root = Path::new("/tmp/must-gather/clusters/abcdef12");
        assert_eq!(
            path.resolve(root),
            root.join("namespaces")
                .join("oadp")
                .join("velero.io")
                .join("backupstoragelocations")
                .join("backupstoragelocations.yaml")
        );
    }

    #[test]
    fn test_cluster_root() {
        assert_eq!(
            cluster_root(Path::new("must-gather"), "0a1b2c3d"),
            Path::new("must-gather/clusters/0a1b2c3d")
        );
    }
}
