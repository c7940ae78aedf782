//! Shared fixtures for pipeline tests
//!
//! `FixtureQuery` serves canned objects per kind, so the whole run can be
//! driven without a cluster.

#![allow(dead_code)]

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use kube::core::DynamicObject;
use serde_json::{Value, json};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::time::Duration;

use oadp_must_gather::{GatherConfig, GatherKind, ResourceQuery};

pub const CLUSTER_ID: &str = "0a1b2c3d-4e5f-6789-abcd-ef0123456789";
pub const CLUSTER_ID_SHORT: &str = "0a1b2c3d";

#[derive(Debug, Clone, Default)]
pub struct FixtureQuery {
    objects: HashMap<GatherKind, Vec<DynamicObject>>,
    failures: HashMap<GatherKind, String>,
    stalled: HashSet<GatherKind>,
}

impl FixtureQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, kind: GatherKind, objects: Vec<DynamicObject>) -> Self {
        self.objects.entry(kind).or_default().extend(objects);
        self
    }

    pub fn without(mut self, kind: GatherKind) -> Self {
        self.objects.remove(&kind);
        self
    }

    pub fn failing(mut self, kind: GatherKind, cause: &str) -> Self {
        self.failures.insert(kind, cause.to_string());
        self
    }

    /// Queries for `kind` never answer
    pub fn stalled(mut self, kind: GatherKind) -> Self {
        self.stalled.insert(kind);
        self
    }

    /// A cluster where every section renders without warnings
    pub fn healthy_cluster() -> Self {
        Self::new()
            .with(
                GatherKind::ClusterVersion,
                vec![cluster_version(CLUSTER_ID, "4.16.3")],
            )
            .with(GatherKind::Infrastructure, vec![infrastructure("AWS")])
            .with(
                GatherKind::Node,
                vec![
                    node("master-0", "amd64"),
                    node("worker-0", "amd64"),
                    node("worker-1", "arm64"),
                ],
            )
            .with(
                GatherKind::ClusterServiceVersion,
                vec![
                    csv("oadp-operator.v1.4.1", "openshift-adp", "OADP Operator", "1.4.1"),
                    csv(
                        "kubevirt-hyperconverged-operator.v4.16.0",
                        "openshift-cnv",
                        "OpenShift Virtualization",
                        "4.16.0",
                    ),
                    csv("cert-manager.v1.14.0", "cert-manager", "cert-manager", "1.14.0"),
                ],
            )
            .with(
                GatherKind::DataProtectionApplication,
                vec![dpa(
                    "velero-sample",
                    "openshift-adp",
                    json!([{ "type": "Reconciled", "status": "True" }]),
                )],
            )
            .with(
                GatherKind::BackupStorageLocation,
                vec![location(
                    GatherKind::BackupStorageLocation,
                    "velero-sample-1",
                    "openshift-adp",
                    "aws",
                    "Available",
                )],
            )
            .with(
                GatherKind::VolumeSnapshotLocation,
                vec![location(
                    GatherKind::VolumeSnapshotLocation,
                    "velero-sample-1",
                    "openshift-adp",
                    "aws",
                    "Available",
                )],
            )
            .with(
                GatherKind::StorageClass,
                vec![
                    storage_class("gp3-csi", "ebs.csi.aws.com", true),
                    storage_class("gp2-csi", "ebs.csi.aws.com", false),
                ],
            )
            .with(
                GatherKind::CustomResourceDefinition,
                GatherKind::tracked_crd_names()
                    .iter()
                    .map(|name| crd(name))
                    .collect(),
            )
    }
}

#[async_trait]
impl ResourceQuery for FixtureQuery {
    async fn list(&self, kind: GatherKind) -> Result<Vec<DynamicObject>> {
        self.answer(kind).await?;
        Ok(self.objects.get(&kind).cloned().unwrap_or_default())
    }

    async fn get(&self, kind: GatherKind, name: &str) -> Result<Option<DynamicObject>> {
        self.answer(kind).await?;
        Ok(self
            .objects
            .get(&kind)
            .and_then(|objects| {
                objects
                    .iter()
                    .find(|object| object.metadata.name.as_deref() == Some(name))
            })
            .cloned())
    }
}

impl FixtureQuery {
    async fn answer(&self, kind: GatherKind) -> Result<()> {
        if self.stalled.contains(&kind) {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        match self.failures.get(&kind) {
            Some(cause) => Err(anyhow!("{}", cause)),
            None => Ok(()),
        }
    }
}

pub fn object(kind: GatherKind, name: &str, namespace: Option<&str>, data: Value) -> DynamicObject {
    let object = DynamicObject::new(name, &kind.api_resource()).data(data);
    match namespace {
        Some(ns) => object.within(ns),
        None => object,
    }
}

pub fn cluster_version(cluster_id: &str, version: &str) -> DynamicObject {
    object(
        GatherKind::ClusterVersion,
        "version",
        None,
        json!({
            "spec": { "clusterID": cluster_id, "channel": "stable-4.16" },
            "status": { "desired": { "version": version } }
        }),
    )
}

pub fn infrastructure(platform: &str) -> DynamicObject {
    object(
        GatherKind::Infrastructure,
        "cluster",
        None,
        json!({ "spec": { "platformSpec": { "type": platform } } }),
    )
}

pub fn node(name: &str, arch: &str) -> DynamicObject {
    object(
        GatherKind::Node,
        name,
        None,
        json!({ "status": { "nodeInfo": { "operatingSystem": "linux", "architecture": arch } } }),
    )
}

pub fn csv(name: &str, namespace: &str, display_name: &str, version: &str) -> DynamicObject {
    object(
        GatherKind::ClusterServiceVersion,
        name,
        Some(namespace),
        json!({ "spec": { "displayName": display_name, "version": version } }),
    )
}

pub fn dpa(name: &str, namespace: &str, conditions: Value) -> DynamicObject {
    object(
        GatherKind::DataProtectionApplication,
        name,
        Some(namespace),
        json!({
            "spec": { "configuration": { "velero": { "defaultPlugins": ["aws", "openshift"] } } },
            "status": { "conditions": conditions }
        }),
    )
}

pub fn location(
    kind: GatherKind,
    name: &str,
    namespace: &str,
    provider: &str,
    phase: &str,
) -> DynamicObject {
    object(
        kind,
        name,
        Some(namespace),
        json!({ "spec": { "provider": provider }, "status": { "phase": phase } }),
    )
}

pub fn storage_class(name: &str, provisioner: &str, default: bool) -> DynamicObject {
    let mut object = object(
        GatherKind::StorageClass,
        name,
        None,
        json!({ "provisioner": provisioner, "reclaimPolicy": "Delete" }),
    );
    if default {
        object.metadata.annotations = Some(BTreeMap::from([(
            "storageclass.kubernetes.io/is-default-class".to_string(),
            "true".to_string(),
        )]));
    }
    object
}

pub fn crd(name: &str) -> DynamicObject {
    object(
        GatherKind::CustomResourceDefinition,
        name,
        None,
        json!({ "spec": { "versions": [{ "name": "v1", "served": true, "storage": true }] } }),
    )
}

pub fn config(output_dir: &Path) -> GatherConfig {
    GatherConfig {
        output_dir: output_dir.to_path_buf(),
        must_gather_version: "test".to_string(),
        ..Default::default()
    }
}

/// Every file under `root`, keyed by its `/`-separated relative path
pub fn read_tree(root: &Path) -> BTreeMap<String, Vec<u8>> {
    fn walk(root: &Path, dir: &Path, files: &mut BTreeMap<String, Vec<u8>>) {
        for entry in std::fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                walk(root, &path, files);
            } else {
                let relative = path
                    .strip_prefix(root)
                    .unwrap()
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect::<Vec<_>>()
                    .join("/");
                files.insert(relative, std::fs::read(&path).unwrap());
            }
        }
    }

    let mut files = BTreeMap::new();
    walk(root, root, &mut files);
    files
}

pub fn cluster_dir(output_dir: &Path) -> PathBuf {
    output_dir.join("clusters").join(CLUSTER_ID_SHORT)
}

pub fn read_yaml(path: &Path) -> serde_yaml::Value {
    serde_yaml::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}
