//! Namespace partitioning of collected resources

use std::collections::BTreeMap;

use crate::models::{GatherKind, Resource, Scope, TaggedResource};

/// Tagged resources of one kind grouped by namespace ("" for cluster scope)
///
/// Namespaces iterate in sorted order so repeated runs lay out identical
/// trees; items keep their encounter order inside a namespace.
#[derive(Debug, Clone)]
pub struct Bucket {
    kind: GatherKind,
    groups: BTreeMap<String, Vec<TaggedResource>>,
}

impl Bucket {
    pub fn kind(&self) -> GatherKind {
        self.kind
    }

    pub fn groups(&self) -> &BTreeMap<String, Vec<TaggedResource>> {
        &self.groups
    }

    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.values().all(Vec::is_empty)
    }

    /// Total number of items across namespaces
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}

/// Tag and group the items of a `Found` snapshot
///
/// Items of cluster-scoped kinds all land under "".
pub fn bucket(kind: GatherKind, items: &[Resource]) -> Bucket {
    let gvk = kind.gvk();
    let mut groups: BTreeMap<String, Vec<TaggedResource>> = BTreeMap::new();

    for item in items {
        let namespace = match kind.scope() {
            Scope::Cluster => String::new(),
            Scope::Namespaced => item.namespace.clone(),
        };
        groups.entry(namespace).or_default().push(item.tag(&gvk));
    }

    Bucket { kind, groups }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kube::core::DynamicObject;

    fn resource(kind: GatherKind, name: &str, namespace: Option<&str>) -> Resource {
        let object = DynamicObject::new(name, &kind.api_resource());
        let object = match namespace {
            Some(ns) => object.within(ns),
            None => object,
        };
        Resource::from_object(object)
    }

    #[test]
    fn test_cluster_scoped_single_group() {
        let kind = GatherKind::StorageClass;
        let items = vec![resource(kind, "gp3", None), resource(kind, "gp2", None)];
        let bucket = bucket(kind, &items);

        assert_eq!(bucket.namespaces().collect::<Vec<_>>(), vec![""]);
        let names: Vec<_> = bucket.groups()[""].iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["gp3", "gp2"]);
    }

    #[test]
    fn test_namespaced_grouping_keeps_encounter_order() {
        let kind = GatherKind::DataProtectionApplication;
        let items = vec![
            resource(kind, "z-dpa", Some("openshift-adp")),
            resource(kind, "velero", Some("backup")),
            resource(kind, "a-dpa", Some("openshift-adp")),
        ];
        let bucket = bucket(kind, &items);

        assert_eq!(
            bucket.namespaces().collect::<Vec<_>>(),
            vec!["backup", "openshift-adp"]
        );
        let names: Vec<_> = bucket.groups()["openshift-adp"]
            .iter()
            .map(|r| r.name())
            .collect();
        assert_eq!(names, vec!["z-dpa", "a-dpa"]);
        assert_eq!(bucket.len(), 3);
        assert!(!bucket.is_empty());
    }

    #[test]
    fn test_items_are_tagged() {
        let kind = GatherKind::VolumeSnapshotLocation;
        let mut item = resource(kind, "vsl", Some("oadp"));
        item.object.types = None;
        let bucket = bucket(kind, &[item]);

        let tagged = &bucket.groups()["oadp"][0];
        let types = tagged.object().types.clone().unwrap();
        assert_eq!(types.api_version, "velero.io/v1");
        assert_eq!(types.kind, "VolumeSnapshotLocation");
    }

    #[test]
    fn test_empty_input() {
        let bucket = bucket(GatherKind::Node, &[]);
        assert!(bucket.is_empty());
        assert_eq!(bucket.len(), 0);
    }
}
