//! Section builders
//!
//! Each builder reads one or more snapshots, writes the matching artifacts
//! through an `ArtifactWriter` and sets Markdown text on the accumulator.
//! Kinds whose section is a plain "one line per item plus artifact link"
//! listing are described by a [`SectionRule`] in [`RULES`]; cluster
//! information and operator installation have their own builders.

use std::collections::BTreeMap;

use super::accumulator::{ERROR_MARKER, ReportAccumulator, WARNING_MARKER};
use super::placeholder::Placeholder;
use crate::artifacts::{ArtifactWriter, Bucket, WriteResult, bucket};
use crate::gather::Snapshot;
use crate::models::{EmptyPolicy, GatherKind, Resource, Scope};

/// Display name shared by the downstream, community and dev OADP operators
pub const PRIMARY_PRODUCT: &str = "OADP Operator";

pub const RELATED_PRODUCTS: &[&str] = &[
    "OpenShift Virtualization",
    "Advanced Cluster Management for Kubernetes",
    "Submariner",
];

/// Related products shipped from community catalogs
pub const COMMUNITY_PRODUCTS: &[&str] = &["KubeVirt HyperConverged Cluster Operator"];

pub const DEFAULT_CLASS_ANNOTATION: &str = "storageclass.kubernetes.io/is-default-class";

/// Something about an item that belongs in the `ERRORS` section
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    Warning(String),
    Error(String),
}

/// Narrative line for one item plus what it should log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemReport {
    pub line: String,
    pub findings: Vec<Finding>,
}

impl ItemReport {
    fn healthy(line: String) -> Self {
        Self {
            line,
            findings: Vec::new(),
        }
    }
}

/// How the snapshot of one kind is turned into a section
pub struct SectionRule {
    pub kind: GatherKind,
    pub placeholder: Placeholder,
    pub describe: fn(&Resource) -> ItemReport,
}

const DATA_PROTECTION_APPLICATION_RULE: SectionRule = SectionRule {
    kind: GatherKind::DataProtectionApplication,
    placeholder: Placeholder::DataProtectionApplications,
    describe: describe_data_protection_application,
};

const BACKUP_STORAGE_LOCATION_RULE: SectionRule = SectionRule {
    kind: GatherKind::BackupStorageLocation,
    placeholder: Placeholder::BackupStorageLocations,
    describe: describe_backup_storage_location,
};

const VOLUME_SNAPSHOT_LOCATION_RULE: SectionRule = SectionRule {
    kind: GatherKind::VolumeSnapshotLocation,
    placeholder: Placeholder::VolumeSnapshotLocations,
    describe: describe_volume_snapshot_location,
};

const STORAGE_CLASS_RULE: SectionRule = SectionRule {
    kind: GatherKind::StorageClass,
    placeholder: Placeholder::StorageClasses,
    describe: describe_storage_class,
};

const CUSTOM_RESOURCE_DEFINITION_RULE: SectionRule = SectionRule {
    kind: GatherKind::CustomResourceDefinition,
    placeholder: Placeholder::CustomResourceDefinition,
    describe: describe_custom_resource_definition,
};

/// Rule table, in report order
pub const RULES: &[SectionRule] = &[
    DATA_PROTECTION_APPLICATION_RULE,
    BACKUP_STORAGE_LOCATION_RULE,
    VOLUME_SNAPSHOT_LOCATION_RULE,
    STORAGE_CLASS_RULE,
    CUSTOM_RESOURCE_DEFINITION_RULE,
];

pub fn rule_for(kind: GatherKind) -> Option<&'static SectionRule> {
    RULES.iter().find(|rule| rule.kind == kind)
}

impl SectionRule {
    /// Narrative for a query that succeeded with no items
    pub fn not_found(&self) -> String {
        format!("No {} was found in the cluster", self.kind)
    }

    /// Lines for `snapshot`, writing artifacts and logging findings on the way
    pub fn render(
        &self,
        snapshot: &Snapshot,
        writer: &ArtifactWriter,
        acc: &mut ReportAccumulator,
    ) -> Vec<String> {
        match snapshot {
            Snapshot::Found(items) => {
                let mut references = write_bucket(&bucket(self.kind, items), writer, acc);
                let mut lines = Vec::new();
                for (namespace, group) in partition(self.kind, items) {
                    for item in group {
                        let report = (self.describe)(item);
                        for finding in report.findings {
                            match finding {
                                Finding::Warning(text) => acc.append_warning(text),
                                Finding::Error(text) => acc.append_error(text),
                            }
                        }
                        lines.push(report.line);
                    }
                    if let Some(reference) = references.remove(namespace) {
                        lines.push(reference);
                    }
                }
                lines
            }
            Snapshot::Empty => match self.kind.empty_policy() {
                EmptyPolicy::Silent => vec![self.not_found()],
                EmptyPolicy::Warn => {
                    acc.append_warning(self.not_found());
                    vec![format!("{} {}", ERROR_MARKER, self.not_found())]
                }
            },
            Snapshot::Error(cause) => {
                let text = unable_to_collect(self.kind, cause);
                acc.append_warning(&text);
                vec![format!("{} {}", ERROR_MARKER, text)]
            }
        }
    }
}

/// Build every section from the collected snapshots, in catalogue order
///
/// Kinds without a snapshot leave their sections unset.
pub fn build_sections(
    cluster_id: &str,
    snapshots: &BTreeMap<GatherKind, Snapshot>,
    writer: &ArtifactWriter,
    acc: &mut ReportAccumulator,
) {
    acc.set_section(Placeholder::ClusterId, cluster_id);

    match (
        snapshots.get(&GatherKind::ClusterVersion),
        snapshots.get(&GatherKind::Infrastructure),
        snapshots.get(&GatherKind::Node),
    ) {
        (Some(cluster_version), Some(infrastructure), Some(nodes)) => {
            build_cluster_info(cluster_version, infrastructure, nodes, writer, acc)
        }
        _ => tracing::warn!("Cluster information incomplete, skipping section"),
    }

    for kind in GatherKind::non_foundational() {
        let Some(snapshot) = snapshots.get(&kind) else {
            tracing::debug!("No snapshot for {}", kind);
            continue;
        };
        match kind {
            GatherKind::ClusterServiceVersion => build_installation(snapshot, writer, acc),
            GatherKind::CustomResourceDefinition => {
                build_custom_resource_definitions(snapshot, writer, acc)
            }
            other => match rule_for(other) {
                Some(rule) => build_rule_section(rule, snapshot, writer, acc),
                None => tracing::warn!("No report section for {}", other),
            },
        }
    }
}

pub fn build_rule_section(
    rule: &SectionRule,
    snapshot: &Snapshot,
    writer: &ArtifactWriter,
    acc: &mut ReportAccumulator,
) {
    let lines = rule.render(snapshot, writer, acc);
    acc.set_section(rule.placeholder, lines.join("\n\n"));
}

/// `OCP_VERSION`, `CLOUD`, `ARCH` and `CLUSTER_VERSION`
pub fn build_cluster_info(
    cluster_version: &Snapshot,
    infrastructure: &Snapshot,
    nodes: &Snapshot,
    writer: &ArtifactWriter,
    acc: &mut ReportAccumulator,
) {
    let mut references = Vec::new();

    let ocp_version = match first_item(cluster_version) {
        Some(item) => match non_empty(item.str_field(&["status", "desired", "version"])) {
            Some(version) => version.to_string(),
            None => {
                acc.append_warning(format!(
                    "ClusterVersion **{}** does not report a desired version",
                    item.name
                ));
                format!("{} unknown", ERROR_MARKER)
            }
        },
        None => {
            acc.append_warning(absence(GatherKind::ClusterVersion, cluster_version));
            format!("{} error", ERROR_MARKER)
        }
    };
    acc.set_section(Placeholder::OcpVersion, ocp_version);
    references.extend(write_snapshot(GatherKind::ClusterVersion, cluster_version, writer, acc));

    let cloud = match first_item(infrastructure) {
        Some(item) => match non_empty(
            item.str_field(&["spec", "platformSpec", "type"])
                .or_else(|| item.str_field(&["status", "platformStatus", "type"])),
        ) {
            Some(platform) => platform.to_string(),
            None => {
                acc.append_warning(format!(
                    "Infrastructure **{}** does not report a platform type",
                    item.name
                ));
                format!("{} unknown", ERROR_MARKER)
            }
        },
        None => {
            acc.append_warning(absence(GatherKind::Infrastructure, infrastructure));
            format!("{} error", ERROR_MARKER)
        }
    };
    acc.set_section(Placeholder::Cloud, cloud);
    references.extend(write_snapshot(GatherKind::Infrastructure, infrastructure, writer, acc));

    let arch = match nodes.items() {
        Some(items) => {
            let architectures = architectures(items);
            if architectures.is_empty() {
                acc.append_warning("No Node reports its operating system and architecture");
                format!("{} unknown", ERROR_MARKER)
            } else {
                architectures.join(" | ")
            }
        }
        None => {
            acc.append_warning(absence(GatherKind::Node, nodes));
            format!("{} error", ERROR_MARKER)
        }
    };
    acc.set_section(Placeholder::Arch, arch);
    references.extend(write_snapshot(GatherKind::Node, nodes, writer, acc));

    if references.is_empty() {
        references.push(format!("{} No cluster information was written", ERROR_MARKER));
    }
    acc.set_section(Placeholder::ClusterVersion, references.join("\n\n"));
}

/// Which allow-list an operator display name is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductTier {
    Primary,
    Related,
    Community,
}

impl ProductTier {
    /// Exact display-name match; anything else is not ours to report
    pub fn classify(display_name: &str) -> Option<Self> {
        if display_name == PRIMARY_PRODUCT {
            Some(ProductTier::Primary)
        } else if RELATED_PRODUCTS.contains(&display_name) {
            Some(ProductTier::Related)
        } else if COMMUNITY_PRODUCTS.contains(&display_name) {
            Some(ProductTier::Community)
        } else {
            None
        }
    }
}

/// `OADP_VERSIONS` from ClusterServiceVersions
///
/// Only operators on one of the allow-lists are reported and written.
pub fn build_installation(
    snapshot: &Snapshot,
    writer: &ArtifactWriter,
    acc: &mut ReportAccumulator,
) {
    let kind = GatherKind::ClusterServiceVersion;
    let items: &[Resource] = match snapshot {
        Snapshot::Found(items) => items,
        Snapshot::Empty => &[],
        Snapshot::Error(cause) => {
            let text = unable_to_collect(kind, cause);
            acc.append_error(&text);
            acc.set_section(
                Placeholder::OadpVersions,
                format!("{} {}", ERROR_MARKER, text),
            );
            return;
        }
    };

    let mut found_primary = false;
    let mut found_related = false;
    let mut product_lines = Vec::new();
    let mut matched = Vec::new();

    for csv in items {
        let display_name = csv
            .str_field(&["spec", "displayName"])
            .unwrap_or_default();
        let Some(tier) = ProductTier::classify(display_name) else {
            continue;
        };
        let version = csv.str_field(&["spec", "version"]).unwrap_or("unknown");

        let line = match tier {
            ProductTier::Primary => {
                found_primary = true;
                format!(
                    "Found **{}** version **{}** installed in **{}** namespace",
                    display_name, version, csv.namespace
                )
            }
            ProductTier::Related => {
                found_related = true;
                format!(
                    "Found related product **{}** version **{}** installed in **{}** namespace",
                    display_name, version, csv.namespace
                )
            }
            ProductTier::Community => {
                found_related = true;
                format!(
                    "{} Found related product **{} (Community)** version **{}** installed in **{}** namespace",
                    WARNING_MARKER, display_name, version, csv.namespace
                )
            }
        };
        product_lines.push(line);
        matched.push(csv.clone());
    }

    let mut lines = Vec::new();
    if !found_primary {
        let text = format!("No {} was found installed in the cluster", PRIMARY_PRODUCT);
        acc.append_error(&text);
        lines.push(format!("{} {}", ERROR_MARKER, text));
    }
    lines.extend(product_lines);
    lines.extend(write_bucket(&bucket(kind, &matched), writer, acc).into_values());
    if !found_related {
        lines.push("No related product was found installed in the cluster".to_string());
    }

    acc.set_section(Placeholder::OadpVersions, lines.join("\n\n"));
}

/// `CUSTOM_RESOURCE_DEFINITION`, flagging tracked definitions that are absent
pub fn build_custom_resource_definitions(
    snapshot: &Snapshot,
    writer: &ArtifactWriter,
    acc: &mut ReportAccumulator,
) {
    let rule = &CUSTOM_RESOURCE_DEFINITION_RULE;
    let mut lines = Vec::new();

    if let Some(items) = snapshot.items() {
        for name in GatherKind::tracked_crd_names() {
            if !items.iter().any(|item| item.name == name) {
                let text = format!("{} **{}** was not found in the cluster", rule.kind, name);
                acc.append_warning(&text);
                lines.push(format!("{} {}", ERROR_MARKER, text));
            }
        }
    }

    lines.extend(rule.render(snapshot, writer, acc));
    acc.set_section(rule.placeholder, lines.join("\n\n"));
}

/// Judge a DataProtectionApplication by its first condition
pub fn describe_data_protection_application(item: &Resource) -> ItemReport {
    let mut findings = Vec::new();

    if item
        .field(&["spec", "unsupportedOverrides"])
        .is_some_and(|overrides| !overrides.is_null())
    {
        findings.push(Finding::Warning(format!(
            "DataProtectionApplication **{}** in **{}** namespace is using **unsupportedOverrides**",
            item.name, item.namespace
        )));
    }

    let condition = item
        .field(&["status", "conditions"])
        .and_then(|conditions| conditions.as_array())
        .and_then(|conditions| conditions.first());

    let status = match condition {
        None => {
            findings.push(Finding::Warning(format!(
                "DataProtectionApplication **{}** with **no status** in **{}** namespace",
                item.name, item.namespace
            )));
            format!("{} no status", WARNING_MARKER)
        }
        Some(condition) => {
            let type_ = condition.get("type").and_then(|v| v.as_str()).unwrap_or_default();
            let value = condition
                .get("status")
                .and_then(|v| v.as_str())
                .unwrap_or_default();
            if value == "True" {
                format!("✅ status {}: {}", type_, value)
            } else {
                findings.push(Finding::Error(format!(
                    "DataProtectionApplication **{}** with **status {}: {}** in **{}** namespace",
                    item.name, type_, value, item.namespace
                )));
                format!("{} status {}: {}", ERROR_MARKER, type_, value)
            }
        }
    };

    ItemReport {
        line: format!(
            "Found **{}** with **{}** in **{}** namespace",
            item.name, status, item.namespace
        ),
        findings,
    }
}

pub fn describe_backup_storage_location(item: &Resource) -> ItemReport {
    describe_location(GatherKind::BackupStorageLocation, item)
}

pub fn describe_volume_snapshot_location(item: &Resource) -> ItemReport {
    describe_location(GatherKind::VolumeSnapshotLocation, item)
}

fn describe_location(kind: GatherKind, item: &Resource) -> ItemReport {
    let provider = non_empty(item.str_field(&["spec", "provider"])).unwrap_or("unknown");
    let phase = non_empty(item.str_field(&["status", "phase"]));

    let mut findings = Vec::new();
    if phase == Some("Unavailable") {
        findings.push(Finding::Error(format!(
            "{} **{}** in **{}** namespace is **Unavailable**",
            kind, item.name, item.namespace
        )));
    }

    ItemReport {
        line: format!(
            "Found **{}** with provider **{}** and phase **{}** in **{}** namespace",
            item.name,
            provider,
            phase.unwrap_or("unknown"),
            item.namespace
        ),
        findings,
    }
}

pub fn describe_storage_class(item: &Resource) -> ItemReport {
    let provisioner = non_empty(item.str_field(&["provisioner"])).unwrap_or("unknown");
    let default = if item.annotation(DEFAULT_CLASS_ANNOTATION) == Some("true") {
        " (default)"
    } else {
        ""
    };
    ItemReport::healthy(format!(
        "Found **{}** with provisioner **{}**{}",
        item.name, provisioner, default
    ))
}

pub fn describe_custom_resource_definition(item: &Resource) -> ItemReport {
    let versions: Vec<&str> = item
        .field(&["spec", "versions"])
        .and_then(|versions| versions.as_array())
        .map(|versions| {
            versions
                .iter()
                .filter(|v| v.get("served").and_then(|s| s.as_bool()) != Some(false))
                .filter_map(|v| v.get("name").and_then(|n| n.as_str()))
                .collect()
        })
        .unwrap_or_default();

    let served = if versions.is_empty() {
        "none".to_string()
    } else {
        versions.join(", ")
    };
    ItemReport::healthy(format!(
        "Found **{}** serving versions **{}**",
        item.name, served
    ))
}

/// Distinct `os/arch` pairs in encounter order
fn architectures(nodes: &[Resource]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for node in nodes {
        let os = node.str_field(&["status", "nodeInfo", "operatingSystem"]);
        let arch = node.str_field(&["status", "nodeInfo", "architecture"]);
        let (Some(os), Some(arch)) = (non_empty(os), non_empty(arch)) else {
            continue;
        };
        let pair = format!("{}/{}", os, arch);
        if !seen.contains(&pair) {
            seen.push(pair);
        }
    }
    seen
}

/// Items of a snapshot grouped the same way `bucket` groups them
fn partition(kind: GatherKind, items: &[Resource]) -> BTreeMap<&str, Vec<&Resource>> {
    let mut groups: BTreeMap<&str, Vec<&Resource>> = BTreeMap::new();
    for item in items {
        let namespace = match kind.scope() {
            Scope::Cluster => "",
            Scope::Namespaced => item.namespace.as_str(),
        };
        groups.entry(namespace).or_default().push(item);
    }
    groups
}

/// Write a bucket and turn each result into a reference line
///
/// Failed writes are also logged as errors.
fn write_bucket(
    bucket: &Bucket,
    writer: &ArtifactWriter,
    acc: &mut ReportAccumulator,
) -> BTreeMap<String, String> {
    writer
        .write(bucket)
        .into_iter()
        .map(|(namespace, result)| {
            if let WriteResult::Failed { path, cause } = &result {
                acc.append_error(format!("Unable to write `{}`: {}", path, cause));
            }
            (namespace, result.reference())
        })
        .collect()
}

fn write_snapshot(
    kind: GatherKind,
    snapshot: &Snapshot,
    writer: &ArtifactWriter,
    acc: &mut ReportAccumulator,
) -> Vec<String> {
    match snapshot.items() {
        Some(items) => write_bucket(&bucket(kind, items), writer, acc)
            .into_values()
            .collect(),
        None => Vec::new(),
    }
}

fn first_item(snapshot: &Snapshot) -> Option<&Resource> {
    snapshot.items().and_then(|items| items.first())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn unable_to_collect(kind: GatherKind, cause: &str) -> String {
    format!("Unable to collect {}: {}", kind, cause)
}

/// Log text for a snapshot that is not `Found`
fn absence(kind: GatherKind, snapshot: &Snapshot) -> String {
    match snapshot {
        Snapshot::Error(cause) => unable_to_collect(kind, cause),
        _ => format!("No {} was found in the cluster", kind),
    }
}
