/// Markdown skeleton of `oadp-must-gather-summary.md`
pub const SUMMARY_TEMPLATE: &str = r#"# OADP must-gather summary version <<MUST_GATHER_VERSION>>

## Errors

<<ERRORS>>

## Cluster information

| Cluster ID | OpenShift version | Cloud provider | Architecture |
| ---------- | ----------------- | -------------- | ------------ |
| <<CLUSTER_ID>> | <<OCP_VERSION>> | <<CLOUD>> | <<ARCH>> |

<<CLUSTER_VERSION>>

## OADP operator installation information

<<OADP_VERSIONS>>

### DataProtectionApplications

<<DATA_PROTECTION_APPLICATIONS>>

### BackupStorageLocations

<<BACKUP_STORAGE_LOCATIONS>>

### VolumeSnapshotLocations

<<VOLUME_SNAPSHOT_LOCATIONS>>

## Available StorageClasses in cluster

<<STORAGE_CLASSES>>

## CustomResourceDefinitions

<<CUSTOM_RESOURCE_DEFINITION>>
"#;
