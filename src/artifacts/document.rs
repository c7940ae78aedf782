//! YAML encoding of collected objects

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ListMeta;
use serde::Serialize;

use crate::models::{Gvk, TaggedResource};

/// A `v1` `List` of typed items, laid out the way `kubectl get -o yaml` prints one
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ListDocument<'a> {
    api_version: String,
    items: &'a [TaggedResource],
    kind: String,
    metadata: ListMeta,
}

/// Encode tagged items as a single self-describing list document
pub fn encode_list(items: &[TaggedResource]) -> Result<String, serde_yaml::Error> {
    let gvk = Gvk::list();
    let document = ListDocument {
        api_version: gvk.api_version(),
        items,
        kind: gvk.kind,
        metadata: ListMeta {
            resource_version: Some(String::new()),
            ..Default::default()
        },
    };
    serde_yaml::to_string(&document)
}
