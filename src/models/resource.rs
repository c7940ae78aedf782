//! Collected cluster objects
//!
//! A `Resource` is a read-only view of one listed object. Serialization goes
//! through `TaggedResource`, which is the only place an object is given its
//! `apiVersion`/`kind` identity.

use kube::ResourceExt;
use kube::core::{DynamicObject, TypeMeta};
use serde::Serialize;
use serde_json::Value;

use super::gvk::Gvk;

/// One collected object plus its namespace ("" when cluster-scoped) and name
#[derive(Debug, Clone)]
pub struct Resource {
    pub namespace: String,
    pub name: String,
    pub object: DynamicObject,
}

impl Resource {
    pub fn from_object(object: DynamicObject) -> Self {
        Self {
            namespace: object.namespace().unwrap_or_default(),
            name: object.name_any(),
            object,
        }
    }

    /// Walk a JSON path through the object body (everything but metadata)
    pub fn field(&self, path: &[&str]) -> Option<&Value> {
        path.iter()
            .try_fold(&self.object.data, |value, key| value.get(*key))
    }

    pub fn str_field(&self, path: &[&str]) -> Option<&str> {
        self.field(path).and_then(Value::as_str)
    }

    pub fn annotation(&self, key: &str) -> Option<&str> {
        self.object.annotations().get(key).map(String::as_str)
    }

    /// Copy the object and stamp it with a type identity for serialization
    pub fn tag(&self, gvk: &Gvk) -> TaggedResource {
        TaggedResource::new(self.object.clone(), gvk)
    }
}

/// An object carrying its canonical `apiVersion` and `kind`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TaggedResource(DynamicObject);

impl TaggedResource {
    /// Tagging overwrites any existing type identity, so it is idempotent
    pub fn new(mut object: DynamicObject, gvk: &Gvk) -> Self {
        object.types = Some(TypeMeta {
            api_version: gvk.api_version(),
            kind: gvk.kind.clone(),
        });
        Self(object)
    }

    pub fn object(&self) -> &DynamicObject {
        &self.0
    }

    pub fn name(&self) -> String {
        self.0.name_any()
    }

    pub fn namespace(&self) -> Option<String> {
        self.0.namespace()
    }
}
