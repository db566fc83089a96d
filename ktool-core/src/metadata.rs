//! Metadata structs used in lists and dynamic objects.
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Type information that is flattened into every kubernetes object
#[derive(Deserialize, Serialize, Clone, Default, Debug, Eq, PartialEq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct TypeMeta {
    /// The version of the API
    pub api_version: String,

    /// The name of the API
    pub kind: String,
}

/// The subset of `metadata` that decides where an object is written
///
/// Only `name` and `namespace` are interpreted. Every other metadata key
/// (labels, annotations, owner references, ...) is carried verbatim in `other`
/// so that nothing is lost when the object is serialized again.
#[derive(Deserialize, Serialize, Clone, Default, Debug, PartialEq)]
pub struct ObjectMeta {
    /// Name must be unique within a namespace
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Namespace defines the space within which each name must be unique
    ///
    /// Empty or absent for cluster-scoped resources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// All other metadata keys
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keeps_unknown_metadata_keys() {
        let raw = json!({
            "name": "web",
            "namespace": "prod",
            "labels": { "app": "web" },
            "annotations": { "example.com/owner": "team-a" },
        });
        let meta: ObjectMeta = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(meta.name.as_deref(), Some("web"));
        assert_eq!(meta.namespace.as_deref(), Some("prod"));
        assert_eq!(meta.other.len(), 2);
        assert_eq!(serde_json::to_value(&meta).unwrap(), raw);
    }

    #[test]
    fn type_meta_uses_camel_case() {
        let tm: TypeMeta = serde_json::from_value(json!({ "apiVersion": "v1", "kind": "Pod" })).unwrap();
        assert_eq!(tm.api_version, "v1");
        assert_eq!(tm.kind, "Pod");
    }
}
