//! Contains the unstructured representation of a manifest document.
use crate::{
    gvk::{GroupVersionKind, ParseGroupVersionError},
    metadata::{ObjectMeta, TypeMeta},
};

use thiserror::Error;

#[derive(Debug, Error)]
#[error("failed to parse this value into a DynamicObject: {source}")]
/// Failed to parse a decoded document into a `DynamicObject`
pub struct ParseDynamicObjectError {
    #[from]
    source: serde_json::Error,
}

/// A dynamic representation of a kubernetes object
///
/// This will work with any non-list type object.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub struct DynamicObject {
    /// The type fields, not always present
    #[serde(flatten, default)]
    pub types: Option<TypeMeta>,
    /// Object metadata
    #[serde(default)]
    pub metadata: ObjectMeta,

    /// All other keys
    #[serde(flatten)]
    pub data: serde_json::Value,
}

impl DynamicObject {
    /// Create a DynamicObject with minimal values set from a GroupVersionKind.
    #[must_use]
    pub fn new(name: &str, gvk: &GroupVersionKind) -> Self {
        Self {
            types: Some(TypeMeta {
                api_version: gvk.api_version(),
                kind: gvk.kind.clone(),
            }),
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                ..Default::default()
            },
            data: serde_json::Value::Object(Default::default()),
        }
    }

    /// Attach dynamic data to a DynamicObject
    #[must_use]
    pub fn data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }

    /// Attach a namespace to a DynamicObject
    #[must_use]
    pub fn within(mut self, ns: &str) -> Self {
        self.metadata.namespace = Some(ns.into());
        self
    }

    /// Attempt to read a decoded document as a `DynamicObject`
    pub fn try_from_value(value: serde_json::Value) -> Result<Self, ParseDynamicObjectError> {
        Ok(serde_json::from_value(value)?)
    }

    /// The name of the object, or an empty string when it is unset
    pub fn name_any(&self) -> String {
        self.metadata.name.clone().unwrap_or_default()
    }

    /// The namespace the object is in, if it has a non-empty one
    pub fn namespace(&self) -> Option<&str> {
        self.metadata.namespace.as_deref().filter(|ns| !ns.is_empty())
    }

    /// The `GroupVersionKind` named by `apiVersion` and `kind`
    ///
    /// Objects without type information map to an empty `GroupVersionKind`.
    pub fn gvk(&self) -> Result<GroupVersionKind, ParseGroupVersionError> {
        match &self.types {
            Some(tm) => GroupVersionKind::try_from(tm),
            None => Ok(GroupVersionKind::default()),
        }
    }
}
