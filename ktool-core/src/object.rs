//! Generic list wrapper.
use crate::metadata::TypeMeta;
use serde::{Deserialize, Serialize};

/// A generic Kubernetes object list
///
/// Manifests are frequently exported as a `List` (or `PodList`, `ConfigMapList`, ...)
/// wrapping the actual objects in `items`. This is used instead of a full struct
/// for each of those list kinds.
#[derive(Serialize, Deserialize, Debug)]
pub struct ObjectList<T>
where
    T: Clone,
{
    /// The type fields, not always present
    #[serde(flatten, default)]
    pub types: Option<TypeMeta>,

    /// ListMeta, carried as-is
    #[serde(default)]
    pub metadata: serde_json::Value,

    /// The items we are actually interested in.
    #[serde(bound(deserialize = "Vec<T>: Deserialize<'de>"))]
    pub items: Vec<T>,
}

impl<T: Clone> ObjectList<T> {
    /// Whether a document of this kind with an `items` array should be read as a list
    ///
    /// This follows the apimachinery convention that list kinds carry a `List` suffix.
    pub fn is_list_kind(kind: &str) -> bool {
        kind.ends_with("List")
    }
}

impl<T: Clone> IntoIterator for ObjectList<T> {
    type IntoIter = ::std::vec::IntoIter<Self::Item>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
