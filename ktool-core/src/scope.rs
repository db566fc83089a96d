//! Namespace scope of an object.
use crate::dynamic::DynamicObject;

/// Whether an object lives inside a namespace or at cluster level
///
/// Without a live cluster the scope of a kind cannot be discovered, so it is
/// read off the object itself: a non-empty `metadata.namespace` makes it namespaced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Object belongs to the named namespace
    Namespaced,
    /// Object is global to the cluster
    Cluster,
}

impl Scope {
    /// Classify an object by its namespace field
    pub fn of(obj: &DynamicObject) -> Self {
        if obj.namespace().is_some() {
            Scope::Namespaced
        } else {
            Scope::Cluster
        }
    }
}
