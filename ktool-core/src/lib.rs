//! Crate with the object types shared by the `ktool` crates
//!
//! Manifests are handled without binding them to a schema: every document is read
//! into a [`DynamicObject`] that exposes the identifying fields (type, name, namespace)
//! and keeps all other keys untouched so the object can be written back out.
#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod dynamic;
pub use dynamic::DynamicObject;

pub mod gvk;
pub use gvk::{GroupVersion, GroupVersionKind};

pub mod metadata;
pub use metadata::{ObjectMeta, TypeMeta};

pub mod object;
pub use object::ObjectList;

pub mod scope;
pub use scope::Scope;
