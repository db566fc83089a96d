//! Error handling in [`ktool-split`][crate]
use std::{fmt, path::PathBuf};

use ktool_core::{
    dynamic::ParseDynamicObjectError,
    gvk::{GroupVersionKind, ParseGroupVersionError},
};
use thiserror::Error;

use crate::decoder::Location;

/// Possible errors when splitting manifests
///
/// Every error is terminal for a run. Files written before it was raised stay on disk.
#[derive(Error, Debug)]
pub enum Error {
    /// The configuration or a decoded object breaks an invariant
    #[error("{0}")]
    Validation(#[source] ValidationError),

    /// A document could not be decoded into an object
    #[error("can't decode {0}")]
    Decode(#[source] DecodeError),

    /// The filename template could not be parsed or executed
    #[error("{0}")]
    Template(#[source] TemplateError),

    /// The filename template produced an empty string for an object
    #[error("can't write file: filename template rendered empty string")]
    EmptyFilename,

    /// An object could not be serialized back to YAML
    #[error("can't marshal object {name:?}: {source}")]
    Serialize {
        /// Name of the object
        name: String,
        /// The serializer error
        source: serde_yaml::Error,
    },

    /// Filesystem access failed
    #[error("can't {action} {path:?}: {source}")]
    Io {
        /// What was being done
        action: IoAction,
        /// The path involved
        path: PathBuf,
        /// The underlying error
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(action: IoAction, path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Error::Io { action, path, source }
    }
}

impl From<ValidationError> for Error {
    fn from(e: ValidationError) -> Self {
        Error::Validation(e)
    }
}

impl From<DecodeError> for Error {
    fn from(e: DecodeError) -> Self {
        Error::Decode(e)
    }
}

impl From<TemplateError> for Error {
    fn from(e: TemplateError) -> Self {
        Error::Template(e)
    }
}

/// Filesystem operation named in [`Error::Io`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IoAction {
    /// Reading an input file, directory or stdin
    Read,
    /// Creating an output directory
    MakeDirectory,
    /// Writing an output file
    WriteFile,
}

impl fmt::Display for IoAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IoAction::Read => f.write_str("read"),
            IoAction::MakeDirectory => f.write_str("make directory"),
            IoAction::WriteFile => f.write_str("write file"),
        }
    }
}

#[derive(Error, Debug)]
// Redundant with the error messages and machine names
#[allow(missing_docs)]
/// Invariant violations caught before anything is written
pub enum ValidationError {
    #[error("at least one filename has to be specified")]
    NoInputs,

    #[error("name can't be empty ({gvk} from {location})")]
    EmptyName {
        location: Location,
        gvk: GroupVersionKind,
    },
}

/// A document that could not be decoded, and where it was found
#[derive(Error, Debug)]
#[error("{location}: {reason}")]
pub struct DecodeError {
    /// Where the document came from
    pub location: Location,
    /// Why it was rejected
    #[source]
    pub reason: DecodeReason,
}

#[derive(Error, Debug)]
#[allow(missing_docs)]
/// Why a document was rejected
pub enum DecodeReason {
    #[error("invalid YAML: {0}")]
    Yaml(#[source] serde_yaml::Error),

    #[error("invalid JSON: {0}")]
    Json(#[source] serde_json::Error),

    #[error("expected an object, found {0}")]
    NotAnObject(&'static str),

    #[error("Object 'Kind' is missing")]
    MissingKind,

    #[error("Object 'apiVersion' is missing")]
    MissingApiVersion,

    #[error("{0}")]
    GroupVersion(#[source] ParseGroupVersionError),

    #[error("{0}")]
    Structure(#[source] ParseDynamicObjectError),
}

#[derive(Error, Debug)]
#[allow(missing_docs)]
/// Failures of the filename template
pub enum TemplateError {
    #[error("can't parse filename template {template:?}: {message}")]
    Parse { template: String, message: String },

    #[error("can't execute filename template: {message}")]
    Execute { message: String },
}
