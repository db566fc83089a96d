//! Run configuration
use std::path::PathBuf;

use crate::{error::ValidationError, template::DEFAULT_FILENAME_TEMPLATE};

/// Default name of the directory holding one sub-directory per namespace
pub const DEFAULT_NAMESPACED_DIR_NAME: &str = "namespaces";
/// Default name of the directory holding cluster-scoped objects
pub const DEFAULT_CLUSTER_SCOPED_DIR_NAME: &str = "cluster-scoped";

/// Everything a split run needs to know
///
/// Built by the command line layer; the pipeline never modifies it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitConfig {
    /// Files, directories, or `-` for stdin, in processing order
    pub inputs: Vec<PathBuf>,
    /// Whether directory inputs are walked recursively
    pub recursive: bool,
    /// Root of the generated tree
    pub output_dir: PathBuf,
    /// Directory under `output_dir` for namespaced objects
    pub namespaced_dir_name: String,
    /// Directory under `output_dir` for cluster-scoped objects
    pub cluster_scoped_dir_name: String,
    /// Go text/template rendering each object's filename
    pub filename_template: String,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            inputs: vec![],
            recursive: false,
            output_dir: PathBuf::from("."),
            namespaced_dir_name: DEFAULT_NAMESPACED_DIR_NAME.into(),
            cluster_scoped_dir_name: DEFAULT_CLUSTER_SCOPED_DIR_NAME.into(),
            filename_template: DEFAULT_FILENAME_TEMPLATE.into(),
        }
    }
}

impl SplitConfig {
    /// Configuration with default settings for the given inputs
    pub fn new<I, P>(inputs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Set the root of the generated tree
    #[must_use]
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the filename template
    #[must_use]
    pub fn filename_template(mut self, template: impl Into<String>) -> Self {
        self.filename_template = template.into();
        self
    }

    /// Check the invariants that must hold before anything is touched
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.inputs.is_empty() {
            return Err(ValidationError::NoInputs);
        }
        Ok(())
    }
}
