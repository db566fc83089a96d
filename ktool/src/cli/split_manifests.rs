//! `ktool split-manifests`
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use ktool_split::{
    config::{DEFAULT_CLUSTER_SCOPED_DIR_NAME, DEFAULT_NAMESPACED_DIR_NAME},
    template::DEFAULT_FILENAME_TEMPLATE,
    SplitConfig, TracingSink,
};

use super::log_flag;

#[derive(Args, Debug)]
pub struct SplitManifestsArgs {
    /// File, directory or '-' for stdin holding the manifests; may be repeated
    #[arg(short = 'f', long = "filename", value_name = "PATH")]
    filenames: Vec<PathBuf>,

    /// Process directories given with -f recursively
    #[arg(short = 'R', long)]
    recursive: bool,

    /// Directory to write the files into
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Go template for each file name, evaluated over .Namespace, .Name and .GVK
    #[arg(long, value_name = "TEMPLATE", default_value = DEFAULT_FILENAME_TEMPLATE)]
    filename_template: String,

    /// Name of the directory holding one directory per namespace
    #[arg(long, value_name = "NAME", default_value = DEFAULT_NAMESPACED_DIR_NAME)]
    namespaced_dir_name: String,

    /// Name of the directory holding cluster-scoped objects
    #[arg(long, value_name = "NAME", default_value = DEFAULT_CLUSTER_SCOPED_DIR_NAME)]
    cluster_scoped_dir_name: String,
}

impl SplitManifestsArgs {
    pub fn run(self) -> Result<()> {
        for (name, value) in self.flags() {
            log_flag(name, value);
        }
        let config = self.into_config();
        ktool_split::split(&config, &mut TracingSink)?;
        Ok(())
    }

    fn flags(&self) -> [(&'static str, String); 6] {
        let filenames = self
            .filenames
            .iter()
            .map(|f| f.display().to_string())
            .collect::<Vec<_>>()
            .join(",");
        [
            ("filename", format!("[{filenames}]")),
            ("recursive", self.recursive.to_string()),
            ("output-dir", self.output_dir.display().to_string()),
            ("filename-template", self.filename_template.clone()),
            ("namespaced-dir-name", self.namespaced_dir_name.clone()),
            ("cluster-scoped-dir-name", self.cluster_scoped_dir_name.clone()),
        ]
    }

    fn into_config(self) -> SplitConfig {
        SplitConfig {
            inputs: self.filenames,
            recursive: self.recursive,
            output_dir: self.output_dir,
            namespaced_dir_name: self.namespaced_dir_name,
            cluster_scoped_dir_name: self.cluster_scoped_dir_name,
            filename_template: self.filename_template,
        }
    }
}
