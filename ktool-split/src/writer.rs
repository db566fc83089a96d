//! Writing objects into the output directory tree
use std::{
    fs::{DirBuilder, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

use ktool_core::Scope;

use crate::{
    config::SplitConfig,
    error::{Error, IoAction},
    Result,
};

/// Permission bits for created directories and files
#[cfg(unix)]
const MODE: u32 = 0o770;

/// Places objects below `output_dir`
///
/// ```text
/// {output_dir}/
///   {cluster_scoped_dir}/{filename}
///   {namespaced_dir}/{namespace}/{filename}
/// ```
#[derive(Clone, Debug)]
pub struct Writer {
    output_dir: PathBuf,
    namespaced_dir: PathBuf,
    cluster_scoped_dir: PathBuf,
}

impl Writer {
    /// Writer for the directories named in `config`
    pub fn new(config: &SplitConfig) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
            namespaced_dir: config.output_dir.join(&config.namespaced_dir_name),
            cluster_scoped_dir: config.output_dir.join(&config.cluster_scoped_dir_name),
        }
    }

    /// The directory everything is written below
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Create the two scope directories
    ///
    /// Unlike namespace directories these must not exist yet; an existing one fails the run.
    pub fn prepare(&self) -> Result<()> {
        for dir in [&self.cluster_scoped_dir, &self.namespaced_dir] {
            dir_builder()
                .create(dir)
                .map_err(Error::io(IoAction::MakeDirectory, dir))?;
        }
        Ok(())
    }

    /// Resolve the directory for an object, creating its namespace directory on demand
    pub fn target_dir(&self, scope: Scope, namespace: Option<&str>) -> Result<PathBuf> {
        match (scope, namespace) {
            (Scope::Namespaced, Some(ns)) => {
                let dir = self.namespaced_dir.join(ns);
                match dir_builder().create(&dir) {
                    Err(err) if err.kind() != io::ErrorKind::AlreadyExists => {
                        Err(Error::io(IoAction::MakeDirectory, dir)(err))
                    }
                    _ => Ok(dir),
                }
            }
            _ => Ok(self.cluster_scoped_dir.clone()),
        }
    }

    /// Write `contents` to `dir/filename`, replacing any file already there
    pub fn write(&self, dir: &Path, filename: &str, contents: &[u8]) -> Result<PathBuf> {
        let path = dir.join(filename);
        let mut file = file_options()
            .open(&path)
            .map_err(Error::io(IoAction::WriteFile, &path))?;
        file.write_all(contents)
            .map_err(Error::io(IoAction::WriteFile, &path))?;
        Ok(path)
    }
}

fn dir_builder() -> DirBuilder {
    let mut builder = DirBuilder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(MODE);
    }
    builder
}

fn file_options() -> OpenOptions {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(MODE);
    }
    options
}
