//! `ktool version`
use std::fmt;

use anyhow::Result;
use clap::Args;

const UNKNOWN: &str = "<unknown>";

#[derive(Args, Debug)]
pub struct VersionArgs {}

impl VersionArgs {
    pub fn run(self) -> Result<()> {
        print!("{}", BuildInfo::current());
        Ok(())
    }
}

/// Details embedded at build time by `build.rs`
#[derive(Clone, Debug, PartialEq, Eq)]
struct BuildInfo {
    version: Option<&'static str>,
    revision: Option<&'static str>,
    revision_time: Option<&'static str>,
    modified: Option<&'static str>,
    rust_version: Option<&'static str>,
}

impl BuildInfo {
    fn current() -> Self {
        Self {
            version: option_env!("CARGO_PKG_VERSION"),
            revision: option_env!("KTOOL_REVISION"),
            revision_time: option_env!("KTOOL_REVISION_TIME"),
            modified: option_env!("KTOOL_MODIFIED"),
            rust_version: option_env!("KTOOL_RUST_VERSION"),
        }
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = [
            ("Version", self.version),
            ("Revision", self.revision),
            ("RevisionTime", self.revision_time),
            ("Modified", self.modified),
            ("RustVersion", self.rust_version),
        ];
        for (name, value) in fields {
            writeln!(f, "{name}: {}", value.unwrap_or(UNKNOWN))?;
        }
        Ok(())
    }
}
