//! Command line definition
use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing::debug;

mod split_manifests;
mod version;

#[derive(Parser, Debug)]
#[command(name = "ktool", about = "Helpers for Kubernetes manifests", version)]
pub struct App {
    /// Log more details; repeat for even more (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Split manifests into one file per object, sorted by namespace
    SplitManifests(split_manifests::SplitManifestsArgs),

    /// Print build information
    Version(version::VersionArgs),
}

impl App {
    pub fn run(self) -> Result<()> {
        log_flag("verbose", self.verbose.to_string());
        match self.command {
            Command::SplitManifests(args) => args.run(),
            Command::Version(args) => args.run(),
        }
    }
}

/// Log a flag value in the form `FLAG: --name="value"`
fn log_flag(name: &str, value: String) {
    debug!("FLAG: --{name}={value:?}");
}
