//! `ktool`: helpers for working with Kubernetes manifests on disk
//!
//! ```text
//! ktool split-manifests -f all.yaml -o out
//! ktool -vv split-manifests -R -f manifests/ -o out --filename-template '{{ .Name }}.yaml'
//! ktool version
//! ```
use clap::Parser;

mod cli;
mod logging;

fn main() {
    let app = cli::App::parse();
    if let Err(err) = logging::init(app.verbose).and_then(|()| app.run()) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
