//! Embeds git and rustc details shown by `ktool version`

use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=../.git/HEAD");
    println!("cargo:rerun-if-changed=../.git/refs/");
    println!("cargo:rerun-if-changed=../.git/index");

    if let Some(revision) = git(&["rev-parse", "HEAD"]) {
        println!("cargo:rustc-env=KTOOL_REVISION={revision}");
    }
    if let Some(time) = git(&["log", "-1", "--format=%cI"]) {
        println!("cargo:rustc-env=KTOOL_REVISION_TIME={time}");
    }
    if let Some(status) = git(&["status", "--porcelain", "--untracked-files=no"]) {
        println!("cargo:rustc-env=KTOOL_MODIFIED={}", !status.is_empty());
    }
    if let Some(rustc) = rustc_version() {
        println!("cargo:rustc-env=KTOOL_RUST_VERSION={rustc}");
    }
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let out = String::from_utf8(output.stdout).ok()?;
    Some(out.trim().to_string())
}

fn rustc_version() -> Option<String> {
    let rustc = std::env::var("RUSTC").unwrap_or_else(|_| "rustc".into());
    let output = Command::new(rustc).arg("--version").output().ok()?;
    if !output.status.success() {
        return None;
    }
    let out = String::from_utf8(output.stdout).ok()?;
    // "rustc 1.82.0 (f6e511eec 2024-10-15)"
    out.split_whitespace().nth(1).map(String::from)
}
