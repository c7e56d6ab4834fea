//! Stamps `pw --version` with the source revision.
//!
//! `PW_BUILD_REV` wins when set (release builds from a tarball have no git
//! checkout). Otherwise the short HEAD hash is used, with a `-dirty` suffix
//! when the worktree has uncommitted changes.

use std::process::Command;

const REV_ENV: &str = "PW_BUILD_REV";

fn git(args: &[&str]) -> Option<String> {
    let out = Command::new("git").args(args).output().ok()?;
    if !out.status.success() {
        return None;
    }
    Some(String::from_utf8(out.stdout).ok()?.trim().to_string())
}

fn revision() -> String {
    if let Some(rev) = std::env::var(REV_ENV).ok().filter(|s| !s.is_empty()) {
        return rev;
    }
    let Some(hash) = git(&["rev-parse", "--short", "HEAD"]) else {
        return "unknown".to_string();
    };
    match git(&["status", "--porcelain", "--untracked-files=no"]) {
        Some(changes) if !changes.is_empty() => format!("{hash}-dirty"),
        _ => hash,
    }
}

fn main() {
    println!("cargo:rerun-if-env-changed={REV_ENV}");
    println!("cargo:rustc-env=PW_BUILD_REV={}", revision());

    if let Some(git_dir) = git(&["rev-parse", "--git-dir"]) {
        println!("cargo:rerun-if-changed={git_dir}/HEAD");
        println!("cargo:rerun-if-changed={git_dir}/index");
    }
}
