//! Stamps mdv-server with the build identity shown by `/api/buildinfo`
//! and the startup log line.
//!
//! Emits `GIT_HASH` (short hash, `-dirty` when the work tree has local
//! changes, `unknown` outside a checkout), `BUILD_TIMESTAMP` (RFC 3339, UTC)
//! and `BUILD_PROFILE`.

use std::path::Path;
use std::process::Command;

/// Run git in the package directory and return trimmed stdout on success
fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|s| s.trim().to_string())
}

fn source_revision() -> String {
    let Some(hash) = git(&["rev-parse", "--short=8", "HEAD"]) else {
        return "unknown".to_string();
    };
    match git(&["status", "--porcelain", "--untracked-files=no"]) {
        Some(changes) if !changes.is_empty() => format!("{}-dirty", hash),
        _ => hash,
    }
}

fn main() {
    // Re-stamp when HEAD moves; without a checkout cargo's default tracking applies
    let head = Path::new("../.git/HEAD");
    if head.exists() {
        println!("cargo:rerun-if-changed={}", head.display());
        println!("cargo:rerun-if-changed=src");
        println!("cargo:rerun-if-changed=ui");
    }

    let stamped_at = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());

    println!("cargo:rustc-env=GIT_HASH={}", source_revision());
    println!("cargo:rustc-env=BUILD_TIMESTAMP={}", stamped_at);
    println!("cargo:rustc-env=BUILD_PROFILE={}", profile);
}
