// SPDX-License-Identifier: GPL-3.0-only

use std::process::Command;

fn main() {
    println!("cargo::rerun-if-changed=.git/HEAD");
    println!("cargo::rerun-if-env-changed=RECORDER_SETTINGS_VERSION");

    // Packagers may pin the version string
    let version = std::env::var("RECORDER_SETTINGS_VERSION").unwrap_or_else(|_| {
        let package = env!("CARGO_PKG_VERSION");
        match commit_hash() {
            Some(hash) => format!("{}-{}", package, hash),
            None => package.to_string(),
        }
    });

    println!("cargo::rustc-env=GIT_VERSION={}", version);
}

fn commit_hash() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;

    output
        .status
        .success()
        .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
}
