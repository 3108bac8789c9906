use std::process::Command;

/// Short commit hash of the checkout, or "unknown" outside a git work tree.
fn short_git_hash() -> String {
    Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|hash| hash.trim().to_string())
        .filter(|hash| !hash.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

fn main() {
    // shown by `crossfill --version`
    println!("cargo:rustc-env=GIT_HASH={}", short_git_hash());
    println!("cargo:rerun-if-changed=.git/HEAD");
}
