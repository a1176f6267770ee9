//! Build-script metadata for the `--version` surface.
//!
//! Resilient by design: when git or date tooling is unavailable the script
//! emits stable "unknown" markers instead of failing the build.

use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-env-changed=SCOUT_BUILD_GIT_HASH");
    println!("cargo:rerun-if-env-changed=SCOUT_BUILD_TIMESTAMP");

    let git_hash =
        std::env::var("SCOUT_BUILD_GIT_HASH").unwrap_or_else(|_| git_short_hash());
    let timestamp =
        std::env::var("SCOUT_BUILD_TIMESTAMP").unwrap_or_else(|_| build_timestamp_utc());

    println!("cargo:rustc-env=SCOUT_BUILD_GIT_HASH={git_hash}");
    println!("cargo:rustc-env=SCOUT_BUILD_TIMESTAMP={timestamp}");
}

fn git_short_hash() -> String {
    run_cmd("git", &["rev-parse", "--short=12", "HEAD"]).unwrap_or_else(|| "unknown".to_string())
}

fn build_timestamp_utc() -> String {
    if let Some(stamp) = run_cmd("date", &["-u", "+%Y-%m-%dT%H:%M:%SZ"]) {
        return stamp;
    }
    let seconds = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|delta| delta.as_secs())
        .unwrap_or(0);
    format!("unix:{seconds}")
}

fn run_cmd(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
