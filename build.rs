use std::process::Command;

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;

    if !output.status.success() {
        return None;
    }

    String::from_utf8(output.stdout).ok().map(|v| v.trim().to_string())
}

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");

    let version = env!("CARGO_PKG_VERSION");

    // Building from a tarball has no git history, just use the package version then
    match (git(&["rev-list", "--count", "HEAD"]), git(&["rev-parse", "--short", "HEAD"])) {
        (Some(revision), Some(commit)) => {
            println!("cargo:rustc-env=GPULOAD_VER={} (r{}-{})", version, revision, commit)
        }
        _ => println!("cargo:rustc-env=GPULOAD_VER={}", version),
    }
}
