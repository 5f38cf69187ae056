fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");

    // Short commit hash for dev builds; empty outside a git checkout
    let hash = git(&["rev-parse", "--short", "HEAD"])
        .map(|out| out.trim().to_string())
        .unwrap_or_default();
    let release = git(&["describe", "--exact-match", "--tags", "HEAD"]).is_some();

    println!("cargo:rustc-env=PAGES_GIT_HASH={hash}");
    println!("cargo:rustc-env=PAGES_RELEASE_TAG={release}");
}

fn git(args: &[&str]) -> Option<String> {
    std::process::Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).into_owned())
}
