#![forbid(unsafe_code)]

use std::process::Command;

fn main() {
    // Source tarballs and vendored checkouts have no git metadata.
    let in_git_repo = Command::new("git")
        .args(["rev-parse", "--git-dir"])
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false);

    if in_git_repo {
        build_data::set_GIT_BRANCH();
        build_data::set_GIT_COMMIT_SHORT();
        build_data::set_GIT_DIRTY();
        build_data::set_SOURCE_TIMESTAMP();  // Using BUILD_TIMESTAMP makes build unreproducible.
    } else {
        println!("cargo:rustc-env=GIT_BRANCH=unknown");
        println!("cargo:rustc-env=GIT_COMMIT_SHORT=unknown");
        println!("cargo:rustc-env=GIT_DIRTY=unknown");
        println!("cargo:rustc-env=SOURCE_TIMESTAMP=unknown");
    }
    build_data::set_RUSTC_VERSION();
}
