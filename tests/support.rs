//! Common test support utilities and fixtures
//!
//! Fixtures build real repositories with the system `git`: a source site,
//! optionally committed, and a bare repository acting as the remote.

#![allow(dead_code)]

use git_deploy::config::DeployOptionsBuilder;
use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};
use tempfile::TempDir;

pub const USER_NAME: &str = "Deploy Bot";
pub const USER_EMAIL: &str = "deploy@example.com";

/// Result of running a CLI command
#[derive(Debug)]
pub struct CliOutput {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Run git in `dir`, panicking with its stderr on failure
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(["-c", "commit.gpgsign=false"])
        .args(args)
        .current_dir(dir)
        .env("GIT_AUTHOR_NAME", USER_NAME)
        .env("GIT_AUTHOR_EMAIL", USER_EMAIL)
        .env("GIT_COMMITTER_NAME", USER_NAME)
        .env("GIT_COMMITTER_EMAIL", USER_EMAIL)
        .output()
        .expect("Failed to execute git");

    assert!(
        output.status.success(),
        "git {} failed: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// A temporary directory holding the source, remote and staging dirs of a test
pub struct Workspace {
    pub root: TempDir,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Workspace {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory");
        Self { root }
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// A plain directory with a page and a readme
    pub fn site(&self) -> PathBuf {
        let site = self.path().join("site");
        fs::create_dir_all(&site).expect("Failed to create site");
        fs::write(site.join("index.html"), "<h1>hello</h1>\n").expect("Failed to write page");
        fs::write(site.join("README.md"), "# site\n").expect("Failed to write readme");
        site
    }

    /// The site, committed on `master` of its own repository
    pub fn site_repo(&self) -> PathBuf {
        let site = self.site();
        git(&site, &["init", "--quiet"]);
        git(&site, &["symbolic-ref", "HEAD", "refs/heads/master"]);
        git(&site, &["add", "--all"]);
        git(&site, &["commit", "--quiet", "-m", "Initial commit"]);
        site
    }

    /// An empty bare repository to push to
    pub fn remote(&self) -> PathBuf {
        let remote = self.path().join("remote.git");
        fs::create_dir_all(&remote).expect("Failed to create remote");
        git(&remote, &["init", "--quiet", "--bare"]);
        remote
    }
}

/// Options pushing `src` to `remote` with the test identity
pub fn deploy_options(remote: &Path, src: &Path) -> DeployOptionsBuilder {
    DeployOptionsBuilder::new(remote.to_string_lossy())
        .with_src(src)
        .with_user(USER_NAME, USER_EMAIL)
}

/// Files in the tip commit of `branch` on the remote, sorted
pub fn remote_files(remote: &Path, branch: &str) -> Vec<String> {
    let listing = git(remote, &["ls-tree", "-r", "--name-only", branch]);
    let mut files: Vec<String> = listing.lines().map(|l| l.to_string()).collect();
    files.sort();
    files
}

pub fn commit_count(repo: &Path, branch: &str) -> usize {
    git(repo, &["rev-list", "--count", branch])
        .parse()
        .expect("rev-list did not print a number")
}

/// Run the git-deploy binary with given arguments
pub fn run_cli(args: &[&str], cwd: &Path) -> CliOutput {
    let output = Command::new(env!("CARGO_BIN_EXE_git-deploy"))
        .args(args)
        .current_dir(cwd)
        .env_remove("GIT_DEPLOY_URL")
        .output()
        .expect("Failed to execute git-deploy");

    CliOutput {
        status: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}
