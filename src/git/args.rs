//! Argument vectors for the git invocations a deploy makes
//!
//! These are plain data so the step list can be built, displayed and tested
//! without spawning anything. [`GitRunner`](super::GitRunner) executes them.

use std::path::Path;

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Flags for the final push
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PushFlags {
    pub prune: bool,
    pub force: bool,
    pub quiet: bool,
}

pub fn init() -> Vec<String> {
    vec!["init".to_string()]
}

/// Fast local clone of the source repository into the staging directory
pub fn clone_local(src_repo: &Path, dest: &Path) -> Vec<String> {
    vec![
        "clone".to_string(),
        "--local".to_string(),
        path_arg(src_repo),
        path_arg(dest),
    ]
}

/// Clone a single branch of the remote into the staging directory
pub fn clone_branch(url: &str, branch: &str, dest: &Path) -> Vec<String> {
    vec![
        "clone".to_string(),
        "--branch".to_string(),
        branch.to_string(),
        url.to_string(),
        path_arg(dest),
    ]
}

pub fn pull(src_repo: &Path) -> Vec<String> {
    vec!["pull".to_string(), "--force".to_string(), path_arg(src_repo)]
}

pub fn fetch(src_repo: &Path) -> Vec<String> {
    vec!["fetch".to_string(), "--force".to_string(), path_arg(src_repo)]
}

/// Squash the fetched source into the working tree, incoming side winning
///
/// The previous deploy and the source never share history, hence
/// `--allow-unrelated-histories`; `--squash` leaves the result uncommitted so
/// the regular commit step records it as one commit on top of the last deploy.
pub fn merge_fetch_head() -> Vec<String> {
    vec![
        "merge".to_string(),
        "FETCH_HEAD".to_string(),
        "--squash".to_string(),
        "--allow-unrelated-histories".to_string(),
        "--strategy-option=theirs".to_string(),
    ]
}

/// Drop everything from the index, leaving the working tree untouched
pub fn unstage_all() -> Vec<String> {
    vec![
        "rm".to_string(),
        "-r".to_string(),
        "--cached".to_string(),
        "--quiet".to_string(),
        "--ignore-unmatch".to_string(),
        ".".to_string(),
    ]
}

pub fn checkout_orphan(branch: &str) -> Vec<String> {
    vec![
        "checkout".to_string(),
        "--orphan".to_string(),
        branch.to_string(),
    ]
}

pub fn checkout(branch: &str) -> Vec<String> {
    vec!["checkout".to_string(), branch.to_string()]
}

pub fn checkout_new(branch: &str) -> Vec<String> {
    vec!["checkout".to_string(), "-b".to_string(), branch.to_string()]
}

pub fn add_all() -> Vec<String> {
    vec!["add".to_string(), "--all".to_string()]
}

pub fn add_force(path: &str) -> Vec<String> {
    vec!["add".to_string(), "--force".to_string(), path.to_string()]
}

pub fn commit(message: &str) -> Vec<String> {
    vec!["commit".to_string(), format!("--message={message}")]
}

pub fn push(url: &str, local_branch: &str, remote_branch: &str, flags: PushFlags) -> Vec<String> {
    let mut args = vec!["push".to_string()];

    if flags.prune {
        args.push("--prune".to_string());
    }
    if flags.force {
        args.push("--force".to_string());
    }
    if flags.quiet {
        args.push("--quiet".to_string());
    }

    args.push(url.to_string());
    args.push(format!("{local_branch}:{remote_branch}"));
    args
}
