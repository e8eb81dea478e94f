//! Turn caller options into a validated, immutable [`DeployConfig`]
//!
//! Validation runs in a fixed order and stops at the first problem:
//!
//! 1. a remote URL is present (falling back to `GIT_DEPLOY_URL`)
//! 2. the source is an existing directory
//! 3. without a destination, the source must not be a git working copy,
//!    since the pipeline would run `init`, commit and delete `.git` inside it
//! 4. the destination neither equals nor contains the source
//! 5. incremental mode has a destination to keep between runs
//! 6. branch names are non-empty
//! 7. every ignore and force-add pattern compiles
//!
//! Nothing here touches the filesystem beyond reading metadata.

use super::{DeployOptions, GitUser};
use crate::constants::git::GIT_DIR;
use crate::error::{ConfigError, Result};
use crate::git::PushFlags;
use crate::utils::{is_git_working_copy, validate_pattern};
use serde::Serialize;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

/// How the deploy branch relates to earlier history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeployMode {
    /// Fresh branch with no parent commit; the remote branch is replaced
    Orphan,
    /// Commit on top of the history acquired from the source
    NoOrphan,
    /// Merge into the previously deployed branch and add one commit
    Incremental,
}

impl std::fmt::Display for DeployMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeployMode::Orphan => write!(f, "orphan"),
            DeployMode::NoOrphan => write!(f, "no-orphan"),
            DeployMode::Incremental => write!(f, "incremental"),
        }
    }
}

/// Resolved configuration for one deploy run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeployConfig {
    pub url: String,
    pub message: String,
    pub local_branch: String,
    pub remote_branch: String,
    /// Absolute source directory
    pub src: PathBuf,
    /// Absolute staging directory, when separate from the source
    pub dest: Option<PathBuf>,
    /// Directory for commands that run outside the staging area
    pub base_dir: PathBuf,
    pub ignore: Vec<String>,
    pub ignore_append: bool,
    pub build_ignore: bool,
    pub mode: DeployMode,
    pub prune: bool,
    pub force: bool,
    /// Keep the staging directory and its `.git` after the run
    pub keep_dest: bool,
    pub pretend: bool,
    pub quiet: bool,
    pub force_add: Vec<String>,
    pub user: Option<GitUser>,
    #[serde(skip)]
    pub timeout: Option<Duration>,
    /// Whether the source carried its own `.git` when the run was resolved
    pub source_is_repo: bool,
}

impl DeployConfig {
    /// Directory git runs in: the staging directory, or the source itself
    pub fn work_dir(&self) -> &Path {
        self.dest.as_deref().unwrap_or(&self.src)
    }

    pub fn work_git_dir(&self) -> PathBuf {
        self.work_dir().join(GIT_DIR)
    }

    /// Repository path handed to `clone`, `pull` and `fetch`
    ///
    /// The `.git` directory when there is one. A linked worktree only has a
    /// `.git` file, so git is pointed at the worktree itself.
    pub fn source_repo(&self) -> PathBuf {
        let git_dir = self.src.join(GIT_DIR);
        if git_dir.is_dir() {
            git_dir
        } else {
            self.src.clone()
        }
    }

    /// Staging directory that lives inside the source tree, if any
    ///
    /// Pattern expansion and tree copies must skip it.
    pub fn nested_staging(&self) -> Option<&Path> {
        self.dest.as_deref().filter(|dest| dest.starts_with(&self.src))
    }

    pub fn push_flags(&self) -> PushFlags {
        PushFlags {
            prune: self.prune,
            force: self.force,
            quiet: self.quiet,
        }
    }
}

/// Validate `options` and fill in defaults
///
/// `env_url` is the value of `GIT_DEPLOY_URL`, used when `options.url` is
/// unset. Relative paths are resolved against `base_dir`.
pub fn resolve(
    options: DeployOptions,
    env_url: Option<String>,
    base_dir: &Path,
) -> Result<DeployConfig> {
    let options = DeployOptions::defaults().merge(options);

    let url = options
        .url
        .or(env_url)
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .ok_or(ConfigError::MissingUrl)?;

    let src = options
        .src
        .map(|src| absolutize(base_dir, &src))
        .ok_or(ConfigError::MissingSource)?;
    if !src.is_dir() {
        return Err(ConfigError::InvalidSource(src).into());
    }

    let source_is_repo = is_git_working_copy(&src);
    let dest = options.dest.map(|dest| absolutize(base_dir, &dest));

    match &dest {
        None if source_is_repo => {
            return Err(ConfigError::WouldDestroyWorkingCopy(src).into());
        }
        Some(dest) if src.starts_with(dest) => {
            return Err(ConfigError::DestinationOverlapsSource {
                src,
                dest: dest.clone(),
            }
            .into());
        }
        _ => {}
    }

    let incremental = options.incremental.unwrap_or(false);
    if incremental && dest.is_none() {
        return Err(ConfigError::IncrementalWithoutDestination.into());
    }

    let local_branch = options.local_branch.unwrap_or_default();
    if local_branch.trim().is_empty() {
        return Err(ConfigError::EmptyBranch("local").into());
    }
    let remote_branch = options.remote_branch.unwrap_or_default();
    if remote_branch.trim().is_empty() {
        return Err(ConfigError::EmptyBranch("remote").into());
    }

    let ignore = options.ignore.unwrap_or_default();
    let force_add = options.force_add.unwrap_or_default();
    for pattern in ignore.iter().chain(force_add.iter()) {
        validate_pattern(pattern)?;
    }

    let mode = if incremental {
        DeployMode::Incremental
    } else if options.no_orphan.unwrap_or(false) {
        DeployMode::NoOrphan
    } else {
        DeployMode::Orphan
    };

    Ok(DeployConfig {
        url,
        message: options.message.unwrap_or_default(),
        local_branch,
        remote_branch,
        src,
        dest,
        base_dir: absolutize(base_dir, Path::new("")),
        ignore,
        ignore_append: options.ignore_append.unwrap_or(false),
        build_ignore: options.build_ignore.unwrap_or(true),
        mode,
        prune: !options.no_prune.unwrap_or(false),
        force: !options.no_force.unwrap_or(false),
        keep_dest: incremental,
        pretend: options.pretend.unwrap_or(false),
        quiet: options.quiet.unwrap_or(true),
        force_add,
        user: options.user,
        timeout: options
            .timeout
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs),
        source_is_repo,
    })
}

/// Join `path` onto `base` and fold away `.` and `..` without touching disk
fn absolutize(base: &Path, path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in base.join(path).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                result.pop();
            }
            other => result.push(other.as_os_str()),
        }
    }
    result
}
