//! Caller-supplied deploy options
//!
//! Every field is optional so options from different sources (config file,
//! command line) can be layered with [`DeployOptions::merge`] before the
//! resolver fills in defaults.

use crate::constants::{config, git};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Identity used for the deploy commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitUser {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeployOptions {
    /// Remote repository to push to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_branch: Option<String>,
    /// Directory whose contents get deployed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<PathBuf>,
    /// Staging directory; without one git runs inside `src`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dest: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_append: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiet: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_ignore: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pretend: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_add: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_orphan: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_prune: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_force: Option<bool>,
    /// Merge into the previous deploy and keep the staging directory
    #[serde(alias = "keepDest", skip_serializing_if = "Option::is_none")]
    pub incremental: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<GitUser>,
    /// Seconds a single git process may run before it is killed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

impl DeployOptions {
    /// The documented defaults, fully spelled out
    pub fn defaults() -> Self {
        Self {
            url: None,
            message: Some(git::DEFAULT_COMMIT_MSG.to_string()),
            local_branch: Some(git::DEFAULT_BRANCH.to_string()),
            remote_branch: Some(git::DEFAULT_BRANCH.to_string()),
            src: None,
            dest: None,
            ignore: Some(config::DEFAULT_IGNORE.iter().map(|p| p.to_string()).collect()),
            ignore_append: Some(false),
            quiet: Some(true),
            build_ignore: Some(true),
            pretend: Some(false),
            force_add: Some(Vec::new()),
            no_orphan: Some(false),
            no_prune: Some(false),
            no_force: Some(false),
            incremental: Some(false),
            user: None,
            timeout: None,
        }
    }

    /// Layer `overrides` on top of `self`; any value set in `overrides` wins
    pub fn merge(self, overrides: DeployOptions) -> DeployOptions {
        DeployOptions {
            url: overrides.url.or(self.url),
            message: overrides.message.or(self.message),
            local_branch: overrides.local_branch.or(self.local_branch),
            remote_branch: overrides.remote_branch.or(self.remote_branch),
            src: overrides.src.or(self.src),
            dest: overrides.dest.or(self.dest),
            ignore: overrides.ignore.or(self.ignore),
            ignore_append: overrides.ignore_append.or(self.ignore_append),
            quiet: overrides.quiet.or(self.quiet),
            build_ignore: overrides.build_ignore.or(self.build_ignore),
            pretend: overrides.pretend.or(self.pretend),
            force_add: overrides.force_add.or(self.force_add),
            no_orphan: overrides.no_orphan.or(self.no_orphan),
            no_prune: overrides.no_prune.or(self.no_prune),
            no_force: overrides.no_force.or(self.no_force),
            incremental: overrides.incremental.or(self.incremental),
            user: overrides.user.or(self.user),
            timeout: overrides.timeout.or(self.timeout),
        }
    }
}
