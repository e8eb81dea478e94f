//! Error types for the deploy pipeline
//!
//! Every failure a deploy run can hit falls into one of three kinds:
//!
//! - [`DeployError::Config`]: the options could not be turned into a runnable
//!   [`DeployConfig`](crate::config::DeployConfig). Always raised before any
//!   git process is spawned.
//! - [`DeployError::Process`]: git exited non-zero, could not be spawned, or
//!   ran past its timeout.
//! - [`DeployError::Io`]: a filesystem read, write, copy or delete failed.
//!
//! The CLI layer wraps these in `anyhow` for printing.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, DeployError>;

/// Reasons a set of options is rejected by the resolver
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error(
        "missing remote URL: set `url` in the config or the {} environment variable",
        crate::constants::config::URL_ENV_VAR
    )]
    MissingUrl,

    #[error("invalid source: {0} is not a directory")]
    InvalidSource(PathBuf),

    #[error("no source directory given")]
    MissingSource,

    #[error(
        "no destination defined, would destroy working copy at {0}; set `dest` to a staging directory"
    )]
    WouldDestroyWorkingCopy(PathBuf),

    #[error("destination {dest} overlaps source {src}")]
    DestinationOverlapsSource { src: PathBuf, dest: PathBuf },

    #[error("incremental deploys need a destination directory to keep between runs")]
    IncrementalWithoutDestination,

    #[error("{0} branch name cannot be empty")]
    EmptyBranch(&'static str),

    #[error("invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

/// Main error type for deploy operations
#[derive(Error, Debug)]
pub enum DeployError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A git invocation failed.
    ///
    /// `code` is `None` when the process could not be spawned, was killed by a
    /// signal, or timed out.
    #[error("git {command} failed in {}{}: {}", dir.display(), code.map(|c| format!(" (exit code {c})")).unwrap_or_default(), stderr.trim())]
    Process {
        command: String,
        dir: PathBuf,
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    #[error("I/O error while {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl DeployError {
    /// Wrap an I/O error with a short description of what was being attempted
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        DeployError::Io {
            context: context.into(),
            source,
        }
    }

    /// True when git refused to commit because the index matched HEAD
    pub fn is_nothing_to_commit(&self) -> bool {
        match self {
            DeployError::Process {
                code: Some(_),
                stdout,
                stderr,
                ..
            } => crate::constants::git::NOTHING_TO_COMMIT
                .iter()
                .any(|needle| stdout.contains(needle) || stderr.contains(needle)),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn process_error(code: Option<i32>, stdout: &str, stderr: &str) -> DeployError {
        DeployError::Process {
            command: "commit --message=x".to_string(),
            dir: PathBuf::from("/tmp/stage"),
            code,
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        }
    }

    #[test]
    fn test_nothing_to_commit_detection() {
        let err = process_error(
            Some(1),
            "On branch master\nnothing to commit, working tree clean\n",
            "",
        );
        assert!(err.is_nothing_to_commit());

        let err = process_error(
            Some(1),
            "",
            "nothing added to commit but untracked files present",
        );
        assert!(err.is_nothing_to_commit());
    }

    #[test]
    fn test_other_commit_failures_are_not_benign() {
        let err = process_error(Some(128), "", "fatal: unable to write new index file");
        assert!(!err.is_nothing_to_commit());

        let err = process_error(None, "nothing to commit", "");
        assert!(!err.is_nothing_to_commit());

        let err = DeployError::io("writing", std::io::Error::other("disk full"));
        assert!(!err.is_nothing_to_commit());
    }

    #[test]
    fn test_process_error_display_includes_context() {
        let err = process_error(Some(128), "", "fatal: not a git repository\n");
        let message = err.to_string();
        assert!(message.contains("git commit --message=x"));
        assert!(message.contains("/tmp/stage"));
        assert!(message.contains("exit code 128"));
        assert!(message.contains("fatal: not a git repository"));
    }

    #[test]
    fn test_config_error_converts() {
        let err: DeployError = ConfigError::MissingUrl.into();
        assert!(matches!(err, DeployError::Config(ConfigError::MissingUrl)));
        assert!(err.to_string().contains("missing remote URL"));
    }
}
