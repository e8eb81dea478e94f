//! Git command runner
//!
//! Every git invocation made by a deploy goes through [`GitRunner::run`], which
//! owns the spawn/wait/error-mapping logic and the run-wide switches: pretend
//! mode, console verbosity, the commit identity and an optional timeout.

use super::common::Logger;
use crate::config::{DeployConfig, GitUser};
use crate::constants::git::GIT_BINARY;
use crate::error::{DeployError, Result};
use colored::*;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Captured result of a finished git process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitOutput {
    /// Exit code, `None` when nothing was spawned or the process was killed
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

#[derive(Debug, Clone)]
pub struct GitRunner {
    logger: Logger,
    program: String,
    pretend: bool,
    quiet: bool,
    timeout: Option<Duration>,
    envs: Vec<(String, String)>,
}

impl Default for GitRunner {
    fn default() -> Self {
        Self {
            logger: Logger,
            program: GIT_BINARY.to_string(),
            pretend: false,
            quiet: true,
            timeout: None,
            envs: Vec::new(),
        }
    }
}

impl GitRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a runner carrying the run-wide switches of a resolved config
    pub fn from_config(config: &DeployConfig) -> Self {
        Self::new()
            .pretend(config.pretend)
            .quiet(config.quiet)
            .timeout(config.timeout)
            .identity(config.user.as_ref())
    }

    /// Log commands instead of spawning them
    pub fn pretend(mut self, pretend: bool) -> Self {
        self.pretend = pretend;
        self
    }

    /// Keep git's own output off the console
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Kill git processes that run longer than `timeout`
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Author and commit as `user` instead of the ambient git identity
    pub fn identity(mut self, user: Option<&GitUser>) -> Self {
        self.envs.retain(|(key, _)| {
            !key.starts_with("GIT_AUTHOR_") && !key.starts_with("GIT_COMMITTER_")
        });
        if let Some(user) = user {
            for (key, value) in [
                ("GIT_AUTHOR_NAME", &user.name),
                ("GIT_AUTHOR_EMAIL", &user.email),
                ("GIT_COMMITTER_NAME", &user.name),
                ("GIT_COMMITTER_EMAIL", &user.email),
            ] {
                self.envs.push((key.to_string(), value.clone()));
            }
        }
        self
    }

    /// Use a different executable than `git`
    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Run git with `args` inside `dir` and wait for it to exit
    ///
    /// An empty argument list is a no-op. With `ignore_failure`, a non-zero
    /// exit, spawn failure or timeout is logged and reported as success.
    pub async fn run<S: AsRef<str>>(
        &self,
        args: &[S],
        dir: &Path,
        ignore_failure: bool,
    ) -> Result<GitOutput> {
        if args.is_empty() {
            return Ok(GitOutput::default());
        }

        let args: Vec<&str> = args.iter().map(|arg| arg.as_ref()).collect();
        let line = args.join(" ");

        if self.pretend {
            self.logger.would(
                "git",
                &format!("Would run {} {} in {}", self.program, line, dir.display()),
            );
            return Ok(GitOutput::default());
        }

        self.logger
            .info("git", &format!("Running {} {}", self.program, line.green()));

        let mut cmd = Command::new(&self.program);
        cmd.args(&args)
            .current_dir(dir)
            .stdin(Stdio::null())
            .kill_on_drop(true);
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }

        let spawned = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, cmd.output()).await {
                Ok(output) => output,
                Err(_) => {
                    let output = GitOutput {
                        code: None,
                        stdout: String::new(),
                        stderr: format!("timed out after {}s", limit.as_secs_f64()),
                    };
                    return self.fail(&line, dir, output, ignore_failure);
                }
            },
            None => cmd.output().await,
        };

        let output = match spawned {
            Ok(output) => output,
            Err(e) => {
                let output = GitOutput {
                    code: None,
                    stdout: String::new(),
                    stderr: format!("failed to execute {}: {}", self.program, e),
                };
                return self.fail(&line, dir, output, ignore_failure);
            }
        };

        let result = GitOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if !self.quiet {
            for stream in [&result.stdout, &result.stderr] {
                let text = stream.trim_end();
                if !text.is_empty() {
                    self.logger.info("git", text);
                }
            }
        }

        if output.status.success() {
            Ok(result)
        } else {
            self.fail(&line, dir, result, ignore_failure)
        }
    }

    fn fail(
        &self,
        line: &str,
        dir: &Path,
        output: GitOutput,
        ignore_failure: bool,
    ) -> Result<GitOutput> {
        let err = DeployError::Process {
            command: line.to_string(),
            dir: dir.to_path_buf(),
            code: output.code,
            stdout: output.stdout.clone(),
            stderr: output.stderr.clone(),
        };

        if ignore_failure {
            self.logger.warn("git", &format!("Ignoring failure: {err}"));
            Ok(output)
        } else {
            Err(err)
        }
    }
}
