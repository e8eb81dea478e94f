//! Base types and traits for the command pattern

use crate::config::DeployOptions;
use anyhow::Result;
use std::path::PathBuf;

/// Context passed to all commands containing the merged options
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Options from the config file with command line values layered on top
    pub options: DeployOptions,
    /// Directory relative paths are resolved against
    pub cwd: PathBuf,
    /// Value of `GIT_DEPLOY_URL`, used when no URL was given
    pub env_url: Option<String>,
}

impl CommandContext {
    pub fn new(options: DeployOptions, cwd: PathBuf) -> Self {
        Self {
            options,
            cwd,
            env_url: None,
        }
    }

    /// Pick up the remote URL fallback from the environment
    pub fn with_env(mut self) -> Self {
        self.env_url = std::env::var(crate::constants::config::URL_ENV_VAR).ok();
        self
    }
}

/// Trait that all commands must implement
#[async_trait::async_trait]
pub trait Command {
    /// Execute the command with the given context
    async fn execute(&self, context: &CommandContext) -> Result<()>;
}
