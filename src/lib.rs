//! git-deploy - Publish the contents of a directory to a branch of a remote
//! git repository

pub mod commands;
pub mod config;
pub mod constants;
pub mod deploy;
pub mod error;
pub mod git;
pub mod utils;

pub use error::{ConfigError, DeployError, Result};

// Re-export commonly used types
pub use commands::{Command, CommandContext};
pub use config::{DeployConfig, DeployMode, DeployOptions, DeployOptionsBuilder, resolve};
pub use deploy::{Pipeline, Plan, deploy};

/// Resolve `options` against the current directory and `GIT_DEPLOY_URL`, then
/// run the deploy
pub async fn run(options: DeployOptions) -> Result<()> {
    let cwd = std::env::current_dir()
        .map_err(|e| DeployError::io("reading the current directory", e))?;
    let env_url = std::env::var(constants::config::URL_ENV_VAR).ok();
    deploy(resolve(options, env_url, &cwd)?).await
}
