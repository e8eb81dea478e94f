//! Deploy command implementation

use super::{Command, CommandContext};
use crate::config::resolve;
use crate::deploy::Pipeline;
use anyhow::Result;
use async_trait::async_trait;

/// Resolve the options and run the pipeline
pub struct DeployCommand;

#[async_trait]
impl Command for DeployCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        let config = resolve(
            context.options.clone(),
            context.env_url.clone(),
            &context.cwd,
        )?;
        Pipeline::new(config).run().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeployOptions;
    use crate::error::{ConfigError, DeployError};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_url_fails_before_any_work() {
        let temp_dir = TempDir::new().unwrap();
        let context = CommandContext::new(
            DeployOptions {
                src: Some(".".into()),
                ..Default::default()
            },
            temp_dir.path().to_path_buf(),
        );

        let err = DeployCommand.execute(&context).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DeployError>(),
            Some(DeployError::Config(ConfigError::MissingUrl))
        ));
        assert!(!temp_dir.path().join(".git").exists());
    }
}
