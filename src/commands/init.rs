//! Init command implementation

use super::{Command, CommandContext};
use crate::config::DeployOptions;
use anyhow::Result;
use async_trait::async_trait;
use colored::*;

/// Write a config file holding the documented defaults
pub struct InitCommand {
    pub output: String,
    pub overwrite: bool,
}

#[async_trait]
impl Command for InitCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        let path = context.cwd.join(&self.output);
        if path.exists() && !self.overwrite {
            return Err(anyhow::anyhow!(
                "Output file '{}' already exists. Use --overwrite to replace it.",
                self.output
            ));
        }

        // Values given on the command line are written too
        let options = DeployOptions::defaults().merge(context.options.clone());
        options.save(&path)?;

        println!(
            "{}",
            format!("Configuration saved to '{}'", self.output).green()
        );

        Ok(())
    }
}
