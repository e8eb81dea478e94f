//! Plan command implementation

use super::{Command, CommandContext};
use crate::config::resolve;
use crate::deploy::Pipeline;
use anyhow::Result;
use async_trait::async_trait;

/// Print the steps a deploy would run without running any of them
pub struct PlanCommand {
    pub json: bool,
}

#[async_trait]
impl Command for PlanCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        let config = resolve(
            context.options.clone(),
            context.env_url.clone(),
            &context.cwd,
        )?;
        let plan = Pipeline::new(config).plan();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&plan)?);
        } else {
            println!("{plan}");
        }

        Ok(())
    }
}
