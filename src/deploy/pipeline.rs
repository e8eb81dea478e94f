//! Deploy pipeline execution

use super::force_add;
use super::ignore::IgnoreFileBuilder;
use super::plan::{FailurePolicy, Plan, PipelineStep, StagingState};
use super::staging::StagingArea;
use crate::config::DeployConfig;
use crate::error::Result;
use crate::git::{GitRunner, Logger};
use crate::utils::{copy_tree, ensure_directory_exists, remove_dir_if_exists};
use std::path::Path;

pub struct Pipeline {
    config: DeployConfig,
    runner: GitRunner,
    logger: Logger,
}

impl Pipeline {
    pub fn new(config: DeployConfig) -> Self {
        let runner = GitRunner::from_config(&config);
        Self {
            config,
            runner,
            logger: Logger,
        }
    }

    /// Probe the staging directory and derive the steps of this run
    pub fn plan(&self) -> Plan {
        Plan::build(&self.config, StagingState::probe(self.config.work_dir()))
    }

    /// Execute the deploy
    ///
    /// Steps run in order and the first failure stops the run. Cleanup happens
    /// whatever the outcome; a cleanup failure is only reported when every
    /// step succeeded.
    pub async fn run(&self) -> Result<()> {
        let plan = self.plan();
        self.logger.info(
            "deploy",
            &format!(
                "Deploying {} to {} ({} mode)",
                self.config.src.display(),
                self.config.url,
                plan.mode
            ),
        );

        let staging = StagingArea::acquire(plan.cleanup.clone(), self.config.pretend)?;
        let outcome = self.execute(&plan.steps).await;
        let released = staging.release();

        match outcome {
            Ok(()) => {
                released?;
                self.logger.success(
                    "deploy",
                    &format!(
                        "Pushed {} to {}:{}",
                        self.config.local_branch, self.config.url, self.config.remote_branch
                    ),
                );
                Ok(())
            }
            Err(e) => {
                if let Err(cleanup) = released {
                    self.logger
                        .error("stage", &format!("Cleanup failed: {cleanup}"));
                }
                Err(e)
            }
        }
    }

    async fn execute(&self, steps: &[PipelineStep]) -> Result<()> {
        for step in steps {
            self.run_step(step).await?;
        }
        Ok(())
    }

    async fn run_step(&self, step: &PipelineStep) -> Result<()> {
        match step {
            PipelineStep::Git {
                args,
                dir,
                on_failure,
            } => match on_failure {
                FailurePolicy::Abort => self.runner.run(args, dir, false).await.map(|_| ()),
                FailurePolicy::IgnoreNothingToCommit => {
                    match self.runner.run(args, dir, false).await {
                        Ok(_) => Ok(()),
                        Err(e) if e.is_nothing_to_commit() => {
                            self.logger.warn("git", "Nothing to commit");
                            Ok(())
                        }
                        Err(e) => Err(e),
                    }
                }
            },
            PipelineStep::CopyTree { from, to } => self.copy_source(from, to),
            PipelineStep::RemoveGitDir { path } => {
                if self.config.pretend {
                    self.logger
                        .would("stage", &format!("Would remove {}", path.display()));
                } else if remove_dir_if_exists(path)? {
                    self.logger
                        .info("stage", &format!("Removed {}", path.display()));
                }
                Ok(())
            }
            PipelineStep::BuildIgnore { dir } => {
                IgnoreFileBuilder::new(&self.config.src)
                    .excluding(self.config.nested_staging())
                    .build_and_write(
                        &self.config.ignore,
                        self.config.ignore_append,
                        dir,
                        self.config.pretend,
                    )?;
                Ok(())
            }
            PipelineStep::ForceAdd { dir } => {
                force_add::run(&self.config, &self.runner, dir).await?;
                Ok(())
            }
        }
    }

    fn copy_source(&self, from: &Path, to: &Path) -> Result<()> {
        if self.config.pretend {
            self.logger.would(
                "stage",
                &format!("Would copy {} to {}", from.display(), to.display()),
            );
            return Ok(());
        }

        ensure_directory_exists(to)?;
        let skip: Vec<&Path> = self.config.nested_staging().into_iter().collect();
        let copied = copy_tree(from, to, &skip)?;
        self.logger.info(
            "stage",
            &format!("Copied {} files to {}", copied, to.display()),
        );
        Ok(())
    }
}

/// Run a deploy for an already resolved config
pub async fn deploy(config: DeployConfig) -> Result<()> {
    Pipeline::new(config).run().await
}
