//! The ordered list of steps one deploy performs
//!
//! A [`Plan`] is derived from the resolved config and a probe of the staging
//! directory taken before anything runs. It is plain data: `git-deploy plan`
//! prints it, and [`Pipeline`](super::Pipeline) executes it.

use crate::config::{DeployConfig, DeployMode};
use crate::constants::git::{GIT_DIR, IGNORE_FILE};
use crate::git::args;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// What the staging directory looked like before the run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StagingState {
    pub exists: bool,
    pub has_git: bool,
}

impl StagingState {
    pub fn probe(dir: &Path) -> Self {
        Self {
            exists: dir.exists(),
            has_git: dir.join(GIT_DIR).is_dir(),
        }
    }
}

/// What to do when a git step exits non-zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    Abort,
    /// Carry on only when git reported there was nothing to commit
    IgnoreNothingToCommit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "step", rename_all = "kebab-case")]
pub enum PipelineStep {
    Git {
        args: Vec<String>,
        dir: PathBuf,
        on_failure: FailurePolicy,
    },
    /// Copy the source tree (minus `.git`) into the staging directory
    CopyTree { from: PathBuf, to: PathBuf },
    /// Drop history acquired from the source before starting an orphan branch
    RemoveGitDir { path: PathBuf },
    BuildIgnore { dir: PathBuf },
    ForceAdd { dir: PathBuf },
}

impl PipelineStep {
    fn git(args: Vec<String>, dir: &Path) -> Self {
        PipelineStep::Git {
            args,
            dir: dir.to_path_buf(),
            on_failure: FailurePolicy::Abort,
        }
    }
}

impl fmt::Display for PipelineStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineStep::Git { args, dir, .. } => {
                write!(f, "git {} (in {})", args.join(" "), dir.display())
            }
            PipelineStep::CopyTree { from, to } => {
                write!(f, "copy {} -> {}", from.display(), to.display())
            }
            PipelineStep::RemoveGitDir { path } => write!(f, "remove {}", path.display()),
            PipelineStep::BuildIgnore { dir } => {
                write!(f, "write {}", dir.join(".gitignore").display())
            }
            PipelineStep::ForceAdd { dir } => write!(f, "force-add (in {})", dir.display()),
        }
    }
}

/// Paths put back when the run ends, whatever the outcome
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Cleanup {
    pub git_dir: Option<PathBuf>,
    pub staging_dir: Option<PathBuf>,
    /// Generated `.gitignore` written into the source itself; restored to
    /// its previous content, or removed when there was none
    pub ignore_file: Option<PathBuf>,
}

impl Cleanup {
    pub fn is_empty(&self) -> bool {
        self.git_dir.is_none() && self.staging_dir.is_none() && self.ignore_file.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plan {
    pub mode: DeployMode,
    pub work_dir: PathBuf,
    pub staging: StagingState,
    pub steps: Vec<PipelineStep>,
    pub cleanup: Cleanup,
}

impl Plan {
    pub fn build(config: &DeployConfig, staging: StagingState) -> Self {
        let work = config.work_dir().to_path_buf();
        let mut steps = Vec::new();

        // Acquire content, and possibly a repository, in the staging area
        let mut has_repo = staging.has_git;
        match (config.mode, config.dest.as_deref()) {
            (DeployMode::Incremental, Some(dest)) => {
                if !staging.has_git {
                    steps.push(PipelineStep::git(
                        args::clone_branch(&config.url, &config.remote_branch, dest),
                        &config.base_dir,
                    ));
                }
                if config.source_is_repo {
                    let source = config.source_repo();
                    steps.push(PipelineStep::git(args::fetch(&source), dest));
                    steps.push(PipelineStep::git(args::merge_fetch_head(), dest));
                } else {
                    steps.push(PipelineStep::CopyTree {
                        from: config.src.clone(),
                        to: dest.to_path_buf(),
                    });
                }
                steps.push(PipelineStep::git(args::unstage_all(), dest));
                has_repo = true;
            }
            (_, Some(dest)) => {
                if config.source_is_repo && !staging.exists {
                    steps.push(PipelineStep::git(
                        args::clone_local(&config.source_repo(), dest),
                        &config.base_dir,
                    ));
                    has_repo = true;
                } else if config.source_is_repo && staging.has_git {
                    steps.push(PipelineStep::git(args::pull(&config.source_repo()), dest));
                } else {
                    steps.push(PipelineStep::CopyTree {
                        from: config.src.clone(),
                        to: dest.to_path_buf(),
                    });
                }
            }
            (_, None) => {}
        }

        let mut fresh_repo = false;
        match config.mode {
            DeployMode::Orphan => {
                if has_repo {
                    steps.push(PipelineStep::RemoveGitDir {
                        path: work.join(GIT_DIR),
                    });
                }
                steps.push(PipelineStep::git(args::init(), &work));
            }
            DeployMode::NoOrphan if !has_repo => {
                steps.push(PipelineStep::git(args::init(), &work));
                fresh_repo = true;
            }
            _ => {}
        }

        if config.build_ignore {
            steps.push(PipelineStep::BuildIgnore { dir: work.clone() });
        }

        match config.mode {
            DeployMode::Orphan => {
                steps.push(PipelineStep::git(
                    args::checkout_orphan(&config.local_branch),
                    &work,
                ));
            }
            DeployMode::NoOrphan if fresh_repo => {
                steps.push(PipelineStep::git(
                    args::checkout_new(&config.local_branch),
                    &work,
                ));
            }
            DeployMode::NoOrphan => {
                steps.push(PipelineStep::git(args::checkout(&config.local_branch), &work));
                // Files tracked by earlier commits must answer to the new .gitignore
                steps.push(PipelineStep::git(args::unstage_all(), &work));
            }
            DeployMode::Incremental => {}
        }

        if !config.force_add.is_empty() {
            steps.push(PipelineStep::ForceAdd { dir: work.clone() });
        }

        steps.push(PipelineStep::git(args::add_all(), &work));
        steps.push(PipelineStep::Git {
            args: args::commit(&config.message),
            dir: work.clone(),
            on_failure: FailurePolicy::IgnoreNothingToCommit,
        });
        steps.push(PipelineStep::git(
            args::push(
                &config.url,
                &config.local_branch,
                &config.remote_branch,
                config.push_flags(),
            ),
            &work,
        ));

        let cleanup = if config.keep_dest {
            Cleanup::default()
        } else {
            Cleanup {
                git_dir: Some(work.join(GIT_DIR)),
                staging_dir: config.dest.clone(),
                ignore_file: (config.dest.is_none() && config.build_ignore)
                    .then(|| work.join(IGNORE_FILE)),
            }
        };

        Plan {
            mode: config.mode,
            work_dir: work,
            staging,
            steps,
            cleanup,
        }
    }

    /// Only the git invocations, in order
    pub fn git_commands(&self) -> Vec<String> {
        self.steps
            .iter()
            .filter_map(|step| match step {
                PipelineStep::Git { args, .. } => Some(args.join(" ")),
                _ => None,
            })
            .collect()
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "mode: {}", self.mode)?;
        writeln!(f, "work dir: {}", self.work_dir.display())?;
        for (index, step) in self.steps.iter().enumerate() {
            writeln!(f, "{:>2}. {}", index + 1, step)?;
        }
        if self.cleanup.is_empty() {
            write!(f, "cleanup: keep staging directory")
        } else {
            write!(f, "cleanup:")?;
            for path in [&self.cleanup.git_dir, &self.cleanup.staging_dir]
                .into_iter()
                .flatten()
            {
                write!(f, " remove {}", path.display())?;
            }
            if let Some(path) = &self.cleanup.ignore_file {
                write!(f, " restore {}", path.display())?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DeployOptionsBuilder, resolve};
    use std::fs;
    use tempfile::TempDir;

    const URL: &str = "git@example.com:site.git";

    fn workspace(source_is_repo: bool) -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("dist")).unwrap();
        if source_is_repo {
            fs::create_dir_all(temp_dir.path().join("dist/.git")).unwrap();
        }
        temp_dir
    }

    fn plan_for(ws: &TempDir, builder: DeployOptionsBuilder, staging: StagingState) -> Plan {
        let config = resolve(builder.build(), None, ws.path()).unwrap();
        Plan::build(&config, staging)
    }

    fn missing() -> StagingState {
        StagingState::default()
    }

    fn populated() -> StagingState {
        StagingState {
            exists: true,
            has_git: true,
        }
    }

    #[test]
    fn test_orphan_from_plain_source_without_dest() {
        let ws = workspace(false);
        let plan = plan_for(&ws, DeployOptionsBuilder::new(URL).with_src("dist"), missing());

        assert_eq!(
            plan.git_commands(),
            vec![
                "init",
                "checkout --orphan master",
                "add --all",
                "commit --message=git deploy",
                format!("push --prune --force --quiet {URL} master:master").as_str(),
            ]
        );
        assert!(matches!(plan.steps[1], PipelineStep::BuildIgnore { .. }));
        assert_eq!(plan.cleanup.git_dir, Some(ws.path().join("dist/.git")));
        assert_eq!(plan.cleanup.staging_dir, None);
        assert_eq!(
            plan.cleanup.ignore_file,
            Some(ws.path().join("dist/.gitignore"))
        );
        assert!(plan.to_string().contains("restore "));
    }

    #[test]
    fn test_orphan_from_repo_clones_then_drops_history() {
        let ws = workspace(true);
        let dest = ws.path().join("stage");
        let plan = plan_for(
            &ws,
            DeployOptionsBuilder::new(URL)
                .with_src("dist")
                .with_dest("stage"),
            missing(),
        );

        assert_eq!(
            plan.steps[0],
            PipelineStep::Git {
                args: args::clone_local(&ws.path().join("dist/.git"), &dest),
                dir: ws.path().to_path_buf(),
                on_failure: FailurePolicy::Abort,
            }
        );
        assert_eq!(
            plan.steps[1],
            PipelineStep::RemoveGitDir {
                path: dest.join(".git")
            }
        );
        assert_eq!(plan.cleanup.staging_dir, Some(dest));
        assert_eq!(plan.cleanup.ignore_file, None);
    }

    #[test]
    fn test_existing_staging_repo_is_pulled() {
        let ws = workspace(true);
        let plan = plan_for(
            &ws,
            DeployOptionsBuilder::new(URL)
                .with_src("dist")
                .with_dest("stage")
                .no_orphan(true),
            populated(),
        );

        let commands = plan.git_commands();
        assert!(commands[0].starts_with("pull --force "));
        assert_eq!(commands[1], "checkout master");
        assert_eq!(commands[2], "rm -r --cached --quiet --ignore-unmatch .");
        assert_eq!(commands[3], "add --all");
        assert!(!commands.iter().any(|c| c == "init"));
    }

    #[test]
    fn test_no_orphan_clone_unstages_before_adding() {
        let ws = workspace(true);
        let plan = plan_for(
            &ws,
            DeployOptionsBuilder::new(URL)
                .with_src("dist")
                .with_dest("stage")
                .no_orphan(true),
            missing(),
        );

        let ignore = plan
            .steps
            .iter()
            .position(|s| matches!(s, PipelineStep::BuildIgnore { .. }))
            .unwrap();
        let unstage = plan
            .steps
            .iter()
            .position(|s| s.to_string().starts_with("git rm -r --cached"))
            .unwrap();
        let add = plan
            .steps
            .iter()
            .position(|s| s.to_string().starts_with("git add --all"))
            .unwrap();
        assert!(ignore < unstage && unstage < add);
    }

    #[test]
    fn test_no_orphan_fresh_repo_creates_branch() {
        let ws = workspace(false);
        let plan = plan_for(
            &ws,
            DeployOptionsBuilder::new(URL)
                .with_src("dist")
                .with_dest("stage")
                .with_branches("main", "gh-pages")
                .no_orphan(true),
            missing(),
        );

        assert!(matches!(plan.steps[0], PipelineStep::CopyTree { .. }));
        assert_eq!(
            &plan.git_commands()[..3],
            &[
                "init".to_string(),
                "checkout -b main".to_string(),
                "add --all".to_string()
            ]
        );
        assert!(plan.git_commands()[4].ends_with("main:gh-pages"));
    }

    #[test]
    fn test_incremental_clones_remote_and_keeps_dest() {
        let ws = workspace(true);
        let plan = plan_for(
            &ws,
            DeployOptionsBuilder::new(URL)
                .with_src("dist")
                .with_dest("stage")
                .with_branches("master", "gh-pages")
                .incremental(true),
            missing(),
        );

        let commands = plan.git_commands();
        assert_eq!(
            commands[0],
            format!(
                "clone --branch gh-pages {URL} {}",
                ws.path().join("stage").display()
            )
        );
        assert!(commands[1].starts_with("fetch --force "));
        assert!(commands[2].starts_with("merge FETCH_HEAD --squash"));
        assert_eq!(commands[3], "rm -r --cached --quiet --ignore-unmatch .");
        assert!(commands.iter().any(|c| c.starts_with("commit")));
        assert!(!commands.iter().any(|c| c.starts_with("checkout")));
        assert!(plan.cleanup.is_empty());
    }

    #[test]
    fn test_incremental_reuses_existing_clone() {
        let ws = workspace(true);
        let plan = plan_for(
            &ws,
            DeployOptionsBuilder::new(URL)
                .with_src("dist")
                .with_dest("stage")
                .incremental(true),
            populated(),
        );
        assert!(plan.git_commands()[0].starts_with("fetch --force "));
    }

    #[test]
    fn test_force_add_and_no_build_ignore() {
        let ws = workspace(false);
        let plan = plan_for(
            &ws,
            DeployOptionsBuilder::new(URL)
                .with_src("dist")
                .with_force_add(&["vendor"])
                .build_ignore(false)
                .no_prune(true)
                .no_force(true),
            missing(),
        );

        assert!(
            !plan
                .steps
                .iter()
                .any(|s| matches!(s, PipelineStep::BuildIgnore { .. }))
        );
        let force_add = plan
            .steps
            .iter()
            .position(|s| matches!(s, PipelineStep::ForceAdd { .. }))
            .unwrap();
        assert_eq!(plan.steps[force_add + 1].to_string().split(' ').nth(1), Some("add"));
        assert_eq!(
            plan.git_commands().last().unwrap(),
            &format!("push --quiet {URL} master:master")
        );
    }

    #[test]
    fn test_commit_tolerates_nothing_to_commit() {
        let ws = workspace(false);
        let plan = plan_for(&ws, DeployOptionsBuilder::new(URL).with_src("dist"), missing());
        let commit = plan
            .steps
            .iter()
            .find(|s| s.to_string().starts_with("git commit"))
            .unwrap();
        assert!(matches!(
            commit,
            PipelineStep::Git {
                on_failure: FailurePolicy::IgnoreNothingToCommit,
                ..
            }
        ));
    }

    #[test]
    fn test_plan_serializes_with_step_tags() {
        let ws = workspace(false);
        let plan = plan_for(&ws, DeployOptionsBuilder::new(URL).with_src("dist"), missing());
        let json = serde_json::to_value(&plan).unwrap();

        assert_eq!(json["mode"], "orphan");
        assert_eq!(json["steps"][0]["step"], "git");
        assert_eq!(json["steps"][1]["step"], "build-ignore");
        assert_eq!(json["steps"][0]["on_failure"], "abort");
    }
}
