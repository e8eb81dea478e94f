//! Force-add paths that the ignore file would otherwise exclude

use crate::config::DeployConfig;
use crate::error::Result;
use crate::git::{GitRunner, Logger, args};
use crate::utils::{copy_file, copy_tree, expand_filtered};
use std::path::Path;

/// Expand force-add patterns against the source, skipping a nested staging dir
pub fn collect(config: &DeployConfig) -> Result<Vec<String>> {
    let nested = config.nested_staging();
    expand_filtered(&config.src, &config.force_add, |path| {
        nested.is_none_or(|dir| !path.starts_with(dir))
    })
}

/// Drop every match that lives under another match
///
/// Adding `vendor` already adds `vendor/lib.js`; one `add --force` per
/// top-level path is enough.
pub fn top_level(matches: &[String]) -> Vec<String> {
    matches
        .iter()
        .filter(|candidate| {
            let candidate = Path::new(candidate.as_str());
            !matches.iter().any(|other| {
                let other = Path::new(other.as_str());
                other != candidate && candidate.starts_with(other)
            })
        })
        .cloned()
        .collect()
}

/// Copy force-added paths into `work_dir` and stage them with `add --force`
///
/// Returns the number of paths staged.
pub async fn run(config: &DeployConfig, runner: &GitRunner, work_dir: &Path) -> Result<usize> {
    let logger = Logger;
    let matches = collect(config)?;
    if matches.is_empty() {
        logger.warn("force-add", "No files matched the force-add patterns");
        return Ok(0);
    }

    let bases = top_level(&matches);
    let copy_needed = work_dir != config.src.as_path();
    let skip: Vec<&Path> = config.nested_staging().into_iter().collect();

    for base in &bases {
        let from = config.src.join(base);
        let to = work_dir.join(base);

        if copy_needed {
            if config.pretend {
                logger.would("force-add", &format!("Would copy {base}"));
            } else if from.is_dir() {
                copy_tree(&from, &to, &skip)?;
            } else {
                copy_file(&from, &to)?;
            }
        }

        logger.info("force-add", &format!("Force adding {base}"));
        runner.run(&args::add_force(base), work_dir, false).await?;
    }

    Ok(bases.len())
}
