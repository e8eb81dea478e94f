//! Generated `.gitignore` for the staging directory
//!
//! Patterns are expanded against the source tree up front rather than copied
//! verbatim. A `!path` line in an ignore file only re-includes what an earlier
//! *pattern* excluded, so negations are expanded to concrete paths and written
//! after every plain match.

use crate::constants::git::IGNORE_FILE;
use crate::error::{DeployError, Result};
use crate::git::Logger;
use crate::utils::expand_filtered;
use std::fs;
use std::path::{Path, PathBuf};

pub struct IgnoreFileBuilder<'a> {
    src: &'a Path,
    exclude: Option<&'a Path>,
    logger: Logger,
}

impl<'a> IgnoreFileBuilder<'a> {
    pub fn new(src: &'a Path) -> Self {
        Self {
            src,
            exclude: None,
            logger: Logger,
        }
    }

    /// Leave matches under `dir` out of the generated file
    pub fn excluding(mut self, dir: Option<&'a Path>) -> Self {
        self.exclude = dir;
        self
    }

    /// Compute the ignore file content
    ///
    /// With `append_existing`, the source's own `.gitignore` comes first.
    pub fn build(&self, patterns: &[String], append_existing: bool) -> Result<String> {
        let mut content = String::new();

        if append_existing {
            let existing = self.src.join(IGNORE_FILE);
            if existing.is_file() {
                content = fs::read_to_string(&existing).map_err(|e| {
                    DeployError::io(format!("reading {}", existing.display()), e)
                })?;
                if !content.is_empty() && !content.ends_with('\n') {
                    content.push('\n');
                }
            }
        }

        let (negations, plain): (Vec<&String>, Vec<&String>) =
            patterns.iter().partition(|p| p.starts_with('!'));

        let keep = |path: &Path| self.exclude.is_none_or(|dir| !path.starts_with(dir));

        let plain: Vec<String> = plain.into_iter().cloned().collect();
        let mut lines = expand_filtered(self.src, &plain, keep)?;

        let negated: Vec<String> = negations
            .into_iter()
            .map(|p| p.trim_start_matches('!').to_string())
            .collect();
        for pattern in negated {
            let matches = expand_filtered(self.src, std::slice::from_ref(&pattern), keep)?;
            lines.extend(matches.into_iter().map(|m| format!("!{m}")));
        }

        content.push_str(&lines.join("\n"));
        Ok(content)
    }

    /// Build the content and write it to `<staging>/.gitignore`
    ///
    /// In pretend mode the content is logged and nothing is written.
    pub fn build_and_write(
        &self,
        patterns: &[String],
        append_existing: bool,
        staging: &Path,
        pretend: bool,
    ) -> Result<String> {
        let content = self.build(patterns, append_existing)?;
        let target: PathBuf = staging.join(IGNORE_FILE);

        if pretend {
            for line in preview(&target, &content) {
                self.logger.would("ignore", &line);
            }
            return Ok(content);
        }

        self.logger
            .info("ignore", &format!("Creating {}", target.display()));
        fs::write(&target, &content)
            .map_err(|e| DeployError::io(format!("writing {}", target.display()), e))?;

        Ok(content)
    }
}

/// Pretend-mode log lines for a file that would be written
fn preview(target: &Path, content: &str) -> Vec<String> {
    std::iter::once(format!("Would write {} with contents:", target.display()))
        .chain(content.lines().map(|line| format!("  {line}")))
        .collect()
}
