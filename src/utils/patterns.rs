//! Glob expansion against a base directory
//!
//! Patterns are matched relative to the base directory and results are
//! returned as `/`-separated relative paths, deduplicated in the order they
//! were first matched. A `*` never crosses a `/`, and wildcards never match a
//! leading `.` unless the pattern spells the dot out (`.htaccess`, `.*`).
//!
//! A pattern prefixed with `!` removes earlier matches instead of adding new
//! ones, so `["assets/**", "!assets/*.psd"]` selects every asset except the
//! Photoshop files.

use crate::error::{ConfigError, DeployError, Result};
use crate::utils::filesystem::to_slash;
use glob::{MatchOptions, Pattern};
use std::collections::HashSet;
use std::path::Path;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Check that a pattern (with or without a leading `!`) compiles
pub fn validate_pattern(pattern: &str) -> Result<()> {
    compile(pattern.strip_prefix('!').unwrap_or(pattern))?;
    Ok(())
}

/// Expand patterns against `base`
pub fn expand(base: &Path, patterns: &[String]) -> Result<Vec<String>> {
    expand_filtered(base, patterns, |_| true)
}

/// Expand patterns against `base`, dropping matches for which `keep` is false
///
/// `keep` receives the absolute path of each match.
pub fn expand_filtered<F>(base: &Path, patterns: &[String], keep: F) -> Result<Vec<String>>
where
    F: Fn(&Path) -> bool,
{
    let mut matches: Vec<String> = Vec::new();
    let mut seen = HashSet::new();

    for pattern in patterns {
        if let Some(negated) = pattern.strip_prefix('!') {
            let exclude = compile(negated)?;
            matches.retain(|m| !exclude.matches_with(m, MATCH_OPTIONS));
            seen.retain(|m: &String| !exclude.matches_with(m, MATCH_OPTIONS));
            continue;
        }

        let anchored = pattern.trim_start_matches('/');
        compile(anchored)?;

        let full = format!(
            "{}/{}",
            Pattern::escape(&base.to_string_lossy()),
            anchored
        );
        let paths = glob::glob_with(&full, MATCH_OPTIONS).map_err(|e| {
            ConfigError::InvalidPattern {
                pattern: pattern.clone(),
                message: e.msg.to_string(),
            }
        })?;

        for entry in paths {
            let path = entry.map_err(|e| {
                let context = format!("expanding '{}' in {}", pattern, base.display());
                DeployError::io(context, e.into_error())
            })?;

            if !keep(&path) {
                continue;
            }

            let relative = match path.strip_prefix(base) {
                Ok(relative) => to_slash(relative),
                Err(_) => continue,
            };

            if !relative.is_empty() && seen.insert(relative.clone()) {
                matches.push(relative);
            }
        }
    }

    Ok(matches)
}

fn compile(pattern: &str) -> Result<Pattern> {
    Pattern::new(pattern).map_err(|e| {
        ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.msg.to_string(),
        }
        .into()
    })
}
