//! File system utility functions

use crate::constants::git::GIT_DIR;
use crate::error::{DeployError, Result};
use std::fs;
use std::path::{Component, Path};
use walkdir::WalkDir;

/// Ensure a directory exists, creating it if necessary
pub fn ensure_directory_exists(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .map_err(|e| DeployError::io(format!("creating {}", path.display()), e))
}

/// Check whether a directory carries its own git metadata
///
/// Linked worktrees and submodule checkouts have a `.git` file pointing at
/// the real repository; they count as working copies too.
pub fn is_git_working_copy(path: &Path) -> bool {
    fs::symlink_metadata(path.join(GIT_DIR)).is_ok()
}

/// Remove a directory tree, returning whether anything was removed
pub fn remove_dir_if_exists(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    fs::remove_dir_all(path)
        .map_err(|e| DeployError::io(format!("removing {}", path.display()), e))?;
    Ok(true)
}

/// Copy a single file, creating the destination's parent directories
pub fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if let Some(parent) = to.parent() {
        ensure_directory_exists(parent)?;
    }
    fs::copy(from, to).map_err(|e| {
        DeployError::io(format!("copying {} to {}", from.display(), to.display()), e)
    })?;
    Ok(())
}

/// Copy a directory tree into `to`, returning the number of files copied
///
/// Git metadata directories are never copied, and any path under one of the
/// `skip` prefixes is left out (used when the destination lives inside the
/// source).
pub fn copy_tree(from: &Path, to: &Path, skip: &[&Path]) -> Result<usize> {
    let mut copied = 0;

    let walker = WalkDir::new(from).into_iter().filter_entry(|entry| {
        entry.file_name() != GIT_DIR && !skip.iter().any(|s| entry.path().starts_with(s))
    });

    for entry in walker {
        let entry = entry.map_err(|e| {
            let context = format!("walking {}", from.display());
            match e.into_io_error() {
                Some(source) => DeployError::io(context, source),
                None => DeployError::io(context, std::io::Error::other("filesystem loop")),
            }
        })?;

        let relative = entry.path().strip_prefix(from).unwrap_or(entry.path());
        let target = to.join(relative);

        if entry.file_type().is_dir() {
            ensure_directory_exists(&target)?;
        } else {
            copy_file(entry.path(), &target)?;
            copied += 1;
        }
    }

    Ok(copied)
}

/// Render a relative path with `/` separators regardless of platform
pub fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
