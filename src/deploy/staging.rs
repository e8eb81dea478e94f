//! Staging area lifetime
//!
//! [`StagingArea`] owns the cleanup of one run. Call [`StagingArea::release`]
//! to clean up and see errors; if the guard is dropped instead (early return,
//! panic) cleanup still runs and failures are only logged.

use super::plan::Cleanup;
use crate::error::{DeployError, Result};
use crate::git::Logger;
use crate::utils::remove_dir_if_exists;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

pub struct StagingArea {
    cleanup: Cleanup,
    /// Content of the source `.gitignore` before the run; `None` if absent
    saved_ignore: Option<Vec<u8>>,
    pretend: bool,
    released: bool,
    logger: Logger,
}

impl StagingArea {
    /// Take charge of the paths in `cleanup`
    ///
    /// A `.gitignore` scheduled for restoring is read now, before the run
    /// overwrites it.
    pub fn acquire(cleanup: Cleanup, pretend: bool) -> Result<Self> {
        let logger = Logger;
        if let Some(dir) = &cleanup.staging_dir {
            logger.info(
                "stage",
                &format!("Using {} as staging directory", dir.display()),
            );
        }

        let saved_ignore = match &cleanup.ignore_file {
            Some(path) if !pretend => match fs::read(path) {
                Ok(content) => Some(content),
                Err(e) if e.kind() == ErrorKind::NotFound => None,
                Err(e) => {
                    return Err(DeployError::io(format!("reading {}", path.display()), e));
                }
            },
            _ => None,
        };

        Ok(Self {
            cleanup,
            saved_ignore,
            pretend,
            released: false,
            logger,
        })
    }

    /// Remove the paths scheduled for cleanup
    pub fn release(mut self) -> Result<()> {
        self.released = true;
        self.clean()
    }

    fn clean(&self) -> Result<()> {
        let mut first_error = None;

        if let Some(path) = &self.cleanup.ignore_file {
            if let Err(e) = self.restore_ignore(path) {
                first_error.get_or_insert(e);
            }
        }

        for path in [&self.cleanup.git_dir, &self.cleanup.staging_dir]
            .into_iter()
            .flatten()
        {
            if let Err(e) = self.remove(path) {
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn remove(&self, path: &Path) -> Result<()> {
        if self.pretend {
            if path.exists() {
                self.logger
                    .would("stage", &format!("Would remove {}", path.display()));
            }
            return Ok(());
        }

        if remove_dir_if_exists(path)? {
            self.logger
                .info("stage", &format!("Removed {}", path.display()));
        }
        Ok(())
    }

    fn restore_ignore(&self, path: &Path) -> Result<()> {
        if self.pretend {
            return Ok(());
        }

        match &self.saved_ignore {
            Some(content) => {
                fs::write(path, content)
                    .map_err(|e| DeployError::io(format!("restoring {}", path.display()), e))?;
                self.logger
                    .info("stage", &format!("Restored {}", path.display()));
            }
            None => match fs::remove_file(path) {
                Ok(()) => self
                    .logger
                    .info("stage", &format!("Removed {}", path.display())),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(DeployError::io(format!("removing {}", path.display()), e));
                }
            },
        }
        Ok(())
    }
}

impl Drop for StagingArea {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(e) = self.clean() {
            self.logger.error("stage", &format!("Cleanup failed: {e}"));
        }
    }
}
