//! Common git utilities and shared helpers
//!
//! This module contains utilities that are shared across the deploy steps,
//! such as console logging.

use colored::*;

/// Logger for deploy operations with consistent formatting
///
/// Every message is prefixed with a short scope (`git`, `ignore`, `stage`,
/// ...) in cyan/bold so a run's output can be scanned by step.
///
/// ## Example
///
/// ```rust,no_run
/// use git_deploy::git::Logger;
///
/// let logger = Logger::default();
/// logger.info("stage", "Using /tmp/site as staging directory");
/// logger.success("push", "Deployed to gh-pages");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct Logger;

impl Logger {
    pub fn info(&self, scope: &str, msg: &str) {
        println!("{} | {}", scope.cyan().bold(), msg);
    }

    pub fn success(&self, scope: &str, msg: &str) {
        println!("{} | {}", scope.cyan().bold(), msg.green());
    }

    pub fn warn(&self, scope: &str, msg: &str) {
        println!("{} | {}", scope.cyan().bold(), msg.yellow());
    }

    pub fn error(&self, scope: &str, msg: &str) {
        eprintln!("{} | {}", scope.cyan().bold(), msg.red());
    }

    /// Log an action that pretend mode skipped
    pub fn would(&self, scope: &str, msg: &str) {
        println!("{} | {} {}", scope.cyan().bold(), "[pretend]".magenta(), msg);
    }
}
