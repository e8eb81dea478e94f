//! Deploy options builder utilities

use super::{DeployOptions, GitUser};
use std::path::PathBuf;

/// Builder for assembling deploy options in code
#[derive(Debug, Clone, Default)]
pub struct DeployOptionsBuilder {
    options: DeployOptions,
}

impl DeployOptionsBuilder {
    /// Create a new builder targeting the given remote
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            options: DeployOptions {
                url: Some(url.into()),
                ..Default::default()
            },
        }
    }

    /// Set the directory whose contents get deployed
    pub fn with_src(mut self, src: impl Into<PathBuf>) -> Self {
        self.options.src = Some(src.into());
        self
    }

    /// Set the staging directory
    pub fn with_dest(mut self, dest: impl Into<PathBuf>) -> Self {
        self.options.dest = Some(dest.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.options.message = Some(message.into());
        self
    }

    /// Set the local and remote branch names
    pub fn with_branches(mut self, local: impl Into<String>, remote: impl Into<String>) -> Self {
        self.options.local_branch = Some(local.into());
        self.options.remote_branch = Some(remote.into());
        self
    }

    /// Replace the ignore pattern list
    pub fn with_ignore(mut self, patterns: &[&str]) -> Self {
        self.options.ignore = Some(patterns.iter().map(|p| p.to_string()).collect());
        self
    }

    /// Set the force-add pattern list
    pub fn with_force_add(mut self, patterns: &[&str]) -> Self {
        self.options.force_add = Some(patterns.iter().map(|p| p.to_string()).collect());
        self
    }

    pub fn with_user(mut self, name: impl Into<String>, email: impl Into<String>) -> Self {
        self.options.user = Some(GitUser {
            name: name.into(),
            email: email.into(),
        });
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.options.timeout = Some(seconds);
        self
    }

    pub fn ignore_append(mut self, append: bool) -> Self {
        self.options.ignore_append = Some(append);
        self
    }

    pub fn build_ignore(mut self, build: bool) -> Self {
        self.options.build_ignore = Some(build);
        self
    }

    pub fn pretend(mut self, pretend: bool) -> Self {
        self.options.pretend = Some(pretend);
        self
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.options.quiet = Some(quiet);
        self
    }

    pub fn no_orphan(mut self, no_orphan: bool) -> Self {
        self.options.no_orphan = Some(no_orphan);
        self
    }

    pub fn no_prune(mut self, no_prune: bool) -> Self {
        self.options.no_prune = Some(no_prune);
        self
    }

    pub fn no_force(mut self, no_force: bool) -> Self {
        self.options.no_force = Some(no_force);
        self
    }

    pub fn incremental(mut self, incremental: bool) -> Self {
        self.options.incremental = Some(incremental);
        self
    }

    /// Build the options
    pub fn build(self) -> DeployOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_basic_creation() {
        let options = DeployOptionsBuilder::new("https://github.com/user/site.git").build();
        assert_eq!(
            options.url.as_deref(),
            Some("https://github.com/user/site.git")
        );
        assert!(options.src.is_none());
        assert!(options.ignore.is_none());
    }

    #[test]
    fn test_builder_with_all_options() {
        let options = DeployOptionsBuilder::new("git@github.com:user/site.git")
            .with_src("dist")
            .with_dest(".deploy")
            .with_message("Publish")
            .with_branches("main", "gh-pages")
            .with_ignore(&["*.map"])
            .with_force_add(&["vendor/**"])
            .with_user("Bot", "bot@example.com")
            .with_timeout(30)
            .ignore_append(true)
            .build_ignore(false)
            .pretend(true)
            .quiet(false)
            .no_orphan(true)
            .no_prune(true)
            .no_force(true)
            .incremental(true)
            .build();

        assert_eq!(options.src, Some(PathBuf::from("dist")));
        assert_eq!(options.dest, Some(PathBuf::from(".deploy")));
        assert_eq!(options.message.as_deref(), Some("Publish"));
        assert_eq!(options.local_branch.as_deref(), Some("main"));
        assert_eq!(options.remote_branch.as_deref(), Some("gh-pages"));
        assert_eq!(options.ignore, Some(vec!["*.map".to_string()]));
        assert_eq!(options.force_add, Some(vec!["vendor/**".to_string()]));
        assert_eq!(
            options.user.map(|u| u.email).as_deref(),
            Some("bot@example.com")
        );
        assert_eq!(options.timeout, Some(30));
        assert_eq!(options.ignore_append, Some(true));
        assert_eq!(options.build_ignore, Some(false));
        assert_eq!(options.pretend, Some(true));
        assert_eq!(options.quiet, Some(false));
        assert_eq!(options.no_orphan, Some(true));
        assert_eq!(options.no_prune, Some(true));
        assert_eq!(options.no_force, Some(true));
        assert_eq!(options.incremental, Some(true));
    }

    #[test]
    fn test_builder_overwrite_values() {
        let options = DeployOptionsBuilder::new("https://example.com/a.git")
            .with_dest("first")
            .with_dest("second")
            .pretend(true)
            .pretend(false)
            .build();
        assert_eq!(options.dest, Some(PathBuf::from("second")));
        assert_eq!(options.pretend, Some(false));
    }
}
