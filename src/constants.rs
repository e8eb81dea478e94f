//! Central constants for the git-deploy application

/// Default values for git operations
pub mod git {
    /// Name of the git executable
    pub const GIT_BINARY: &str = "git";

    /// Name of the repository metadata directory
    pub const GIT_DIR: &str = ".git";

    /// Name of the generated ignore file
    pub const IGNORE_FILE: &str = ".gitignore";

    /// Default branch used both locally and on the remote
    pub const DEFAULT_BRANCH: &str = "master";

    /// Default commit message when none is provided
    pub const DEFAULT_COMMIT_MSG: &str = "git deploy";

    /// Output fragments git prints when a commit has nothing to record
    pub const NOTHING_TO_COMMIT: &[&str] = &[
        "nothing to commit",
        "nothing added to commit",
        "no changes added to commit",
    ];
}

/// Default values for configuration
pub mod config {
    /// Default configuration file name
    pub const DEFAULT_CONFIG_FILE: &str = "deploy.yaml";

    /// Environment variable consulted when no remote URL is configured
    pub const URL_ENV_VAR: &str = "GIT_DEPLOY_URL";

    /// Patterns excluded from a deploy unless the caller overrides the list
    pub const DEFAULT_IGNORE: &[&str] = &[
        ".gitignore",
        "Gruntfile.js",
        "node_modules",
        "nbproject",
        "README.md",
        "test",
        "**/*.scss",
        "**/*.sass",
        ".sass-cache",
        ".idea",
        ".DS_Store",
        "config.rb",
    ];
}
