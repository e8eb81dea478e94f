use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use git_deploy::commands::*;
use git_deploy::config::{DeployOptions, GitUser};
use git_deploy::constants;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "git-deploy")]
#[command(about = "Publish the contents of a directory to a branch of a remote git repository")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deploy the source directory to the remote branch
    Deploy {
        #[command(flatten)]
        args: DeployArgs,
    },

    /// Print the steps a deploy would run without running them
    Plan {
        #[command(flatten)]
        args: DeployArgs,

        /// Output in JSON format for machine consumption
        #[arg(long)]
        json: bool,
    },

    /// Create a config file holding the default options
    Init {
        /// Output file name
        #[arg(short, long, default_value_t = constants::config::DEFAULT_CONFIG_FILE.to_string())]
        output: String,

        /// Overwrite existing file if it exists
        #[arg(long)]
        overwrite: bool,

        /// Remote repository to record in the file
        #[arg(short, long)]
        url: Option<String>,
    },
}

/// Options shared by `deploy` and `plan`
///
/// Flags left unset fall back to the config file, then to the defaults.
#[derive(Args, Debug)]
struct DeployArgs {
    /// Directory whose contents get deployed
    src: Option<PathBuf>,

    /// Staging directory; without one git runs inside the source
    #[arg(short, long)]
    dest: Option<PathBuf>,

    /// Remote repository URL (falls back to GIT_DEPLOY_URL)
    #[arg(short, long)]
    url: Option<String>,

    /// Commit message
    #[arg(short, long)]
    message: Option<String>,

    /// Branch committed to locally
    #[arg(long)]
    local_branch: Option<String>,

    /// Branch pushed to on the remote
    #[arg(long)]
    remote_branch: Option<String>,

    /// Ignore pattern, replacing the default list (can be specified multiple times)
    #[arg(long, value_name = "PATTERN")]
    ignore: Vec<String>,

    /// Start from the source's own .gitignore
    #[arg(long)]
    ignore_append: bool,

    /// Do not write a .gitignore into the staging directory
    #[arg(long)]
    no_build_ignore: bool,

    /// Stage matching paths even if ignored (can be specified multiple times)
    #[arg(long, value_name = "PATTERN")]
    force_add: Vec<String>,

    /// Show git's own output
    #[arg(short, long)]
    verbose: bool,

    /// Log every action instead of performing it
    #[arg(long, visible_alias = "dry-run")]
    pretend: bool,

    /// Commit on top of existing history instead of an orphan branch
    #[arg(long)]
    no_orphan: bool,

    /// Push without --prune
    #[arg(long)]
    no_prune: bool,

    /// Push without --force
    #[arg(long)]
    no_force: bool,

    /// Merge into the previous deploy and keep the staging directory
    #[arg(long, visible_alias = "keep-dest")]
    incremental: bool,

    /// Seconds a single git process may run
    #[arg(long, value_name = "SECONDS")]
    timeout: Option<u64>,

    /// Commit author name
    #[arg(long, requires = "user_email")]
    user_name: Option<String>,

    /// Commit author email
    #[arg(long, requires = "user_name")]
    user_email: Option<String>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl DeployArgs {
    /// Options set on the command line; unset flags stay `None`
    fn to_options(&self) -> DeployOptions {
        let user = match (&self.user_name, &self.user_email) {
            (Some(name), Some(email)) => Some(GitUser {
                name: name.clone(),
                email: email.clone(),
            }),
            _ => None,
        };

        DeployOptions {
            url: self.url.clone(),
            message: self.message.clone(),
            local_branch: self.local_branch.clone(),
            remote_branch: self.remote_branch.clone(),
            src: self.src.clone(),
            dest: self.dest.clone(),
            ignore: (!self.ignore.is_empty()).then(|| self.ignore.clone()),
            ignore_append: self.ignore_append.then_some(true),
            quiet: self.verbose.then_some(false),
            build_ignore: self.no_build_ignore.then_some(false),
            pretend: self.pretend.then_some(true),
            force_add: (!self.force_add.is_empty()).then(|| self.force_add.clone()),
            no_orphan: self.no_orphan.then_some(true),
            no_prune: self.no_prune.then_some(true),
            no_force: self.no_force.then_some(true),
            incremental: self.incremental.then_some(true),
            user,
            timeout: self.timeout,
        }
    }

    /// Config file options with command line values layered on top
    ///
    /// An explicitly named config file must exist; the default one is optional.
    fn load_options(&self, cwd: &Path) -> Result<DeployOptions> {
        let file = match &self.config {
            Some(path) => DeployOptions::load(&cwd.join(path))?,
            None => DeployOptions::load_if_exists(
                &cwd.join(constants::config::DEFAULT_CONFIG_FILE),
            )?,
        };
        Ok(file.merge(self.to_options()))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cwd = std::env::current_dir()?;

    match cli.command {
        Commands::Deploy { args } => {
            let context = CommandContext::new(args.load_options(&cwd)?, cwd).with_env();
            DeployCommand.execute(&context).await?;
        }
        Commands::Plan { args, json } => {
            let context = CommandContext::new(args.load_options(&cwd)?, cwd).with_env();
            PlanCommand { json }.execute(&context).await?;
        }
        Commands::Init {
            output,
            overwrite,
            url,
        } => {
            // Init starts from the defaults, not from an existing config file
            let options = DeployOptions {
                url,
                ..Default::default()
            };
            let context = CommandContext::new(options, cwd);
            InitCommand { output, overwrite }.execute(&context).await?;
        }
    }

    Ok(())
}
