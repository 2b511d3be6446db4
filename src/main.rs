//! gitgo CLI entry point

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};

use gitgo::cli::commands;
use gitgo::cli::{Output, RepoContext};
use gitgo::git::GitError;
use gitgo::telemetry::{init_telemetry, TelemetryConfig};

#[derive(Parser)]
#[command(name = "gitgo")]
#[command(author, version, about = "Personal git branch workflow", long_about = None)]
struct Cli {
    /// Log every git command before it runs
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress status messages
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the current branch name
    Branchname,
    /// Print the subject line of a commit
    Summary {
        /// Revision to summarize
        #[arg(default_value = "HEAD")]
        rev: String,
    },
    /// Start (or resume) a work branch tracking the mainline
    Gowork {
        /// Work branch name
        name: String,
        /// Do not fetch the remote first
        #[arg(long)]
        no_fetch: bool,
    },
    /// Rebase the current branch on its upstream
    Gopull {
        /// Remote to pull from (default: the branch's upstream)
        remote: Option<String>,
        /// Branch to pull
        branch: Option<String>,
    },
    /// Show `git branch -vv` for the current branch only
    Gostatus {
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the URL for opening a pull request of the published branch
    Gopr {
        /// Target branch (default: mainline)
        #[arg(short, long)]
        base: Option<String>,
    },
    /// Post the current branch to the review tool
    Gorbt {
        /// Extra arguments for the review tool
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Push the work branch to the remote for review
    Gopublish {
        /// Overwrite the published branch (force-with-lease)
        #[arg(short, long)]
        force: bool,
    },
    /// Push the work branch's commits onto the mainline
    Gopush {
        /// Remote to push to
        remote: Option<String>,
        /// Target branch (default: mainline)
        branch: Option<String>,
    },
    /// Delete a finished work branch, locally and its published copy
    Goclose {
        /// Branch to close (default: current)
        name: Option<String>,
        /// Delete even if not fully merged
        #[arg(short, long)]
        force: bool,
    },
    /// Discard uncommitted changes and untracked files
    Godiscard {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
        /// Also drop local commits (reset to upstream)
        #[arg(long)]
        commits: bool,
    },
    /// Log commits on the work branch not yet in its base
    Golog {
        /// Extra arguments for git log
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Show the diff the work branch introduces
    Goshow {
        /// Extra arguments for git diff
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Rebase onto work synced from another machine
    Gosyncfrom {
        /// Remote holding the sync branch
        remote: Option<String>,
        /// Work branch name (default: current)
        branch: Option<String>,
    },
    /// Sync the current work to the remote for another machine
    Gosyncto {
        /// Remote to sync to
        remote: Option<String>,
        /// Work branch name (default: current)
        branch: Option<String>,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    let telemetry = TelemetryConfig::from_flags(cli.verbose, cli.quiet);
    if let Err(e) = init_telemetry(&telemetry) {
        Output::warning(&format!("Failed to initialize logging: {}", e));
    }

    if let Err(err) = run(cli) {
        Output::error(&format!("{:#}", err));
        std::process::exit(exit_code(&err));
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let command = match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "gitgo", &mut std::io::stdout());
            return Ok(());
        }
        Some(command) => command,
        None => {
            println!("gitgo - Personal git branch workflow");
            println!("Run 'gitgo --help' for usage");
            return Ok(());
        }
    };

    let ctx = RepoContext::discover(&std::env::current_dir()?, cli.quiet)?;

    match command {
        Commands::Branchname => commands::info::run_branchname(&ctx),
        Commands::Summary { rev } => commands::info::run_summary(&ctx, &rev),
        Commands::Gowork { name, no_fetch } => commands::work::run_gowork(&ctx, &name, !no_fetch),
        Commands::Gopull { remote, branch } => {
            commands::pull::run_gopull(&ctx, remote.as_deref(), branch.as_deref())
        }
        Commands::Gostatus { json } => commands::status::run_gostatus(&ctx, json),
        Commands::Gopr { base } => commands::pr::run_gopr(&ctx, base.as_deref()),
        Commands::Gorbt { args } => commands::review::run_gorbt(&ctx, &args),
        Commands::Gopublish { force } => commands::publish::run_gopublish(&ctx, force),
        Commands::Gopush { remote, branch } => {
            commands::push::run_gopush(&ctx, remote.as_deref(), branch.as_deref())
        }
        Commands::Goclose { name, force } => {
            commands::close::run_goclose(&ctx, name.as_deref(), force)
        }
        Commands::Godiscard { yes, commits } => {
            commands::discard::run_godiscard(&ctx, yes, commits)
        }
        Commands::Golog { args } => commands::log::run_golog(&ctx, &args),
        Commands::Goshow { args } => commands::log::run_goshow(&ctx, &args),
        Commands::Gosyncfrom { remote, branch } => {
            commands::sync::run_gosyncfrom(&ctx, remote.as_deref(), branch.as_deref())
        }
        Commands::Gosyncto { remote, branch } => {
            commands::sync::run_gosyncto(&ctx, remote.as_deref(), branch.as_deref())
        }
        Commands::Completions { .. } => Ok(()),
    }
}

/// Exit code for a failed command: the underlying git/tool code when known
fn exit_code(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|e| e.downcast_ref::<GitError>())
        .map_or(1, GitError::exit_code)
}
