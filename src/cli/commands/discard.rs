//! `godiscard` - throw away local changes

use dialoguer::{theme::ColorfulTheme, Confirm};
use std::io::IsTerminal;

use crate::cli::context::RepoContext;
use crate::cli::output::Output;
use crate::git::{self, GitError};

/// Run the godiscard command
///
/// Resets the index and working tree to `HEAD` and removes untracked
/// files. With `commits`, resets to the upstream instead, dropping local
/// commits as well. Asks for confirmation unless `yes` is set.
pub fn run_godiscard(ctx: &RepoContext, yes: bool, commits: bool) -> anyhow::Result<()> {
    let (target, dropped) = if commits {
        let branch = ctx.current_branch()?;
        let upstream = git::get_upstream_branch(&ctx.repo, Some(&branch))?.ok_or_else(|| {
            GitError::NoSuchBranch(format!("'{}' has no upstream configured", branch))
        })?;
        let dropped = git::count_commits_since(&ctx.repo, &upstream)?;
        (upstream, dropped)
    } else {
        ("HEAD".to_string(), 0)
    };

    let entries = git::get_status_entries(&ctx.repo)?;
    if entries.is_empty() && dropped == 0 {
        if !ctx.quiet {
            Output::info("Nothing to discard");
        }
        return Ok(());
    }

    if !yes {
        if !std::io::stdin().is_terminal() {
            anyhow::bail!("Refusing to discard changes without confirmation; pass --yes");
        }

        for entry in &entries {
            if entry.is_untracked() {
                Output::list_item(&format!("{} (untracked, will be deleted)", entry.path));
            } else {
                Output::list_item(&format!("{}{} {}", entry.index, entry.worktree, entry.path));
            }
        }
        if dropped > 0 {
            Output::warning(&format!("{} local commit(s) will be dropped", dropped));
        }

        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Discard {} change(s)?", entries.len() + dropped))
            .default(false)
            .interact()?;
        if !confirmed {
            Output::info("Aborted");
            return Ok(());
        }
    }

    git::discard_changes(&ctx.repo, &target)?;

    if !ctx.quiet {
        Output::success(&format!("Reset to {}", target));
    }

    Ok(())
}
