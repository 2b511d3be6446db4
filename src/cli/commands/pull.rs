//! `gopull` - rebase the current branch on its upstream

use crate::cli::context::RepoContext;
use crate::cli::output::Output;
use crate::git;

/// Run the gopull command
///
/// With no arguments the branch's upstream is used, and a branch without
/// one is rejected before anything runs. An explicit remote (and optional
/// branch) is passed through to `git pull --rebase`.
pub fn run_gopull(
    ctx: &RepoContext,
    remote: Option<&str>,
    branch: Option<&str>,
) -> anyhow::Result<()> {
    let current = ctx.current_branch()?;

    let spinner = ctx.spinner(&format!("Pulling {} (rebase)...", current));
    let result = git::pull_rebase(&ctx.repo, remote, branch);
    spinner.finish_and_clear();
    result?;

    if !ctx.quiet {
        let source = match (remote, branch) {
            (Some(r), Some(b)) => Output::remote_ref(r, b),
            (Some(r), None) => r.to_string(),
            _ => git::get_upstream_branch(&ctx.repo, Some(&current))?
                .unwrap_or_else(|| "upstream".to_string()),
        };
        Output::success(&format!(
            "Rebased {} on {}",
            Output::branch_name(&current),
            source
        ));
    }

    Ok(())
}
