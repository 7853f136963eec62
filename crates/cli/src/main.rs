//! Multisect CLI - ms command

use anyhow::Result;
use clap::Parser;
use git::Repo;
use ms_core::{find_relevant, ProbeCache};
use probe::CommandProbe;
use std::path::PathBuf;

mod report;

/// Multisect - find every commit at which a command's output changes
///
/// Unlike a classic bisect, which narrows down to a single culprit,
/// multisect reports all commits in from..to whose probe output differs
/// from their predecessor's, probing far fewer commits than the range
/// contains.
#[derive(Parser)]
#[command(name = "ms")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Repository to search
    #[arg(short = 'C', long, value_name = "DIR", default_value = ".")]
    repo: PathBuf,

    /// First revision of the range
    #[arg(short, long, value_name = "REV")]
    from: String,

    /// Last revision of the range
    #[arg(short, long, value_name = "REV", default_value = "HEAD")]
    to: String,

    /// Command to run. Executed by the shell with REV set to a revision
    #[arg(short, long, value_name = "CMD")]
    cmd: String,

    /// Hide the command stderr. Good if noisy
    #[arg(long)]
    hide_stderr: bool,

    /// Include the probe output after each log line
    #[arg(long)]
    show_output: bool,

    /// How to print the git log
    #[arg(long, value_name = "OPTS", default_value = "--oneline --no-decorate", allow_hyphen_values = true)]
    log_options: String,
}

fn main() -> Result<()> {
    // Diagnostics go to stderr; stdout carries only the report
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    run(Cli::parse())
}

fn run(cli: Cli) -> Result<()> {
    let repo = Repo::open(&cli.repo);

    // Validate the range before any probing
    if !repo.is_ancestor(&cli.from, &cli.to)? {
        anyhow::bail!(
            "Revision {} is not an ancestor of {}, giving up",
            cli.from,
            cli.to
        );
    }

    let commits = repo.rev_list(&cli.from, &cli.to)?;
    if commits.is_empty() {
        eprintln!("Found no commits in {}..{}", cli.from, cli.to);
        return Ok(());
    }
    eprintln!("Found {} commits", commits.len());

    // Index 0 is the start boundary; the commits occupy indices 1..=N
    let start = repo.rev_parse(&cli.from)?;
    let mut revs = Vec::with_capacity(commits.len() + 1);
    revs.push(start);
    revs.extend(commits);

    let count = revs.len() - 1;
    tracing::debug!(count, start = %revs[0], "resolved snapshot chain");

    let mut cache = ProbeCache::new(CommandProbe::new(
        &cli.cmd,
        revs.clone(),
        cli.hide_stderr,
    ));

    let outcome = find_relevant(count, &mut cache, |stats, index| {
        report::progress(stats, &revs[index]);
    })?;

    report::done(&outcome.stats);
    eprintln!();

    let log_options = report::split_options(&cli.log_options);

    if cli.show_output {
        repo.log_line(&revs[0], &log_options)?;
        report::replay(&mut cache, 0)?;
    }
    for &index in &outcome.relevant {
        repo.log_line(&revs[index], &log_options)?;
        if cli.show_output {
            report::replay(&mut cache, index)?;
        }
    }

    Ok(())
}
