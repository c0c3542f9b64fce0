use anyhow::{Context, Result};
use bug_history::config::init_logging;
use bug_history::plot::parse_cli;
use bug_history::BugHistory;
use log::info;

fn main() -> Result<()> {
    let (config, svgout, origin, verbose) = parse_cli()?;
    init_logging(verbose);
    info!(
        "read bugs from {} and {}, plot to {}",
        config.created_source.display(),
        config.resolved_source.display(),
        svgout.display()
    );
    let history = BugHistory::from_config(&config).context("could not build the bug history")?;
    history
        .plot(svgout.clone(), origin)
        .with_context(|| format!("could not plot to {}", svgout.display()))?;
    Ok(())
}
