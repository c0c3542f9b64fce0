use anyhow::{Context, Result};
use bug_history::config::init_logging;
use bug_history::table::{parse_cli, CsvRows};
use bug_history::{generate, BugHistory};

fn main() -> Result<()> {
    let (config, csvout, verbose) = parse_cli()?;
    init_logging(verbose);
    match csvout {
        Some(csvout) => {
            let history =
                BugHistory::from_config(&config).context("could not build the bug history")?;
            history.to_csv(csvout)?;
        }
        None => {
            // stream the days straight to stdout
            let stdout = std::io::stdout();
            let mut rows = CsvRows::new(stdout.lock());
            generate(&config, |d| rows.push(d)).context("could not build the bug history")?;
            rows.finish().context("could not write to stdout")?;
        }
    }
    Ok(())
}
