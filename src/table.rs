use super::{CSV_HEADER, VERSION};
use crate::aggregate::DayRecord;
use crate::config::{config_from_matches, history_args, HistoryConfig};
use crate::error::Result;
use clap::{App, Arg, ArgMatches};
use std::io::Write;
use std::path::PathBuf;

/// Writes day records as csv while they are produced.
/// The header goes out with the first row, so a run that fails before
/// any day leaves the output untouched. The first write error stops
/// the writing and is returned by [`CsvRows::finish`].
pub struct CsvRows<W: Write> {
    out: W,
    header: bool,
    error: Option<std::io::Error>,
}

impl<W: Write> CsvRows<W> {
    pub fn new(out: W) -> Self {
        CsvRows {
            out,
            header: true,
            error: None,
        }
    }

    pub fn push(&mut self, record: DayRecord) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.write_row(record) {
            self.error = Some(e);
        }
    }

    fn write_row(&mut self, record: DayRecord) -> std::io::Result<()> {
        if self.header {
            self.header = false;
            writeln!(self.out, "{}", CSV_HEADER)?;
        }
        writeln!(self.out, "{}", record)
    }

    /// flushes and hands back the writer, or the first write error
    pub fn finish(mut self) -> std::io::Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.out.flush()?;
        Ok(self.out)
    }
}

/// Takes the CLI arguments for the table output; no csv file means stdout.
pub fn parse_cli() -> Result<(HistoryConfig, Option<PathBuf>, bool)> {
    let cli_args = table_app().get_matches();
    from_matches(&cli_args)
}

fn table_app<'a, 'b>() -> App<'a, 'b> {
    let arg_csvout = Arg::with_name("output_csvfile")
        .help("name of the output csv file")
        .short("o")
        .long("csvfile")
        .takes_value(true);
    let app = App::new("Bughist_table")
        .version(VERSION.unwrap_or("unknown"))
        .about("cli app to list the cumulative created, resolved and net bugs per day")
        .arg(arg_csvout);
    history_args(app)
}

fn from_matches(cli_args: &ArgMatches) -> Result<(HistoryConfig, Option<PathBuf>, bool)> {
    let config = config_from_matches(cli_args)?;
    let csvout = cli_args.value_of("output_csvfile").map(PathBuf::from);
    Ok((config, csvout, cli_args.is_present("verbose")))
}
