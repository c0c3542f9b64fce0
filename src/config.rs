use crate::error::{Error, Result};
use chrono::NaiveDate;
use clap::{App, Arg, ArgMatches};
use std::path::PathBuf;

pub const DEFAULT_CREATED_PATTERN: &str = "<created>(.*)</created>";
pub const DEFAULT_RESOLVED_PATTERN: &str = "<resolved>(.*)</resolved>";

/// Where to read the events from and up to which day to count them.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryConfig {
    pub created_source: PathBuf,
    pub resolved_source: PathBuf,
    pub created_pattern: String,
    pub resolved_pattern: String,
    /// the day the data was captured, excluded from the range
    pub cutoff: NaiveDate,
}

impl HistoryConfig {
    /// Both event kinds from the same file with the default tag patterns.
    pub fn new<P: Into<PathBuf>>(source: P, cutoff: NaiveDate) -> HistoryConfig {
        let source = source.into();
        HistoryConfig {
            created_source: source.clone(),
            resolved_source: source,
            created_pattern: DEFAULT_CREATED_PATTERN.to_string(),
            resolved_pattern: DEFAULT_RESOLVED_PATTERN.to_string(),
            cutoff,
        }
    }
}

pub fn parse_date_arg(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, crate::DATE_FORMAT).map_err(|source| Error::DateArg {
        value: value.to_string(),
        source,
    })
}

/// Adds the arguments shared by the bug history apps.
pub fn history_args<'a, 'b>(app: App<'a, 'b>) -> App<'a, 'b> {
    let arg_input = Arg::with_name("input_file")
        .help("file with the <created> tags, and the <resolved> tags unless -r is given")
        .short("f")
        .long("file")
        .takes_value(true)
        .required(true);
    let arg_resolved = Arg::with_name("resolved_file")
        .help("separate file for the <resolved> tags")
        .short("r")
        .long("resolved-file")
        .takes_value(true);
    let arg_cutoff = Arg::with_name("cutoff")
        .help("day the data was captured (YYYY-MM-DD), counting stops the day before")
        .short("c")
        .long("cutoff")
        .takes_value(true)
        .required(true);
    let arg_created_pattern = Arg::with_name("created_pattern")
        .help("regex with one capture group around the creation timestamp")
        .long("created-pattern")
        .takes_value(true)
        .default_value(DEFAULT_CREATED_PATTERN);
    let arg_resolved_pattern = Arg::with_name("resolved_pattern")
        .help("regex with one capture group around the resolution timestamp")
        .long("resolved-pattern")
        .takes_value(true)
        .default_value(DEFAULT_RESOLVED_PATTERN);
    let arg_verbose = Arg::with_name("verbose")
        .help("print debug information")
        .short("v")
        .long("verbose")
        .takes_value(false)
        .required(false);
    app.arg(arg_input)
        .arg(arg_resolved)
        .arg(arg_cutoff)
        .arg(arg_created_pattern)
        .arg(arg_resolved_pattern)
        .arg(arg_verbose)
}

pub fn config_from_matches(cli_args: &ArgMatches) -> Result<HistoryConfig> {
    let source = PathBuf::from(cli_args.value_of("input_file").unwrap_or_default());
    let cutoff = parse_date_arg(cli_args.value_of("cutoff").unwrap_or_default())?;
    let mut config = HistoryConfig::new(source, cutoff);
    if let Some(p) = cli_args.value_of("resolved_file") {
        config.resolved_source = PathBuf::from(p);
    }
    if let Some(p) = cli_args.value_of("created_pattern") {
        config.created_pattern = p.to_string();
    }
    if let Some(p) = cli_args.value_of("resolved_pattern") {
        config.resolved_pattern = p.to_string();
    }
    Ok(config)
}

/// Sets up env_logger, RUST_LOG wins over the verbose flag.
pub fn init_logging(verbose: bool) {
    use log::LevelFilter;
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}
