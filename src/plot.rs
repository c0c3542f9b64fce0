use super::VERSION;
use crate::config::{config_from_matches, history_args, parse_date_arg, HistoryConfig};
use crate::error::Result;
use chrono::NaiveDate;
use clap::{App, Arg, ArgMatches};
use std::path::PathBuf;

/// Takes the CLI arguments that control the plotting of the bug history:
/// the history config, the svg file, the origin of the x axis and the verbose flag.
pub fn parse_cli() -> Result<(HistoryConfig, PathBuf, Option<NaiveDate>, bool)> {
    let cli_args = plot_app().get_matches();
    from_matches(&cli_args)
}

fn plot_app<'a, 'b>() -> App<'a, 'b> {
    let arg_svgout = Arg::with_name("output_svgfile")
        .help("name of the output svg file, default: input file with svg extension")
        .short("o")
        .long("svgfile")
        .takes_value(true);
    let arg_origin = Arg::with_name("origin")
        .help("day zero of the x axis (YYYY-MM-DD), default: first day of the history")
        .long("origin")
        .takes_value(true);
    let app = App::new("Bughist_plot")
        .version(VERSION.unwrap_or("unknown"))
        .about("cli app to plot the cumulative created, resolved and net bugs")
        .arg(arg_svgout)
        .arg(arg_origin);
    history_args(app)
}

fn from_matches(cli_args: &ArgMatches) -> Result<(HistoryConfig, PathBuf, Option<NaiveDate>, bool)> {
    let config = config_from_matches(cli_args)?;
    let svgout = match cli_args.value_of("output_svgfile") {
        Some(p) => PathBuf::from(p),
        None => {
            let mut svgout = config.created_source.clone();
            svgout.set_extension("svg");
            svgout
        }
    };
    let origin = match cli_args.value_of("origin") {
        Some(d) => Some(parse_date_arg(d)?),
        None => None,
    };
    let verbose = cli_args.is_present("verbose");
    Ok((config, svgout, origin, verbose))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_svg_defaults_to_input_name() {
        let m = plot_app()
            .get_matches_from_safe(vec!["bughist_plot", "-f", "data/open.xml", "-c", "2014-02-22"])
            .unwrap();
        let (config, svgout, origin, verbose) = from_matches(&m).unwrap();
        assert_eq!(config.created_source, PathBuf::from("data/open.xml"));
        assert_eq!(svgout, PathBuf::from("data/open.svg"));
        assert_eq!(origin, None);
        assert!(!verbose);
    }

    #[test]
    fn test_origin_and_output() {
        let m = plot_app()
            .get_matches_from_safe(vec![
                "bughist_plot",
                "-f",
                "open.xml",
                "-c",
                "2014-02-22",
                "-o",
                "chart.svg",
                "--origin",
                "2005-08-10",
                "-v",
            ])
            .unwrap();
        let (_, svgout, origin, verbose) = from_matches(&m).unwrap();
        assert_eq!(svgout, PathBuf::from("chart.svg"));
        assert_eq!(origin, NaiveDate::from_ymd_opt(2005, 8, 10));
        assert!(verbose);
    }
}
