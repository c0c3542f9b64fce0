use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDate};
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Number of events on each calendar date.
pub type DateCounts = HashMap<NaiveDate, u64>;

/// Compiles a pattern and checks that it has exactly one capture group,
/// the one holding the timestamp.
pub fn compile_pattern(pattern: &str) -> Result<Regex> {
    let re = Regex::new(pattern).map_err(|e| Error::Pattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })?;
    check_pattern(&re)?;
    Ok(re)
}

fn check_pattern(re: &Regex) -> Result<()> {
    // captures_len counts the implicit group 0
    let groups = re.captures_len() - 1;
    if groups != 1 {
        return Err(Error::Pattern {
            pattern: re.as_str().to_string(),
            reason: format!("expected exactly one capture group, found {}", groups),
        });
    }
    Ok(())
}

lazy_static! {
    // [weekday, ]d[d] Mon yyyy HH:MM[:SS] (GMT|+HHMM)
    static ref RFC1123: Regex = Regex::new(
        r"^(?:(Mon|Tue|Wed|Thu|Fri|Sat|Sun), )?(\d{1,2}) (Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec) (\d{4}) (\d{2}):(\d{2})(?::(\d{2}))? (GMT|[+-]\d{4})$"
    )
    .expect("RFC 1123 regex");
}

const RFC1123_FIELDS: &str = "%d %b %Y %H:%M:%S %z";

/// Why a captured field is not an RFC 1123 date-time.
#[derive(thiserror::Error, Debug)]
pub enum TimestampError {
    #[error("expected [Day, ]d Mon yyyy HH:MM[:SS] GMT|+HHMM")]
    Grammar,
    #[error("weekday {written} does not match the date, which is a {actual}")]
    Weekday { written: String, actual: String },
    #[error(transparent)]
    Field(#[from] chrono::ParseError),
}

/// Parses an RFC 1123 date-time, e.g. `Thu, 20 Feb 2014 02:13:36 -0800`,
/// and keeps the date as written, dropping the time and the offset.
/// Weekday and seconds are optional, the year has four digits and the zone
/// is either `GMT` or a numeric offset.
pub fn parse_event_date(s: &str) -> std::result::Result<NaiveDate, TimestampError> {
    let c = RFC1123.captures(s).ok_or(TimestampError::Grammar)?;
    let seconds = c.get(7).map_or("00", |m| m.as_str());
    let offset = match &c[8] {
        "GMT" => "+0000",
        o => o,
    };
    let fields = format!(
        "{} {} {} {}:{}:{} {}",
        &c[2], &c[3], &c[4], &c[5], &c[6], seconds, offset
    );
    let dt = DateTime::parse_from_str(&fields, RFC1123_FIELDS)?;
    if let Some(written) = c.get(1) {
        let actual = dt.format("%a").to_string();
        if written.as_str() != actual {
            return Err(TimestampError::Weekday {
                written: written.as_str().to_string(),
                actual,
            });
        }
    }
    Ok(dt.date_naive())
}

/// Counts the dates captured by `pattern` in `source`, one per matching line.
/// Lines without a match are skipped, a match that is not a valid timestamp
/// aborts the whole extraction.
pub fn extract<R: BufRead>(source: R, pattern: &Regex) -> Result<DateCounts> {
    check_pattern(pattern)?;
    let mut counts = DateCounts::new();
    let mut matched: usize = 0;
    for (i, l) in source.lines().enumerate() {
        let line = l.map_err(|source| Error::Read { line: i + 1, source })?;
        let captured = match pattern.captures(&line).and_then(|c| c.get(1)) {
            Some(m) => m.as_str(),
            None => continue,
        };
        let date = parse_event_date(captured).map_err(|source| Error::Timestamp {
            line: i + 1,
            value: captured.to_string(),
            source,
        })?;
        *counts.entry(date).or_insert(0) += 1;
        matched += 1;
    }
    debug!(
        "pattern {} matched {} lines over {} dates",
        pattern.as_str(),
        matched,
        counts.len()
    );
    Ok(counts)
}

/// Opens `path` and runs [`extract`] over its lines.
pub fn extract_file<P: AsRef<Path>>(path: P, pattern: &Regex) -> Result<DateCounts> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("scanning {}", path.display());
    extract(BufReader::new(file), pattern)
}
