use crate::dayspan::DaySpan;
use crate::error::{Error, Result};
use crate::extract::DateCounts;
use chrono::NaiveDate;
use log::info;

/// Cumulative totals at the end of one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayRecord {
    pub date: NaiveDate,
    pub created: u64,
    pub resolved: u64,
    /// always created - resolved
    pub net: i64,
}

/// One csv row: date,created,resolved,net
impl std::fmt::Display for DayRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.date.format(crate::DATE_FORMAT),
            self.created,
            self.resolved,
            self.net
        )
    }
}

/// What an aggregation is going to cover, reported once before the first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanSummary {
    pub first: NaiveDate,
    pub cutoff: NaiveDate,
    pub ndays: i64,
    pub creations: u64,
    pub resolutions: u64,
}

impl std::fmt::Display for ScanSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "scanning {} to {} ({} days), {} creations, {} resolutions",
            self.first, self.cutoff, self.ndays, self.creations, self.resolutions
        )
    }
}

/// Walks every day of [first date, cutoff) and yields the running totals.
/// Days without events repeat the previous totals.
pub struct CumulativeDays<'a> {
    days: DaySpan,
    creations: &'a DateCounts,
    resolutions: &'a DateCounts,
    created: u64,
    resolved: u64,
    net: i64,
    summary: ScanSummary,
}

impl<'a> CumulativeDays<'a> {
    pub fn summary(&self) -> ScanSummary {
        self.summary
    }
}

impl<'a> Iterator for CumulativeDays<'a> {
    type Item = DayRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let date = self.days.next()?;
        let nc = self.creations.get(&date).copied().unwrap_or(0);
        let nr = self.resolutions.get(&date).copied().unwrap_or(0);
        self.created += nc;
        self.resolved += nr;
        self.net += nc as i64 - nr as i64;
        debug_assert_eq!(self.net, self.created as i64 - self.resolved as i64);
        Some(DayRecord {
            date,
            created: self.created,
            resolved: self.resolved,
            net: self.net,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.days.size_hint()
    }
}

impl<'a> ExactSizeIterator for CumulativeDays<'a> {}

/// Prepares the lazy day walk, failing with [`Error::NoData`] when neither map
/// has a date to start from.
pub fn cumulative_days<'a>(
    creations: &'a DateCounts,
    resolutions: &'a DateCounts,
    cutoff: NaiveDate,
) -> Result<CumulativeDays<'a>> {
    let first = creations
        .keys()
        .chain(resolutions.keys())
        .min()
        .copied()
        .ok_or(Error::NoData)?;
    let days = DaySpan::new(first, cutoff);
    let summary = ScanSummary {
        first,
        cutoff,
        ndays: (cutoff - first).num_days(),
        creations: creations.values().sum(),
        resolutions: resolutions.values().sum(),
    };
    Ok(CumulativeDays {
        days,
        creations,
        resolutions,
        created: 0,
        resolved: 0,
        net: 0,
        summary,
    })
}

/// Calls `on_day` once per day of [first date, cutoff), in date order,
/// with the cumulative created, resolved and net totals.
pub fn aggregate<F>(
    creations: &DateCounts,
    resolutions: &DateCounts,
    cutoff: NaiveDate,
    mut on_day: F,
) -> Result<ScanSummary>
where
    F: FnMut(DayRecord),
{
    let days = cumulative_days(creations, resolutions, cutoff)?;
    let summary = days.summary();
    info!("{}", summary);
    for record in days {
        on_day(record);
    }
    Ok(summary)
}
