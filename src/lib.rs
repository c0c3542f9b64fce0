use chrono::{Duration, NaiveDate};
use plotters::prelude::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
pub mod aggregate;
pub mod config;
pub mod dayspan;
pub mod error;
pub mod extract;
pub mod plot;
pub mod table;

pub use aggregate::{aggregate, cumulative_days, CumulativeDays, DayRecord, ScanSummary};
pub use config::HistoryConfig;
pub use error::{Error, Result};
pub use extract::{compile_pattern, extract, extract_file, parse_event_date, DateCounts};

pub const VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub const CSV_HEADER: &str = "date,created,resolved,net";

/// Runs the whole pipeline: extracts the creations, then the resolutions,
/// then calls `on_day` with the running totals of each day up to the cutoff.
pub fn generate<F>(config: &HistoryConfig, on_day: F) -> Result<ScanSummary>
where
    F: FnMut(DayRecord),
{
    let created_re = compile_pattern(&config.created_pattern)?;
    let resolved_re = compile_pattern(&config.resolved_pattern)?;
    let creations = extract_file(&config.created_source, &created_re)?;
    let resolutions = extract_file(&config.resolved_source, &resolved_re)?;
    aggregate(&creations, &resolutions, config.cutoff, on_day)
}

/// The cumulative created, resolved and net series, one entry per day
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BugHistory {
    pub date: Vec<NaiveDate>,
    pub created: Vec<u64>,
    pub resolved: Vec<u64>,
    pub net: Vec<i64>,
}

impl BugHistory {
    pub fn new(capacity: usize) -> BugHistory {
        BugHistory {
            date: Vec::with_capacity(capacity),
            created: Vec::with_capacity(capacity),
            resolved: Vec::with_capacity(capacity),
            net: Vec::with_capacity(capacity),
        }
    }

    /// Runs [`generate`] and keeps every day.
    pub fn from_config(config: &HistoryConfig) -> Result<BugHistory> {
        let mut history = BugHistory::new(0);
        generate(config, |d| history.push(d))?;
        Ok(history)
    }

    pub fn push(&mut self, record: DayRecord) {
        self.date.push(record.date);
        self.created.push(record.created);
        self.resolved.push(record.resolved);
        self.net.push(record.net);
    }

    pub fn len(&self) -> usize {
        self.date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.date.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = DayRecord> + '_ {
        self.date
            .iter()
            .zip(self.created.iter())
            .zip(self.resolved.iter().zip(self.net.iter()))
            .map(|((&date, &created), (&resolved, &net))| DayRecord {
                date,
                created,
                resolved,
                net,
            })
    }

    /// writes the date, created, resolved and net columns as a csv at the given path
    pub fn to_csv(&self, fout: PathBuf) -> Result<()> {
        let to_err = |source: std::io::Error| Error::Write {
            path: fout.clone(),
            source,
        };
        let file = File::create(&fout).map_err(to_err)?;
        let mut buf = BufWriter::new(file);
        write!(buf, "{}", self).map_err(to_err)?;
        buf.flush().map_err(to_err)
    }

    /// plots the three cumulative series to svg,
    /// the x axis counts the days since `origin` (default: first day)
    pub fn plot(&self, fout: PathBuf, origin: Option<NaiveDate>) -> Result<()> {
        if self.is_empty() {
            return Err(Error::EmptyHistory);
        }
        self.draw_svg(&fout, origin).map_err(Error::Plot)
    }

    fn draw_svg(
        &self,
        fout: &Path,
        origin: Option<NaiveDate>,
    ) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let (first, last) = min_and_max(&self.date[..]).ok_or("no dates")?;
        let origin = origin.unwrap_or(first);
        let day = move |d: &NaiveDate| (*d - origin).num_days();
        let xmin = day(&first);
        let xmax = day(&last);
        let xspan = xmax - xmin;
        let xmargin = std::cmp::max(xspan / 20, 1);
        let xfmt = suitable_xfmt(Duration::days(xspan));

        let values: Vec<i64> = self
            .created
            .iter()
            .chain(self.resolved.iter())
            .map(|&v| v as i64)
            .chain(self.net.iter().copied())
            .collect();
        let (ymin, ymax) = min_and_max(&values[..]).ok_or("no values")?;
        let ymargin = std::cmp::max((ymax - ymin) / 10, 1);

        let root = SVGBackend::new(fout, (1600, 800)).into_drawing_area();
        root.fill(&WHITE)?;
        let mut chart = ChartBuilder::on(&root)
            .caption("Bug History", ("sans-serif", 40))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(100)
            .build_cartesian_2d(
                (xmin - xmargin)..(xmax + xmargin),
                (ymin - ymargin)..(ymax + ymargin),
            )?;
        chart
            .configure_mesh()
            .light_line_style(&TRANSPARENT)
            .bold_line_style(RGBColor(150, 150, 150).stroke_width(2))
            .set_all_tick_mark_size(2)
            .label_style(("sans-serif", 24))
            .y_desc("bugs")
            .x_labels(14) // max number of labels
            .x_label_formatter(&|x: &i64| (origin + Duration::days(*x)).format(xfmt).to_string())
            .x_desc(format!("date [{}]", xfmt.replace("%", "")))
            .draw()?;

        let series: [(&str, Vec<i64>, RGBColor); 3] = [
            ("Created", self.created.iter().map(|&v| v as i64).collect(), RED),
            ("Resolved", self.resolved.iter().map(|&v| v as i64).collect(), BLUE),
            ("Net", self.net.clone(), BLACK),
        ];
        for (name, ys, color) in series.iter() {
            let color = *color;
            chart
                .draw_series(LineSeries::new(
                    self.date.iter().map(day).zip(ys.iter().copied()),
                    color.stroke_width(3),
                ))?
                .label(*name)
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(3))
                });
        }
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .label_font(("sans-serif", 24))
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;
        root.present()?;
        Ok(())
    }
}

impl std::fmt::Display for BugHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", CSV_HEADER)?;
        for d in self.records() {
            writeln!(f, "{}", d)?
        }
        Ok(())
    }
}

/// None for an empty slice
pub fn min_and_max<T: std::cmp::PartialOrd + Copy>(s: &[T]) -> Option<(T, T)> {
    let mut self_iter = s.iter();
    let (mut min, mut max) = match self_iter.next() {
        Some(v) => (*v, *v),
        None => return None,
    };
    for es in self_iter {
        if *es > max {
            max = *es
        }
        if *es < min {
            min = *es
        }
    }
    Some((min, max))
}

pub fn suitable_xfmt(d: Duration) -> &'static str {
    if d > Duration::weeks(104) {
        "%Y-%m"
    } else if d > Duration::weeks(1) {
        "%y-%m-%d"
    } else {
        "%m-%d"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_min_and_max() {
        assert_eq!(min_and_max(&[3, -1, 7, 2]), Some((-1, 7)));
        assert_eq!(min_and_max::<i64>(&[]), None);
    }

    #[test]
    fn test_suitable_xfmt() {
        assert_eq!(suitable_xfmt(Duration::days(3)), "%m-%d");
        assert_eq!(suitable_xfmt(Duration::days(60)), "%y-%m-%d");
        assert_eq!(suitable_xfmt(Duration::days(3000)), "%Y-%m");
    }

    #[test]
    fn test_display_as_csv() {
        let mut h = BugHistory::new(2);
        h.push(DayRecord { date: ymd(2014, 2, 1), created: 2, resolved: 0, net: 2 });
        h.push(DayRecord { date: ymd(2014, 2, 2), created: 2, resolved: 3, net: -1 });
        assert_eq!(
            h.to_string(),
            "date,created,resolved,net\n2014-02-01,2,0,2\n2014-02-02,2,3,-1\n"
        );
        assert_eq!(h.records().count(), 2);
    }

    #[test]
    fn test_plot_empty_history() {
        let h = BugHistory::default();
        let err = h.plot(PathBuf::from("unused.svg"), None).unwrap_err();
        assert!(matches!(err, Error::EmptyHistory));
    }

    fn assert_chart(svg: &Path) {
        let text = std::fs::read_to_string(svg).unwrap();
        assert!(text.contains("<svg"));
        assert!(text.contains("Bug History"));
        for label in &["Created", "Resolved", "Net"] {
            assert!(text.contains(label), "missing legend entry {}", label);
        }
    }

    #[test]
    fn test_plot_single_day() {
        let mut h = BugHistory::new(1);
        h.push(DayRecord { date: ymd(2014, 2, 21), created: 1, resolved: 1, net: 0 });
        let dir = tempfile::tempdir().unwrap();
        let svg = dir.path().join("one_day.svg");
        h.plot(svg.clone(), None).unwrap();
        assert_chart(&svg);
    }

    #[test]
    fn test_plot_with_origin() {
        let first = ymd(2013, 1, 18);
        let mut h = BugHistory::new(400);
        let (mut created, mut resolved) = (0u64, 0u64);
        for i in 0..400 {
            created += (i % 3 == 0) as u64;
            resolved += (i % 5 == 0) as u64;
            h.push(DayRecord {
                date: first + Duration::days(i),
                created,
                resolved,
                net: created as i64 - resolved as i64,
            });
        }
        let dir = tempfile::tempdir().unwrap();
        let svg = dir.path().join("history.svg");
        h.plot(svg.clone(), Some(ymd(2005, 8, 10))).unwrap();
        assert_chart(&svg);
    }
}
