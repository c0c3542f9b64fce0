use chrono::{Duration, NaiveDate};

/// produces: [ first + i days | i <- 0..ndays ]
/// (does NOT include "last")
///
/// ndays = last - first, empty when last <= first
#[derive(Clone, Debug)]
pub struct DaySpan {
    current: i64,
    current_back: i64,
    first: NaiveDate,
}

impl DaySpan {
    pub fn new(first: NaiveDate, last: NaiveDate) -> Self {
        let ndays = (last - first).num_days().max(0);
        DaySpan {
            current: 0,
            current_back: ndays,
            first,
        }
    }

    /// number of days still to be produced
    fn length(&self) -> i64 {
        self.current_back - self.current
    }

    fn at(&self, pos: i64) -> NaiveDate {
        self.first + Duration::days(pos)
    }

    fn usize_len(&self) -> usize {
        self.length() as usize
    }
}

impl Iterator for DaySpan {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current >= self.current_back {
            return None;
        }
        let result = self.at(self.current);
        self.current += 1;
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let l = self.usize_len();
        (l, Some(l))
    }

    fn count(self) -> usize {
        self.usize_len()
    }
}

impl DoubleEndedIterator for DaySpan {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.current >= self.current_back {
            return None;
        }
        self.current_back -= 1;
        let result = self.at(self.current_back);
        Some(result)
    }
}

impl ExactSizeIterator for DaySpan {
    fn len(&self) -> usize {
        self.usize_len()
    }
}
