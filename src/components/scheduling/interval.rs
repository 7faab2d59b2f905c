use crate::error::{validation_error, EngineResult};
use crate::utils::time::{end_of_day, start_of_day};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::fmt;

/// Half-open time interval `[start, end)` with `start < end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Interval {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl Interval {
    /// Build an interval, rejecting empty or reversed ranges
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> EngineResult<Self> {
        if start >= end {
            return Err(validation_error(&format!(
                "Interval start {} must be before end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// Build an interval from a start and a positive length
    pub fn starting_at(start: NaiveDateTime, length: Duration) -> EngineResult<Self> {
        let end = start.checked_add_signed(length).ok_or_else(|| {
            validation_error(&format!("Interval starting {} runs past the calendar", start))
        })?;
        Self::new(start, end)
    }

    /// The whole calendar day `[00:00, next day 00:00)`
    pub fn all_day(date: NaiveDate) -> EngineResult<Self> {
        Ok(Self {
            start: start_of_day(date),
            end: end_of_day(date)?,
        })
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// True when the two intervals share at least one instant.
    ///
    /// Touching intervals such as `[9, 10)` and `[10, 11)` do not overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// True when `instant` lies inside the interval
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant < self.end
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {})",
            self.start.format("%Y-%m-%dT%H:%M"),
            self.end.format("%Y-%m-%dT%H:%M")
        )
    }
}

/// Free-function form of [`Interval::overlaps`]
pub fn overlaps(a: &Interval, b: &Interval) -> bool {
    a.overlaps(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::time::{parse_date, parse_datetime};

    fn interval(start: &str, end: &str) -> Interval {
        Interval::new(parse_datetime(start).unwrap(), parse_datetime(end).unwrap()).unwrap()
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let cases = [
            (("2025-01-15T09:00", "2025-01-15T11:00"), ("2025-01-15T10:00", "2025-01-15T10:30")),
            (("2025-01-15T09:00", "2025-01-15T10:00"), ("2025-01-15T10:00", "2025-01-15T11:00")),
            (("2025-01-15T09:00", "2025-01-15T12:00"), ("2025-01-15T08:00", "2025-01-15T09:30")),
            (("2025-01-15T09:00", "2025-01-15T10:00"), ("2025-01-16T09:00", "2025-01-16T10:00")),
        ];

        for ((a_start, a_end), (b_start, b_end)) in cases {
            let a = interval(a_start, a_end);
            let b = interval(b_start, b_end);
            assert_eq!(overlaps(&a, &b), overlaps(&b, &a), "{} vs {}", a, b);
        }
    }

    #[test]
    fn test_touching_intervals_do_not_overlap() {
        let nine_to_ten = interval("2025-01-15T09:00", "2025-01-15T10:00");
        let ten_to_eleven = interval("2025-01-15T10:00", "2025-01-15T11:00");
        assert!(!nine_to_ten.overlaps(&ten_to_eleven));
        assert!(!ten_to_eleven.overlaps(&nine_to_ten));
    }

    #[test]
    fn test_containment_and_partial_overlap() {
        let outer = interval("2025-01-15T09:00", "2025-01-15T11:00");
        let inner = interval("2025-01-15T10:00", "2025-01-15T10:30");
        let straddling = interval("2025-01-15T10:59", "2025-01-15T12:00");

        assert!(outer.overlaps(&inner));
        assert!(outer.overlaps(&straddling));
        assert!(outer.overlaps(&outer));
        // Covering the candidate entirely counts even though neither endpoint is inside
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_rejects_empty_and_reversed() {
        let nine = parse_datetime("2025-01-15T09:00").unwrap();
        let ten = parse_datetime("2025-01-15T10:00").unwrap();
        assert!(Interval::new(nine, nine).unwrap_err().is_validation());
        assert!(Interval::new(ten, nine).is_err());
        assert!(Interval::starting_at(nine, Duration::minutes(0)).is_err());
        assert_eq!(
            Interval::starting_at(nine, Duration::minutes(60)).unwrap().end(),
            ten
        );
    }

    #[test]
    fn test_calendar_edge_is_rejected() {
        assert!(Interval::all_day(NaiveDate::MAX).unwrap_err().is_validation());
        assert!(Interval::starting_at(NaiveDateTime::MAX, Duration::minutes(30))
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_all_day_interval() {
        let day = Interval::all_day(parse_date("2025-01-15").unwrap()).unwrap();
        assert_eq!(day.duration(), Duration::hours(24));
        assert!(day.contains(parse_datetime("2025-01-15T00:00").unwrap()));
        assert!(day.contains(parse_datetime("2025-01-15T23:59").unwrap()));
        assert!(!day.contains(parse_datetime("2025-01-16T00:00").unwrap()));

        let next_morning = interval("2025-01-16T00:00", "2025-01-16T01:00");
        assert!(!day.overlaps(&next_morning));
    }
}
