//! Calendar [`Month`] definitions.

use std::{fmt, ops::RangeInclusive, str::FromStr};

use time::{Date, PrimitiveDateTime, Time};

use crate::DateTimeOf;

/// Calendar month of a year.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Month {
    /// Year of this [`Month`].
    year: i32,

    /// Number of this [`Month`] in the year, in `[1, 12]`.
    month: u8,
}

impl Month {
    /// Creates a new [`Month`] by checking the provided `year` is positive
    /// and the provided `month` number is in `[1, 12]`.
    #[must_use]
    pub fn new(year: i32, month: u8) -> Option<Self> {
        ((1..=12).contains(&month) && year > 0).then_some(Self { year, month })
    }

    /// Returns the year of this [`Month`].
    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the number of this [`Month`] in the year.
    #[must_use]
    pub fn number(&self) -> u8 {
        self.month
    }

    /// Returns the [`Month`] immediately preceding this one, rolling over
    /// to December of the previous year when this is January.
    #[must_use]
    pub fn pred(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Returns the inclusive range of [`DateTimeOf`]s covering this [`Month`]
    /// entirely: from the first instant of its first day through the last
    /// representable instant of its last day.
    #[expect(clippy::missing_panics_doc, reason = "invariants hold")]
    #[must_use]
    pub fn range<Of: ?Sized>(&self) -> RangeInclusive<DateTimeOf<Of>> {
        let month = time::Month::try_from(self.month).expect("in `[1, 12]`");
        let last_day = month.length(self.year);

        let first = Date::from_calendar_date(self.year, month, 1)
            .expect("valid calendar date");
        let last = Date::from_calendar_date(self.year, month, last_day)
            .expect("valid calendar date");

        let start = PrimitiveDateTime::new(first, Time::MIDNIGHT).assume_utc();
        let end = PrimitiveDateTime::new(
            last,
            Time::from_hms_micro(23, 59, 59, 999_999).expect("valid time"),
        )
        .assume_utc();

        RangeInclusive::new(
            start.try_into().expect("in range"),
            end.try_into().expect("in range"),
        )
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { year, month } = self;
        write!(f, "{year:04}-{month:02}")
    }
}

impl FromStr for Month {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s.split_once('-').ok_or("missing `-` separator")?;
        let year = year.parse().map_err(|_| "invalid year")?;
        let month = month.parse().map_err(|_| "invalid month")?;
        Self::new(year, month).ok_or("month out of range")
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use crate::DateTime;

    use super::Month;

    #[test]
    fn validates_components() {
        assert!(Month::new(2024, 1).is_some());
        assert!(Month::new(2024, 12).is_some());

        assert!(Month::new(2024, 0).is_none());
        assert!(Month::new(2024, 13).is_none());
        assert!(Month::new(0, 5).is_none());
        assert!(Month::new(-1, 5).is_none());
    }

    #[test]
    fn pred_rolls_over_year() {
        let jan = Month::new(2024, 1).unwrap();
        assert_eq!(jan.pred(), Month::new(2023, 12).unwrap());

        let mar = Month::new(2024, 3).unwrap();
        assert_eq!(mar.pred(), Month::new(2024, 2).unwrap());
    }

    #[test]
    fn range_covers_whole_month() {
        let range = Month::new(2024, 6).unwrap().range::<()>();
        assert_eq!(
            *range.start(),
            DateTime::from_rfc3339("2024-06-01T00:00:00Z").unwrap(),
        );
        assert_eq!(
            *range.end(),
            DateTime::from_rfc3339("2024-06-30T23:59:59.999999Z").unwrap(),
        );
    }

    #[test]
    fn range_handles_leap_february() {
        let leap = Month::new(2024, 2).unwrap().range::<()>();
        assert_eq!(
            *leap.end(),
            DateTime::from_rfc3339("2024-02-29T23:59:59.999999Z").unwrap(),
        );

        let common = Month::new(2023, 2).unwrap().range::<()>();
        assert_eq!(
            *common.end(),
            DateTime::from_rfc3339("2023-02-28T23:59:59.999999Z").unwrap(),
        );
    }

    #[test]
    fn parses_and_formats() {
        let month = Month::from_str("2024-06").unwrap();
        assert_eq!(month, Month::new(2024, 6).unwrap());
        assert_eq!(month.to_string(), "2024-06");

        assert!(Month::from_str("2024").is_err());
        assert!(Month::from_str("2024-13").is_err());
        assert!(Month::from_str("year-06").is_err());
    }
}
