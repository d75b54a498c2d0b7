//! The tabular (arithmetic) Hijri calendar.
//!
//! Years run in 30-year cycles of 10 631 days. Eleven years of each cycle are
//! leap years of 355 days; which ones depends on the [`LeapYearPattern`].
//! Odd months have 30 days, even months 29, and the twelfth month gains a day
//! in leap years.

use crate::consts::{
    HIJRI_COMMON_YEAR_DAYS, HIJRI_CYCLE_DAYS, HIJRI_CYCLE_YEARS, HIJRI_EPOCH_JDN,
    HIJRI_LONG_MONTH_DAYS, HIJRI_SHORT_MONTH_DAYS, MAX_MONTH,
};
use crate::julian::{JulianDay, MAX_DAY_NUMBER};
use crate::names::HijriMonth;
use crate::prelude::*;
use crate::types::{Day, Month};
use crate::{Calendar, CalendarError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};

/// Which years of the 30-year cycle are leap years.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum LeapYearPattern {
    /// The most widespread rule: 2, 5, 7, 10, 13, 16, 18, 21, 24, 26, 29.
    #[default]
    #[display(fmt = "default")]
    Default,
    /// The "Kuwaiti algorithm": year 15 replaces year 16.
    #[display(fmt = "base15")]
    Base15,
    /// 2, 5, 8, 10, 13, 16, 19, 21, 24, 27, 29.
    #[display(fmt = "fatimid")]
    Fatimid,
    /// 2, 5, 8, 11, 13, 16, 19, 21, 24, 27, 30.
    #[display(fmt = "habash_al_hasib")]
    HabashAlHasib,
}

const DEFAULT_LEAP_YEARS: [u8; 11] = [2, 5, 7, 10, 13, 16, 18, 21, 24, 26, 29];
const BASE15_LEAP_YEARS: [u8; 11] = [2, 5, 7, 10, 13, 15, 18, 21, 24, 26, 29];
const FATIMID_LEAP_YEARS: [u8; 11] = [2, 5, 8, 10, 13, 16, 19, 21, 24, 27, 29];
const HABASH_AL_HASIB_LEAP_YEARS: [u8; 11] = [2, 5, 8, 11, 13, 16, 19, 21, 24, 27, 30];

impl LeapYearPattern {
    pub const ALL: [Self; 4] = [
        Self::Default,
        Self::Base15,
        Self::Fatimid,
        Self::HabashAlHasib,
    ];

    /// Leap positions within the cycle, 1..=30.
    pub const fn leap_positions(self) -> &'static [u8; 11] {
        match self {
            Self::Default => &DEFAULT_LEAP_YEARS,
            Self::Base15 => &BASE15_LEAP_YEARS,
            Self::Fatimid => &FATIMID_LEAP_YEARS,
            Self::HabashAlHasib => &HABASH_AL_HASIB_LEAP_YEARS,
        }
    }

    /// Whether `year` has 355 days. The last year of each cycle is position 30.
    pub fn is_leap_year(self, year: i32) -> bool {
        let position = match year.rem_euclid(HIJRI_CYCLE_YEARS) {
            0 => HIJRI_CYCLE_YEARS,
            p => p,
        };
        self.leap_positions()
            .iter()
            .any(|&leap| i32::from(leap) == position)
    }

    pub fn days_in_year(self, year: i32) -> u16 {
        if self.is_leap_year(year) { 355 } else { 354 }
    }

    /// Length of `month` in `year`.
    pub fn days_in_month(self, year: i32, month: Month) -> u8 {
        let m = month.get();
        if m % 2 == 1 || (m == MAX_MONTH && self.is_leap_year(year)) {
            HIJRI_LONG_MONTH_DAYS
        } else {
            HIJRI_SHORT_MONTH_DAYS
        }
    }
}

impl FromStr for LeapYearPattern {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|pattern| pattern.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CalendarError::InvalidFormat(format!("Unknown leap year pattern: {s}")))
    }
}

/// A date on the tabular Hijri calendar under a given [`LeapYearPattern`].
///
/// The supported range runs from 1 Muharram 1 AH (622-07-16) to the Hijri
/// date of 9999-12-31, which is 2 Rabi' al-Thani 9666 under every pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTabularDate", into = "RawTabularDate")]
pub struct TabularHijriDate {
    year: i32,
    month: Month,
    day: Day,
    pattern: LeapYearPattern,
}

#[derive(Serialize, Deserialize)]
struct RawTabularDate {
    year: i32,
    month: u8,
    day: u8,
    #[serde(default)]
    pattern: LeapYearPattern,
}

impl TryFrom<RawTabularDate> for TabularHijriDate {
    type Error = CalendarError;

    fn try_from(raw: RawTabularDate) -> Result<Self, Self::Error> {
        Self::new(raw.year, raw.month, raw.day, raw.pattern)
    }
}

impl From<TabularHijriDate> for RawTabularDate {
    fn from(date: TabularHijriDate) -> Self {
        Self {
            year: date.year,
            month: date.month.get(),
            day: date.day.get(),
            pattern: date.pattern,
        }
    }
}

impl TabularHijriDate {
    /// Creates a tabular Hijri date.
    ///
    /// # Errors
    /// - `CalendarError::InvalidYear` for years below 1
    /// - `CalendarError::InvalidMonth` / `DayOutOfBounds` / `InvalidDay` when
    ///   the month or day does not exist in that year
    /// - `CalendarError::OutOfRange` for dates after 9999-12-31 CE
    pub fn new(
        year: i32,
        month: u8,
        day: u8,
        pattern: LeapYearPattern,
    ) -> Result<Self, CalendarError> {
        if year < 1 {
            debug!(year, "rejecting tabular Hijri year before 1 AH");
            return Err(CalendarError::InvalidYear {
                calendar: Calendar::TabularHijri,
                year,
            });
        }

        let month = Month::new(month)?;
        let day = Day::new(day)?;
        if day.get() > pattern.days_in_month(year, month) {
            return Err(CalendarError::InvalidDay {
                calendar: Calendar::TabularHijri,
                year,
                month: month.get(),
                day: day.get(),
            });
        }

        let date = Self {
            year,
            month,
            day,
            pattern,
        };
        if HIJRI_EPOCH_JDN + date.days_since_epoch() > MAX_DAY_NUMBER {
            debug!(%date, "rejecting tabular Hijri date after 9999-12-31");
            return Err(CalendarError::out_of_range(
                Calendar::TabularHijri,
                format!("{date} falls after 9999-12-31"),
            ));
        }
        Ok(date)
    }

    pub const fn year(&self) -> i32 {
        self.year
    }

    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    pub const fn pattern(&self) -> LeapYearPattern {
        self.pattern
    }

    pub const fn month_name(&self) -> HijriMonth {
        HijriMonth::from_month(self.month)
    }

    pub fn is_leap_year(&self) -> bool {
        self.pattern.is_leap_year(self.year)
    }

    /// Length of `month` in `year` under `pattern`.
    pub fn days_in_month(year: i32, month: Month, pattern: LeapYearPattern) -> u8 {
        pattern.days_in_month(year, month)
    }

    /// Days from the epoch, counting 1 Muharram 1 AH as day 1.
    fn days_since_epoch(&self) -> i64 {
        let elapsed_years = self.year - 1;
        let cycles = i64::from(elapsed_years.div_euclid(HIJRI_CYCLE_YEARS));
        let years_into_cycle = elapsed_years.rem_euclid(HIJRI_CYCLE_YEARS);

        let leap_days: i64 = (1..=years_into_cycle)
            .map(|y| i64::from(self.pattern.is_leap_year(y)))
            .sum();

        let m = i64::from(self.month.get());
        let days_before_month = i64::from(HIJRI_SHORT_MONTH_DAYS) * (m - 1) + m / 2;

        cycles * HIJRI_CYCLE_DAYS
            + i64::from(years_into_cycle) * HIJRI_COMMON_YEAR_DAYS
            + leap_days
            + days_before_month
            + i64::from(self.day.get())
    }

    /// Julian Day at the start (civil midnight) of this date.
    pub fn to_julian_day(&self) -> JulianDay {
        let jd = JulianDay::midnight_of(HIJRI_EPOCH_JDN + self.days_since_epoch());
        trace!(hijri = %self, %jd, "tabular Hijri to Julian Day");
        jd
    }

    /// The tabular Hijri date containing `jd`.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` before 1 Muharram 1 AH.
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_julian_day(jd: JulianDay, pattern: LeapYearPattern) -> Result<Self, CalendarError> {
        let days = jd.day_number() - HIJRI_EPOCH_JDN;
        if days < 1 {
            debug!(%jd, "rejecting Julian Day before the Hijri epoch");
            return Err(CalendarError::out_of_range(
                Calendar::TabularHijri,
                format!("{jd} precedes 1 Muharram 1 AH (622-07-16)"),
            ));
        }

        // JulianDay stops at 9999-12-31, so the year stays far below i32::MAX.
        let cycles = (days - 1).div_euclid(HIJRI_CYCLE_DAYS);
        let mut remaining = (days - 1).rem_euclid(HIJRI_CYCLE_DAYS) + 1;
        let mut year = (cycles * i64::from(HIJRI_CYCLE_YEARS)) as i32 + 1;

        loop {
            let length = i64::from(pattern.days_in_year(year));
            if remaining <= length {
                break;
            }
            remaining -= length;
            year += 1;
        }

        let mut month = 1;
        loop {
            let length = i64::from(pattern.days_in_month(year, Month::new_unchecked(month)));
            if remaining <= length || month == MAX_MONTH {
                break;
            }
            remaining -= length;
            month += 1;
        }

        let date = Self {
            year,
            month: Month::new_unchecked(month),
            day: Day::new_unchecked(remaining as u8),
            pattern,
        };
        trace!(%jd, hijri = %date, ?pattern, "Julian Day to tabular Hijri");
        Ok(date)
    }
}

impl fmt::Display for TabularHijriDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.year,
            self.month.get(),
            self.day.get()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::civil::CivilDate;

    fn hijri(y: i32, m: u8, d: u8) -> TabularHijriDate {
        TabularHijriDate::new(y, m, d, LeapYearPattern::Default).unwrap()
    }

    fn civil(y: i32, m: u8, d: u8) -> CivilDate {
        CivilDate::new(y, m, d).unwrap()
    }

    #[test]
    fn test_leap_positions_per_pattern() {
        let leap_counts: Vec<usize> = LeapYearPattern::ALL
            .iter()
            .map(|p| (1..=30).filter(|&y| p.is_leap_year(y)).count())
            .collect();
        assert_eq!(leap_counts, vec![11, 11, 11, 11]);

        assert!(LeapYearPattern::Default.is_leap_year(16));
        assert!(!LeapYearPattern::Default.is_leap_year(15));
        assert!(LeapYearPattern::Base15.is_leap_year(15));
        assert!(!LeapYearPattern::Base15.is_leap_year(16));
        assert!(LeapYearPattern::Fatimid.is_leap_year(8));
        assert!(!LeapYearPattern::Fatimid.is_leap_year(7));
    }

    #[test]
    fn test_position_thirty_is_reachable() {
        let pattern = LeapYearPattern::HabashAlHasib;
        assert!(pattern.is_leap_year(30));
        assert!(pattern.is_leap_year(1440));
        assert!(!pattern.is_leap_year(29));
        assert!(!LeapYearPattern::Default.is_leap_year(30));
    }

    #[test]
    fn test_cycle_is_10631_days() {
        for pattern in LeapYearPattern::ALL {
            let days: i64 = (1..=30).map(|y| i64::from(pattern.days_in_year(y))).sum();
            assert_eq!(days, HIJRI_CYCLE_DAYS, "{pattern} cycle length");
        }
    }

    #[test]
    fn test_month_lengths() {
        let pattern = LeapYearPattern::Default;
        let month = |m| Month::new(m).unwrap();
        assert_eq!(pattern.days_in_month(1430, month(1)), 30);
        assert_eq!(pattern.days_in_month(1430, month(2)), 29);
        assert_eq!(pattern.days_in_month(1430, month(12)), 29);
        // 1430 is year 20 of its cycle, 1431 is year 21.
        assert_eq!(pattern.days_in_month(1431, month(12)), 30);
        assert_eq!(TabularHijriDate::days_in_month(1431, month(12), pattern), 30);
    }

    #[test]
    fn test_new_rejects_invalid_dates() {
        let pattern = LeapYearPattern::Default;
        assert!(matches!(
            TabularHijriDate::new(0, 1, 1, pattern),
            Err(CalendarError::InvalidYear { year: 0, .. })
        ));
        assert!(matches!(
            TabularHijriDate::new(-5, 1, 1, pattern),
            Err(CalendarError::InvalidYear { .. })
        ));
        assert!(matches!(
            TabularHijriDate::new(1430, 13, 1, pattern),
            Err(CalendarError::InvalidMonth(13))
        ));
        assert!(matches!(
            TabularHijriDate::new(1430, 2, 30, pattern),
            Err(CalendarError::InvalidDay { .. })
        ));
        assert!(matches!(
            TabularHijriDate::new(1430, 12, 30, pattern),
            Err(CalendarError::InvalidDay { .. })
        ));
        assert!(TabularHijriDate::new(1431, 12, 30, pattern).is_ok());
    }

    #[test]
    fn test_upper_bound() {
        for pattern in LeapYearPattern::ALL {
            let last = TabularHijriDate::new(9666, 4, 2, pattern).unwrap();
            assert_eq!(last.to_julian_day().to_civil(), civil(9999, 12, 31));

            let err = TabularHijriDate::new(9666, 4, 3, pattern).unwrap_err();
            assert!(err.is_out_of_range(), "{pattern}: {err}");
        }
    }

    #[test]
    fn test_reference_conversions() {
        let cases = [
            ((1, 1, 1), (622, 7, 16)),
            ((100, 10, 1), (719, 4, 26)),
            ((615, 9, 17), (1218, 12, 7)),
            ((990, 9, 17), (1582, 10, 15)),
            ((1430, 1, 1), (2008, 12, 29)),
            ((1502, 12, 30), (2079, 10, 26)),
        ];
        for ((hy, hm, hd), (cy, cm, cd)) in cases {
            let h = hijri(hy, hm, hd);
            let c = civil(cy, cm, cd);
            assert_eq!(h.to_julian_day().to_civil(), c, "{h} to civil");
            assert_eq!(
                TabularHijriDate::from_julian_day(c.to_julian_day(), LeapYearPattern::Default)
                    .unwrap(),
                h,
                "{c} to Hijri"
            );
        }
    }

    #[test]
    fn test_epoch_boundary() {
        let epoch = civil(622, 7, 16).to_julian_day();
        assert_eq!(
            TabularHijriDate::from_julian_day(epoch, LeapYearPattern::Default).unwrap(),
            hijri(1, 1, 1)
        );

        let before = civil(622, 7, 15).to_julian_day();
        let err = TabularHijriDate::from_julian_day(before, LeapYearPattern::Default).unwrap_err();
        assert!(err.is_out_of_range());
    }

    #[test]
    fn test_last_day_of_year_is_not_next_year() {
        for pattern in LeapYearPattern::ALL {
            for year in [1, 2, 29, 30, 31, 1440] {
                let last_day = if pattern.is_leap_year(year) { 30 } else { 29 };
                let date = TabularHijriDate::new(year, 12, last_day, pattern).unwrap();
                let back = TabularHijriDate::from_julian_day(date.to_julian_day(), pattern).unwrap();
                assert_eq!(back, date, "{pattern} year {year}");

                let next = date.to_julian_day().add_days(1).unwrap();
                let next = TabularHijriDate::from_julian_day(next, pattern).unwrap();
                assert_eq!(
                    (next.year(), next.month(), next.day()),
                    (year + 1, 1, 1),
                    "{pattern} year {year}"
                );
            }
        }
    }

    #[test]
    fn test_time_of_day_is_dropped() {
        let evening = CivilDate::new_with_time(2008, 12, 29, 23, 59, 59).unwrap();
        let date =
            TabularHijriDate::from_julian_day(evening.to_julian_day(), LeapYearPattern::Default)
                .unwrap();
        assert_eq!(date, hijri(1430, 1, 1));
    }

    #[test]
    fn test_month_name_and_display() {
        let date = hijri(615, 9, 17);
        assert_eq!(date.month_name(), HijriMonth::Ramadan);
        assert_eq!(date.to_string(), "0615-09-17");
    }

    #[test]
    fn test_pattern_names() {
        for pattern in LeapYearPattern::ALL {
            let json = serde_json::to_string(&pattern).unwrap();
            assert_eq!(json, format!("\"{pattern}\""));
            assert_eq!(pattern.to_string().parse::<LeapYearPattern>().unwrap(), pattern);
        }
        assert_eq!(
            "HABASH_AL_HASIB".parse::<LeapYearPattern>().unwrap(),
            LeapYearPattern::HabashAlHasib
        );
        assert!("kuwaiti".parse::<LeapYearPattern>().is_err());
        assert_eq!(LeapYearPattern::default(), LeapYearPattern::Default);
    }

    #[test]
    fn test_serde() {
        let date = TabularHijriDate::new(1430, 1, 1, LeapYearPattern::Fatimid).unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, r#"{"year":1430,"month":1,"day":1,"pattern":"fatimid"}"#);
        let parsed: TabularHijriDate = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, date);

        let defaulted: TabularHijriDate =
            serde_json::from_str(r#"{"year":1430,"month":1,"day":1}"#).unwrap();
        assert_eq!(defaulted.pattern(), LeapYearPattern::Default);

        let result: Result<TabularHijriDate, _> =
            serde_json::from_str(r#"{"year":1430,"month":2,"day":30}"#);
        assert!(result.is_err());
    }
}
