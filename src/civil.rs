use crate::consts::{
    CUTOVER_YEAR, DATE_SEPARATOR, DATE_TIME_SEPARATOR, FIRST_GREGORIAN_DAY, LAST_JULIAN_DAY,
    MAX_YEAR, MIN_YEAR, OCTOBER,
};
use crate::julian::JulianDay;
use crate::prelude::*;
use crate::types::{Day, Month, TimeOfDay, days_in_civil_month, parse_date_parts, parse_time};
use crate::{Calendar, CalendarError};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Which calendar rule governs a civil date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum CalendarRegime {
    /// On or before 1582-10-04
    #[display(fmt = "Julian")]
    Julian,
    /// On or after 1582-10-15
    #[display(fmt = "Gregorian")]
    Gregorian,
}

/// Historical era of a civil year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Era {
    #[display(fmt = "BC")]
    BeforeChrist,
    #[display(fmt = "AD")]
    AnnoDomini,
}

/// A date on the civil calendar: Julian up to 1582-10-04, Gregorian from
/// 1582-10-15, with an optional time of day (midnight by default).
///
/// Years use astronomical numbering: year 0 is 1 BC and −4712 is 4713 BC.
/// The supported range is −4712-01-01 through 9999-12-31.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CivilDate {
    year: i32,
    month: Month,
    day: Day,
    time: TimeOfDay,
}

/// True for dates on or after the first Gregorian day, 1582-10-15.
/// Dates inside the cutover gap compare as Julian.
pub(crate) const fn is_gregorian_date(year: i32, month: u8, day: u8) -> bool {
    year > CUTOVER_YEAR
        || (year == CUTOVER_YEAR
            && (month > OCTOBER || (month == OCTOBER && day >= FIRST_GREGORIAN_DAY)))
}

const fn in_cutover_gap(year: i32, month: u8, day: u8) -> bool {
    year == CUTOVER_YEAR && month == OCTOBER && day > LAST_JULIAN_DAY && day < FIRST_GREGORIAN_DAY
}

impl CivilDate {
    /// Creates a civil date at midnight.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` for years outside −4712..=9999,
    /// `InvalidMonth` / `DayOutOfBounds` / `InvalidDay` for impossible dates and
    /// `CutoverGap` for 1582-10-05 through 1582-10-14.
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, CalendarError> {
        Self::from_parts(year, Month::new(month)?, Day::new(day)?, TimeOfDay::MIDNIGHT)
    }

    /// Creates a civil date with a time of day.
    ///
    /// # Errors
    /// As [`CivilDate::new`], plus `InvalidTime` for an impossible time.
    pub fn new_with_time(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Result<Self, CalendarError> {
        Self::from_parts(
            year,
            Month::new(month)?,
            Day::new(day)?,
            TimeOfDay::new(hour, minute, second)?,
        )
    }

    /// Creates a civil date from already validated components.
    ///
    /// # Errors
    /// See [`CivilDate::new`].
    pub fn from_parts(
        year: i32,
        month: Month,
        day: Day,
        time: TimeOfDay,
    ) -> Result<Self, CalendarError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            debug!(year, "rejecting civil year outside the supported range");
            return Err(CalendarError::out_of_range(
                Calendar::Civil,
                format!("year {year} is outside {MIN_YEAR}..={MAX_YEAR}"),
            ));
        }

        let max_day = days_in_civil_month(year, month.get());
        if day.get() > max_day {
            return Err(CalendarError::InvalidDay {
                calendar: Calendar::Civil,
                year,
                month: month.get(),
                day: day.get(),
            });
        }

        if in_cutover_gap(year, month.get(), day.get()) {
            debug!(day = day.get(), "rejecting date inside the 1582 cutover gap");
            return Err(CalendarError::CutoverGap { day: day.get() });
        }

        Ok(Self {
            year,
            month,
            day,
            time,
        })
    }

    // Components come from the Julian Day inverse, which only yields real dates.
    pub(crate) const fn from_parts_unchecked(
        year: i32,
        month: Month,
        day: Day,
        time: TimeOfDay,
    ) -> Self {
        Self {
            year,
            month,
            day,
            time,
        }
    }

    /// Astronomical year (0 is 1 BC).
    pub const fn year(&self) -> i32 {
        self.year
    }

    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    pub const fn month_typed(&self) -> Month {
        self.month
    }

    pub const fn day_typed(&self) -> Day {
        self.day
    }

    pub const fn time(&self) -> TimeOfDay {
        self.time
    }

    /// Same date with the given time of day.
    #[must_use]
    pub const fn at(self, time: TimeOfDay) -> Self {
        Self { time, ..self }
    }

    /// Same date at `hour:minute:second`.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidTime` for an impossible time.
    pub fn with_time(self, hour: u8, minute: u8, second: u8) -> Result<Self, CalendarError> {
        TimeOfDay::new(hour, minute, second).map(|time| self.at(time))
    }

    /// Same date at midnight.
    #[must_use]
    pub const fn date_only(self) -> Self {
        self.at(TimeOfDay::MIDNIGHT)
    }

    /// Calendar rule in force for this date.
    pub const fn regime(&self) -> CalendarRegime {
        if is_gregorian_date(self.year, self.month.get(), self.day.get()) {
            CalendarRegime::Gregorian
        } else {
            CalendarRegime::Julian
        }
    }

    /// Historical reading of the year: astronomical year 0 is 1 BC,
    /// −4712 is 4713 BC.
    pub const fn era(&self) -> (Era, u32) {
        if self.year > 0 {
            (Era::AnnoDomini, self.year.unsigned_abs())
        } else {
            (Era::BeforeChrist, self.year.unsigned_abs() + 1)
        }
    }

    pub fn to_julian_day(&self) -> JulianDay {
        JulianDay::from_civil(self)
    }

    /// Shifts by whole days across month, year and cutover boundaries.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` if the result leaves the civil range.
    pub fn add_days(&self, days: i64) -> Result<Self, CalendarError> {
        self.to_julian_day().add_days(days).map(JulianDay::to_civil)
    }
}

impl FromStr for CivilDate {
    type Err = CalendarError;

    /// Accepts `YYYY-MM-DD`, `-YYYY-MM-DD`, and either form followed by
    /// `THH:MM:SS` or ` HH:MM:SS`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (date_part, time_part) = match trimmed.split_once([DATE_TIME_SEPARATOR, ' ']) {
            Some((date, time)) => (date, Some(time)),
            None => (trimmed, None),
        };

        let (year, month, day) = parse_date_parts(date_part)?;
        let time = time_part.map(parse_time).transpose()?.unwrap_or_default();

        Self::from_parts(year, Month::new(month)?, Day::new(day)?, time)
    }
}

impl fmt::Display for CivilDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.year < 0 {
            write!(f, "{DATE_SEPARATOR}{:04}", self.year.unsigned_abs())?;
        } else {
            write!(f, "{:04}", self.year)?;
        }
        write!(
            f,
            "{DATE_SEPARATOR}{:02}{DATE_SEPARATOR}{:02}",
            self.month.get(),
            self.day.get()
        )?;
        if !self.time.is_midnight() {
            write!(f, "{DATE_TIME_SEPARATOR}{}", self.time)?;
        }
        Ok(())
    }
}

impl serde::Serialize for CivilDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for CivilDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// `NaiveDate` counts 0001-01-01 (proleptic Gregorian) as day 1, which is
/// Julian Day Number 1 721 426.
#[cfg(feature = "chrono")]
const CE_DAY_NUMBER_OFFSET: i64 = 1_721_425;

#[cfg(feature = "chrono")]
impl CivilDate {
    /// Converts a proleptic Gregorian `NaiveDate` to the civil date of the
    /// same day (Julian-calendar reading before 1582-10-15).
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` outside −4712-01-01 ..= 9999-12-31.
    pub fn from_naive_date(date: chrono::NaiveDate) -> Result<Self, CalendarError> {
        use chrono::Datelike;

        let day_number = i64::from(date.num_days_from_ce()) + CE_DAY_NUMBER_OFFSET;
        JulianDay::from_day_number(day_number).map(JulianDay::to_civil)
    }

    /// As [`CivilDate::from_naive_date`], keeping the time to the second.
    ///
    /// # Errors
    /// See [`CivilDate::from_naive_date`].
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_naive_date_time(date_time: chrono::NaiveDateTime) -> Result<Self, CalendarError> {
        use chrono::Timelike;

        let date = Self::from_naive_date(date_time.date())?;
        // chrono keeps leap seconds in the nanosecond field, so second() is 0..=59.
        let time = TimeOfDay::new(
            date_time.hour() as u8,
            date_time.minute() as u8,
            date_time.second() as u8,
        )?;
        Ok(date.at(time))
    }

    /// The same day as a proleptic Gregorian `NaiveDate`, dropping the time.
    pub fn to_naive_date(&self) -> Option<chrono::NaiveDate> {
        let days = self.to_julian_day().day_number() - CE_DAY_NUMBER_OFFSET;
        chrono::NaiveDate::from_num_days_from_ce_opt(i32::try_from(days).ok()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid() {
        let date = CivilDate::new(2008, 12, 29).unwrap();
        assert_eq!(date.year(), 2008);
        assert_eq!(date.month(), 12);
        assert_eq!(date.day(), 29);
        assert!(date.time().is_midnight());
        assert_eq!(date.regime(), CalendarRegime::Gregorian);
    }

    #[test]
    fn test_cutover_boundaries() {
        assert!(CivilDate::new(1582, 10, 4).is_ok());
        assert!(CivilDate::new(1582, 10, 15).is_ok());
        for day in 5..=14 {
            let result = CivilDate::new(1582, 10, day);
            assert!(
                matches!(result, Err(CalendarError::CutoverGap { day: d }) if d == day),
                "1582-10-{day:02} should fall in the gap"
            );
            assert!(result.unwrap_err().is_invalid_date());
        }
        assert_eq!(
            CivilDate::new(1582, 10, 4).unwrap().regime(),
            CalendarRegime::Julian
        );
        assert_eq!(
            CivilDate::new(1582, 10, 15).unwrap().regime(),
            CalendarRegime::Gregorian
        );
    }

    #[test]
    fn test_leap_rules_by_regime() {
        // Julian rule: 1500 is a leap year, Gregorian rule: 1700 is not.
        assert!(CivilDate::new(1500, 2, 29).is_ok());
        assert!(matches!(
            CivilDate::new(1700, 2, 29),
            Err(CalendarError::InvalidDay { .. })
        ));
        assert!(CivilDate::new(2000, 2, 29).is_ok());
        assert!(CivilDate::new(-4712, 2, 29).is_ok());
    }

    #[test]
    fn test_year_range() {
        assert!(CivilDate::new(-4712, 1, 1).is_ok());
        assert!(CivilDate::new(9999, 12, 31).is_ok());

        let err = CivilDate::new(-4713, 12, 31).unwrap_err();
        assert!(err.is_out_of_range());
        assert!(CivilDate::new(10_000, 1, 1).unwrap_err().is_out_of_range());
    }

    #[test]
    fn test_invalid_components() {
        assert!(matches!(
            CivilDate::new(2020, 13, 1),
            Err(CalendarError::InvalidMonth(13))
        ));
        assert!(matches!(
            CivilDate::new(2020, 4, 31),
            Err(CalendarError::InvalidDay {
                month: 4,
                day: 31,
                ..
            })
        ));
        assert!(matches!(
            CivilDate::new(2020, 1, 0),
            Err(CalendarError::DayOutOfBounds(0))
        ));
        assert!(matches!(
            CivilDate::new_with_time(2020, 1, 1, 24, 0, 0),
            Err(CalendarError::InvalidTime { .. })
        ));
    }

    #[test]
    fn test_era() {
        assert_eq!(CivilDate::new(2024, 1, 1).unwrap().era(), (Era::AnnoDomini, 2024));
        assert_eq!(CivilDate::new(0, 1, 1).unwrap().era(), (Era::BeforeChrist, 1));
        assert_eq!(
            CivilDate::new(-4712, 1, 1).unwrap().era(),
            (Era::BeforeChrist, 4713)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(CivilDate::new(2008, 12, 29).unwrap().to_string(), "2008-12-29");
        assert_eq!(CivilDate::new(622, 7, 16).unwrap().to_string(), "0622-07-16");
        assert_eq!(CivilDate::new(-4712, 1, 1).unwrap().to_string(), "-4712-01-01");
        assert_eq!(CivilDate::new(-44, 3, 15).unwrap().to_string(), "-0044-03-15");
        assert_eq!(
            CivilDate::new_with_time(2000, 1, 1, 12, 0, 0)
                .unwrap()
                .to_string(),
            "2000-01-01T12:00:00"
        );
    }

    #[test]
    fn test_parse() {
        let date: CivilDate = "2008-12-29".parse().unwrap();
        assert_eq!(date, CivilDate::new(2008, 12, 29).unwrap());

        let date: CivilDate = "-2961-01-01T19:47:04".parse().unwrap();
        assert_eq!(date, CivilDate::new_with_time(-2961, 1, 1, 19, 47, 4).unwrap());

        let date: CivilDate = "2000-01-01 12:00:00".parse().unwrap();
        assert_eq!(date.time(), TimeOfDay::NOON);

        assert!(matches!(
            "1582-10-10".parse::<CivilDate>(),
            Err(CalendarError::CutoverGap { day: 10 })
        ));
        assert!(matches!(
            "2008/12/29".parse::<CivilDate>(),
            Err(CalendarError::InvalidFormat(_))
        ));
        assert!(matches!(
            "".parse::<CivilDate>(),
            Err(CalendarError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_display_parse_agree() {
        for text in ["-4712-01-01", "0000-02-29", "1582-10-04", "2077-11-16T23:59:59"] {
            let date: CivilDate = text.parse().unwrap();
            assert_eq!(date.to_string(), text);
        }
    }

    #[test]
    fn test_ordering() {
        let a = CivilDate::new(-1, 12, 31).unwrap();
        let b = CivilDate::new(0, 1, 1).unwrap();
        let c = CivilDate::new_with_time(0, 1, 1, 0, 0, 1).unwrap();
        let d = CivilDate::new(1582, 10, 15).unwrap();
        assert!(a < b);
        assert!(b < c);
        assert!(c < d);
    }

    #[test]
    fn test_add_days() {
        let date = CivilDate::new(1582, 10, 4).unwrap();
        assert_eq!(date.add_days(1).unwrap(), CivilDate::new(1582, 10, 15).unwrap());
        assert_eq!(
            CivilDate::new(2024, 2, 28).unwrap().add_days(2).unwrap(),
            CivilDate::new(2024, 3, 1).unwrap()
        );
        assert!(CivilDate::new(9999, 12, 31).unwrap().add_days(1).is_err());
    }

    #[test]
    fn test_time_helpers() {
        let date = CivilDate::new_with_time(2000, 1, 1, 6, 30, 0).unwrap();
        assert_eq!(date.date_only(), CivilDate::new(2000, 1, 1).unwrap());
        assert_eq!(date.date_only().at(date.time()), date);
        assert_eq!(date.date_only().with_time(6, 30, 0).unwrap(), date);
        assert!(date.with_time(6, 60, 0).is_err());
    }

    #[test]
    fn test_serde() {
        let date = CivilDate::new_with_time(1218, 12, 7, 8, 0, 0).unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, r#""1218-12-07T08:00:00""#);
        let parsed: CivilDate = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, date);

        let result: Result<CivilDate, _> = serde_json::from_str(r#""1582-10-05""#);
        assert!(result.is_err());
    }

    #[cfg(feature = "chrono")]
    #[test]
    fn test_chrono_bridge() {
        let naive = chrono::NaiveDate::from_ymd_opt(2008, 12, 29).unwrap();
        let date = CivilDate::from_naive_date(naive).unwrap();
        assert_eq!(date, CivilDate::new(2008, 12, 29).unwrap());
        assert_eq!(date.to_naive_date(), Some(naive));

        // Proleptic Gregorian 1582-10-14 is the Julian 1582-10-04.
        let naive = chrono::NaiveDate::from_ymd_opt(1582, 10, 14).unwrap();
        assert_eq!(
            CivilDate::from_naive_date(naive).unwrap(),
            CivilDate::new(1582, 10, 4).unwrap()
        );

        let naive_time = chrono::NaiveDate::from_ymd_opt(2000, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let date = CivilDate::from_naive_date_time(naive_time).unwrap();
        assert_eq!(date.time(), TimeOfDay::NOON);
    }
}
