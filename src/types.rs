use crate::{Calendar, CalendarError};
use crate::consts::{
    CENTURY_CYCLE, CUTOVER_YEAR, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE,
    DATE_SEPARATOR, LEAP_YEAR_CYCLE, MAX_DAY, MAX_MONTH, SECONDS_PER_DAY, TIME_SEPARATOR,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU8;

/// A month value guaranteed to be in the range `1..=MAX_MONTH` (1..=12).
/// Shared by the civil and both Hijri calendars, which all have twelve months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    /// Creates a new Month, validating that it's non-zero and <= `MAX_MONTH`
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidMonth` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, CalendarError> {
        let non_zero = NonZeroU8::new(value).ok_or(CalendarError::InvalidMonth(value))?;
        if value > MAX_MONTH {
            return Err(CalendarError::InvalidMonth(value));
        }
        Ok(Self(non_zero))
    }

    // Only for values produced by the conversion algorithms, which are 1..=12.
    pub(crate) const fn new_unchecked(value: u8) -> Self {
        match NonZeroU8::new(value) {
            Some(non_zero) => Self(non_zero),
            None => Self(NonZeroU8::MIN),
        }
    }

    /// Returns the month value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Month {
    type Error = CalendarError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A day-of-month value in the range `1..=MAX_DAY` (1..=31).
///
/// The upper bound for a particular month depends on the calendar and year,
/// so the date types check it when they are constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Day(NonZeroU8);

impl Day {
    /// Creates a new Day, validating that it's non-zero and <= `MAX_DAY`
    ///
    /// # Errors
    /// Returns `CalendarError::DayOutOfBounds` if the value is 0 or > `MAX_DAY`.
    pub fn new(value: u8) -> Result<Self, CalendarError> {
        let non_zero = NonZeroU8::new(value).ok_or(CalendarError::DayOutOfBounds(value))?;
        if value > MAX_DAY {
            return Err(CalendarError::DayOutOfBounds(value));
        }
        Ok(Self(non_zero))
    }

    // Only for values produced by the conversion algorithms, which are 1..=31.
    pub(crate) const fn new_unchecked(value: u8) -> Self {
        match NonZeroU8::new(value) {
            Some(non_zero) => Self(non_zero),
            None => Self(NonZeroU8::MIN),
        }
    }

    /// Returns the day value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Day {
    type Error = CalendarError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.0.get()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Time of day with one-second resolution.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "RawTime", into = "RawTime")]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
    second: u8,
}

#[derive(Serialize, Deserialize)]
struct RawTime {
    hour: u8,
    minute: u8,
    second: u8,
}

impl TimeOfDay {
    /// 00:00:00
    pub const MIDNIGHT: Self = Self {
        hour: 0,
        minute: 0,
        second: 0,
    };

    /// 12:00:00, the instant a Julian Day begins
    pub const NOON: Self = Self {
        hour: 12,
        minute: 0,
        second: 0,
    };

    /// Creates a time of day.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidTime` if any component is out of range.
    pub const fn new(hour: u8, minute: u8, second: u8) -> Result<Self, CalendarError> {
        if hour > 23 || minute > 59 || second > 59 {
            return Err(CalendarError::InvalidTime {
                hour,
                minute,
                second,
            });
        }
        Ok(Self {
            hour,
            minute,
            second,
        })
    }

    /// Builds a time from seconds elapsed since midnight.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` if `seconds` is not in `0..86400`.
    pub fn from_seconds(seconds: i64) -> Result<Self, CalendarError> {
        if !(0..SECONDS_PER_DAY).contains(&seconds) {
            return Err(CalendarError::out_of_range(
                Calendar::Civil,
                format!("{seconds} seconds is not a time of day"),
            ));
        }
        Ok(Self::from_seconds_unchecked(seconds))
    }

    // Caller guarantees 0 <= seconds < 86400, so every component fits in u8.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub(crate) const fn from_seconds_unchecked(seconds: i64) -> Self {
        Self {
            hour: (seconds / 3600) as u8,
            minute: ((seconds % 3600) / 60) as u8,
            second: (seconds % 60) as u8,
        }
    }

    #[inline]
    pub const fn hour(self) -> u8 {
        self.hour
    }

    #[inline]
    pub const fn minute(self) -> u8 {
        self.minute
    }

    #[inline]
    pub const fn second(self) -> u8 {
        self.second
    }

    /// Seconds elapsed since midnight (0..86400).
    pub const fn seconds_since_midnight(self) -> i64 {
        self.hour as i64 * 3600 + self.minute as i64 * 60 + self.second as i64
    }

    pub const fn is_midnight(self) -> bool {
        self.hour == 0 && self.minute == 0 && self.second == 0
    }
}

impl TryFrom<RawTime> for TimeOfDay {
    type Error = CalendarError;

    fn try_from(raw: RawTime) -> Result<Self, Self::Error> {
        Self::new(raw.hour, raw.minute, raw.second)
    }
}

impl From<TimeOfDay> for RawTime {
    fn from(time: TimeOfDay) -> Self {
        Self {
            hour: time.hour,
            minute: time.minute,
            second: time.second,
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}{TIME_SEPARATOR}{:02}{TIME_SEPARATOR}{:02}",
            self.hour, self.minute, self.second
        )
    }
}

// Helper functions

/// Julian calendar rule: every fourth year, astronomical numbering
/// (so year 0 and −4712 are leap years).
pub const fn is_julian_leap_year(year: i32) -> bool {
    year.rem_euclid(LEAP_YEAR_CYCLE) == 0
}

/// Gregorian calendar rule.
pub const fn is_gregorian_leap_year(year: i32) -> bool {
    (year.rem_euclid(LEAP_YEAR_CYCLE) == 0 && year.rem_euclid(CENTURY_CYCLE) != 0)
        || year.rem_euclid(GREGORIAN_CYCLE) == 0
}

/// Leap rule in force for a civil year. February 1582 still followed the
/// Julian rule; from 1583 on the Gregorian rule applies.
pub const fn is_civil_leap_year(year: i32) -> bool {
    if year <= CUTOVER_YEAR {
        is_julian_leap_year(year)
    } else {
        is_gregorian_leap_year(year)
    }
}

/// Nominal length of a civil month. October 1582 reports 31 even though
/// ten of its days were skipped; the gap is checked separately.
pub const fn days_in_civil_month(year: i32, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_civil_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

// --- text parsing shared by the date types ---

/// Splits `[-]YYYY-MM-DD` into numeric components without validating them
/// against any calendar.
pub(crate) fn parse_date_parts(s: &str) -> Result<(i32, u8, u8), CalendarError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(CalendarError::InvalidFormat("Empty date string".to_owned()));
    }

    let (negative, body) = trimmed
        .strip_prefix(DATE_SEPARATOR)
        .map_or((false, trimmed), |rest| (true, rest));

    let parts: Vec<&str> = body.split(DATE_SEPARATOR).collect();
    if parts.len() != 3 {
        return Err(CalendarError::InvalidFormat(format!(
            "Expected YYYY{DATE_SEPARATOR}MM{DATE_SEPARATOR}DD, found {} {DATE_SEPARATOR} separators in {trimmed}",
            parts.len() - 1
        )));
    }

    let year = parse_number::<i32>(parts[0])?;
    let month = parse_number::<u8>(parts[1])?;
    let day = parse_number::<u8>(parts[2])?;

    Ok((if negative { -year } else { year }, month, day))
}

/// Parses `HH:MM:SS` (or `HH:MM`).
pub(crate) fn parse_time(s: &str) -> Result<TimeOfDay, CalendarError> {
    let parts: Vec<&str> = s.trim().split(TIME_SEPARATOR).collect();
    match parts.as_slice() {
        [hour, minute] => TimeOfDay::new(parse_number(hour)?, parse_number(minute)?, 0),
        [hour, minute, second] => TimeOfDay::new(
            parse_number(hour)?,
            parse_number(minute)?,
            parse_number(second)?,
        ),
        _ => Err(CalendarError::InvalidFormat(format!(
            "Expected HH{TIME_SEPARATOR}MM{TIME_SEPARATOR}SS, found {s}"
        ))),
    }
}

// Digits only: signs are handled by the caller.
fn parse_number<T: std::str::FromStr>(s: &str) -> Result<T, CalendarError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CalendarError::InvalidFormat(s.to_owned()));
    }
    s.parse::<T>()
        .map_err(|_| CalendarError::InvalidFormat(s.to_owned()))
}
