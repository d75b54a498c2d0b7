//! Julian Day arithmetic.
//!
//! A [`JulianDay`] is kept as whole seconds since JD 0.0 (−4712-01-01 12:00),
//! so the year, month and cutover terms of the Meeus algorithm are evaluated
//! with integer floor division and round-trip exactly. Floating point only
//! appears at the [`JulianDay::from_f64`] / [`JulianDay::to_f64`] boundary.

use crate::civil::{CivilDate, is_gregorian_date};
use crate::consts::{
    DECEMBER, FEBRUARY, GREGORIAN_CUTOVER_JDN, JANUARY, MAX_YEAR, MIN_DAY, MIN_YEAR,
    SECONDS_PER_DAY, SECONDS_PER_HALF_DAY,
};
use crate::types::{Day, Month, TimeOfDay};
use crate::{Calendar, CalendarError};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Day number of the first supported civil day, −4712-01-01.
pub(crate) const MIN_DAY_NUMBER: i64 = civil_day_number(MIN_YEAR, JANUARY, MIN_DAY);
/// Day number of the last supported civil day, 9999-12-31.
pub(crate) const MAX_DAY_NUMBER: i64 = civil_day_number(MAX_YEAR, DECEMBER, 31);

const MIN_SECONDS: i64 = MIN_DAY_NUMBER * SECONDS_PER_DAY - SECONDS_PER_HALF_DAY;
const MAX_SECONDS: i64 = MAX_DAY_NUMBER * SECONDS_PER_DAY + SECONDS_PER_HALF_DAY - 1;

/// Continuous day count since −4712-01-01 at noon, with one-second resolution.
///
/// The fractional part of the real value encodes the time of day:
/// `.0` is noon and `.5` is midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct JulianDay {
    seconds: i64,
}

impl JulianDay {
    /// Converts a civil date (Julian before 1582-10-15, Gregorian from then on).
    pub fn from_civil(date: &CivilDate) -> Self {
        let day_number = civil_day_number(date.year(), date.month(), date.day());
        Self {
            seconds: day_number * SECONDS_PER_DAY - SECONDS_PER_HALF_DAY
                + date.time().seconds_since_midnight(),
        }
    }

    /// Recovers the civil date and time of day.
    pub fn to_civil(self) -> CivilDate {
        let since_midnight = self.seconds + SECONDS_PER_HALF_DAY;
        let day_number = since_midnight.div_euclid(SECONDS_PER_DAY);
        let time = TimeOfDay::from_seconds_unchecked(since_midnight.rem_euclid(SECONDS_PER_DAY));
        let (year, month, day) = civil_from_day_number(day_number);
        CivilDate::from_parts_unchecked(year, Month::new_unchecked(month), Day::new_unchecked(day), time)
    }

    /// Builds a Julian Day from its real value, rounded to the nearest second.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` for non-finite values and for values
    /// outside −4712-01-01 00:00:00 ..= 9999-12-31 23:59:59.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn from_f64(jd: f64) -> Result<Self, CalendarError> {
        if !jd.is_finite() {
            debug!(jd, "rejecting non-finite Julian Day");
            return Err(CalendarError::out_of_range(
                Calendar::JulianDay,
                format!("{jd} is not a finite Julian Day"),
            ));
        }
        let seconds = (jd * SECONDS_PER_DAY as f64).round();
        if seconds < MIN_SECONDS as f64 || seconds > MAX_SECONDS as f64 {
            debug!(jd, "rejecting Julian Day outside the civil range");
            return Err(CalendarError::out_of_range(
                Calendar::JulianDay,
                format!("{jd} is outside -4712-01-01 ..= 9999-12-31"),
            ));
        }
        // In range, so the rounded value is an exact integer well within i64.
        Ok(Self {
            seconds: seconds as i64,
        })
    }

    /// The real Julian Day value.
    #[allow(clippy::cast_precision_loss)]
    pub fn to_f64(self) -> f64 {
        self.seconds as f64 / SECONDS_PER_DAY as f64
    }

    /// The civil midnight that begins the given day number.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` if the day is outside the civil range.
    pub fn from_day_number(day_number: i64) -> Result<Self, CalendarError> {
        if !(MIN_DAY_NUMBER..=MAX_DAY_NUMBER).contains(&day_number) {
            debug!(day_number, "rejecting day number outside the civil range");
            return Err(CalendarError::out_of_range(
                Calendar::JulianDay,
                format!("day number {day_number} is outside {MIN_DAY_NUMBER}..={MAX_DAY_NUMBER}"),
            ));
        }
        Ok(Self::midnight_of(day_number))
    }

    // Callers must stay within MIN_DAY_NUMBER..=MAX_DAY_NUMBER.
    pub(crate) const fn midnight_of(day_number: i64) -> Self {
        Self {
            seconds: day_number * SECONDS_PER_DAY - SECONDS_PER_HALF_DAY,
        }
    }

    /// Integer Julian Day Number of the civil day containing this instant.
    /// It changes at civil midnight, not at noon.
    pub const fn day_number(self) -> i64 {
        (self.seconds + SECONDS_PER_HALF_DAY).div_euclid(SECONDS_PER_DAY)
    }

    /// Seconds elapsed since JD 0.0.
    pub const fn seconds(self) -> i64 {
        self.seconds
    }

    /// Shifts by whole days, keeping the time of day.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` if the result leaves the civil range.
    pub fn add_days(self, days: i64) -> Result<Self, CalendarError> {
        let seconds = days
            .checked_mul(SECONDS_PER_DAY)
            .and_then(|delta| self.seconds.checked_add(delta))
            .filter(|s| (MIN_SECONDS..=MAX_SECONDS).contains(s))
            .ok_or_else(|| {
                CalendarError::out_of_range(
                    Calendar::JulianDay,
                    format!("{self} shifted by {days} days"),
                )
            })?;
        Ok(Self { seconds })
    }

    /// Whether this instant falls on or after the first Gregorian day.
    pub const fn is_gregorian(self) -> bool {
        self.day_number() >= GREGORIAN_CUTOVER_JDN
    }
}

impl TryFrom<f64> for JulianDay {
    type Error = CalendarError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_f64(value)
    }
}

impl From<JulianDay> for f64 {
    fn from(jd: JulianDay) -> Self {
        jd.to_f64()
    }
}

impl From<&CivilDate> for JulianDay {
    fn from(date: &CivilDate) -> Self {
        Self::from_civil(date)
    }
}

impl fmt::Display for JulianDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JD {:.5}", self.to_f64())
    }
}

/// Noon-based Julian Day Number of a civil date (Fliegel–Van Flandern / Meeus).
///
/// January and February count as months 13 and 14 of the previous year.
/// `floor(365.25 × Y)` and `floor(30.6001 × (M + 1))` are evaluated as
/// `(1461 × Y) div 4` and `(306001 × (M + 1)) div 10000`.
pub(crate) const fn civil_day_number(year: i32, month: u8, day: u8) -> i64 {
    let (y, m) = if month <= FEBRUARY {
        (year as i64 - 1, month as i64 + 12)
    } else {
        (year as i64, month as i64)
    };

    let correction = if is_gregorian_date(year, month, day) {
        let century = y.div_euclid(100);
        2 - century + century.div_euclid(4)
    } else {
        0
    };

    (1461 * y).div_euclid(4)
        + (306_001 * (m + 1)).div_euclid(10_000)
        + day as i64
        + 1_720_995
        + correction
}

/// Inverse of [`civil_day_number`] (Meeus, with the Z, A, B, C, D, E terms).
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::many_single_char_names)]
pub(crate) const fn civil_from_day_number(z: i64) -> (i32, u8, u8) {
    let a = if z >= GREGORIAN_CUTOVER_JDN {
        // floor((Z − 1867216.25) / 36524.25)
        let alpha = (100 * z - 186_721_625).div_euclid(3_652_425);
        z + 1 + alpha - alpha.div_euclid(4)
    } else {
        z
    };
    let b = a + 1524;
    // floor((B − 122.1) / 365.25)
    let c = (100 * b - 12_210).div_euclid(36_525);
    let d = (1461 * c).div_euclid(4);
    // floor((B − D) / 30.6001)
    let e = (10_000 * (b - d)).div_euclid(306_001);

    let day = b - d - (306_001 * e).div_euclid(10_000);
    let month = if e < 14 { e - 1 } else { e - 13 };
    let year = if month > 2 { c - 4716 } else { c - 4715 };

    (year as i32, month as u8, day as u8)
}
