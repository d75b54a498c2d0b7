//! The Umm al-Qura calendar of Saudi Arabia.
//!
//! Month starts are fixed by astronomical criteria rather than a rule, so the
//! calendar is a lookup: one 12-bit mask per year, where bit `i` set means
//! month `i + 1` has 30 days (29 otherwise). The table covers 1356-1500 AH,
//! 1937-03-14 through 2077-11-16.

use crate::consts::{
    DATE_SEPARATOR, HIJRI_EPOCH_JDN, HIJRI_LONG_MONTH_DAYS, HIJRI_SHORT_MONTH_DAYS, MAX_MONTH,
};
use crate::julian::JulianDay;
use crate::names::HijriMonth;
use crate::types::{Day, Month, parse_date_parts};
use crate::{Calendar, CalendarError};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};

/// First year in the table.
pub const UMM_AL_QURA_MIN_YEAR: i32 = 1356;
/// Last year in the table (inclusive).
pub const UMM_AL_QURA_MAX_YEAR: i32 = 1500;

const TABLE_YEARS: usize = 145;

/// Days from the tabular Hijri epoch to 1937-03-13, the day before
/// 1 Muharram 1356.
pub const UMM_AL_QURA_EPOCH_DAYS: i64 = 480_167;

/// Month-length masks for 1356..=1500 AH.
#[rustfmt::skip]
pub const MONTH_LENGTH_TABLE: [u16; TABLE_YEARS] = [
    0xeaa, 0xe94, 0xd2a, 0xc56, 0x4ae, 0xa6d, 0x56a, 0xd55, 0xd4a, 0xa93, // 1356-1365
    0x52b, 0xa5b, 0x53a, 0x6b5, 0xea9, 0xd52, 0xd29, 0xa55, 0x4ad, 0x56d, // 1366-1375
    0xaea, 0x6e4, 0xed1, 0xda2, 0xaaa, 0x95a, 0x2da, 0x5b9, 0xbb2, 0x764, // 1376-1385
    0x6c9, 0x555, 0x2ab, 0x4db, 0xaba, 0x5b4, 0xda9, 0xd52, 0xaa5, 0x92d, // 1386-1395
    0x26d, 0x8ed, 0x2da, 0xad5, 0xaa5, 0xa4b, 0x497, 0x937, 0x2b6, 0x975, // 1396-1405
    0xd69, 0xd52, 0xc95, 0x92b, 0x25b, 0x4db, 0x9d5, 0x5d2, 0xda5, 0xd4a, // 1406-1415
    0xa95, 0x54d, 0xaad, 0x3aa, 0xbd2, 0xbc4, 0xb89, 0xa95, 0x52d, 0x5ad, // 1416-1425
    0xb6a, 0x6d4, 0xdc9, 0xd92, 0xaa6, 0x956, 0x2ae, 0x56d, 0x36a, 0xb55, // 1426-1435
    0xaaa, 0x94d, 0x49d, 0x95d, 0x2ba, 0x5b5, 0x5aa, 0xd55, 0xa9a, 0x92e, // 1436-1445
    0x26e, 0x55d, 0xada, 0x6d4, 0x6a5, 0xb27, 0xa4d, 0x4ad, 0x56d, 0xb5a, // 1446-1455
    0x754, 0xf49, 0xe92, 0xd26, 0xa56, 0x356, 0x6b5, 0xbaa, 0xb92, 0xb25, // 1456-1465
    0x68b, 0xa9b, 0x55a, 0xada, 0x5b4, 0xda9, 0xb52, 0xa9a, 0x536, 0x276, // 1466-1475
    0x575, 0xaf2, 0x6d4, 0x6a9, 0x555, 0x2ad, 0x4bd, 0x9ba, 0x574, 0xb69, // 1476-1485
    0xb52, 0xa95, 0x52d, 0xa5d, 0x4da, 0xad9, 0x6b2, 0xe95, 0xe2a, 0xc96, // 1486-1495
    0x92e, 0xaad, 0x56a, 0xd65, 0xd4a,                                    // 1496-1500
];

/// Days elapsed before each tabulated year; the final entry is the span of
/// the whole table.
pub const YEAR_OFFSETS: [u32; TABLE_YEARS + 1] = year_offsets();

const TABLE_SPAN: u32 = YEAR_OFFSETS[TABLE_YEARS];

const fn year_offsets() -> [u32; TABLE_YEARS + 1] {
    let all_short = HIJRI_SHORT_MONTH_DAYS as u32 * MAX_MONTH as u32;
    let mut offsets = [0; TABLE_YEARS + 1];
    let mut i = 0;
    while i < TABLE_YEARS {
        offsets[i + 1] = offsets[i] + all_short + MONTH_LENGTH_TABLE[i].count_ones();
        i += 1;
    }
    offsets
}

/// Index of `year` in the table, `None` outside 1356..=1500.
fn table_index(year: i32) -> Option<usize> {
    usize::try_from(year.checked_sub(UMM_AL_QURA_MIN_YEAR)?)
        .ok()
        .filter(|&index| index < TABLE_YEARS)
}

const fn month_length(mask: u16, month: u8) -> u8 {
    if mask & (1 << (month - 1)) != 0 {
        HIJRI_LONG_MONTH_DAYS
    } else {
        HIJRI_SHORT_MONTH_DAYS
    }
}

// A year outside the table lies beyond the table window, so it is reported as
// out of range rather than as an invalid date.
fn year_out_of_range(year: i32) -> CalendarError {
    debug!(year, "rejecting Umm al-Qura year outside the table");
    CalendarError::out_of_range(
        Calendar::UmmAlQura,
        format!("year {year} is outside {UMM_AL_QURA_MIN_YEAR}..={UMM_AL_QURA_MAX_YEAR}"),
    )
}

/// A date on the Umm al-Qura calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UmmAlQuraDate {
    year: i32,
    month: Month,
    day: Day,
}

impl UmmAlQuraDate {
    /// Creates an Umm al-Qura date.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` for years outside 1356..=1500, and
    /// `InvalidMonth` / `DayOutOfBounds` / `InvalidDay` when the month or day
    /// does not exist in that year.
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, CalendarError> {
        let index = table_index(year).ok_or_else(|| year_out_of_range(year))?;
        let month = Month::new(month)?;
        let day = Day::new(day)?;

        if day.get() > month_length(MONTH_LENGTH_TABLE[index], month.get()) {
            return Err(CalendarError::InvalidDay {
                calendar: Calendar::UmmAlQura,
                year,
                month: month.get(),
                day: day.get(),
            });
        }
        Ok(Self { year, month, day })
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

    pub const fn month_name(&self) -> HijriMonth {
        HijriMonth::from_month(self.month)
    }

    /// Length of a month according to the table.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` for years outside the table and
    /// `InvalidMonth` for months outside 1-12.
    pub fn days_in_month(year: i32, month: u8) -> Result<u8, CalendarError> {
        let index = table_index(year).ok_or_else(|| year_out_of_range(year))?;
        let month = Month::new(month)?;
        Ok(month_length(MONTH_LENGTH_TABLE[index], month.get()))
    }

    /// 354 or 355 according to the table.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` for years outside the table.
    pub fn days_in_year(year: i32) -> Result<u16, CalendarError> {
        let index = table_index(year).ok_or_else(|| year_out_of_range(year))?;
        let length = YEAR_OFFSETS[index + 1] - YEAR_OFFSETS[index];
        u16::try_from(length).map_err(|_| year_out_of_range(year))
    }

    // Fields were checked against the table at construction.
    fn table_day(&self) -> u32 {
        let index = table_index(self.year).unwrap_or_default();
        let mask = MONTH_LENGTH_TABLE[index];
        let days_before_month: u32 = (1..self.month.get())
            .map(|m| u32::from(month_length(mask, m)))
            .sum();
        YEAR_OFFSETS[index] + days_before_month + u32::from(self.day.get())
    }

    /// Julian Day at the start (civil midnight) of this date.
    pub fn to_julian_day(&self) -> JulianDay {
        let day_number = HIJRI_EPOCH_JDN + UMM_AL_QURA_EPOCH_DAYS + i64::from(self.table_day());
        let jd = JulianDay::midnight_of(day_number);
        trace!(umm_al_qura = %self, %jd, "Umm al-Qura to Julian Day");
        jd
    }

    /// The Umm al-Qura date containing `jd`.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` before 1937-03-14 or after 2077-11-16.
    pub fn from_julian_day(jd: JulianDay) -> Result<Self, CalendarError> {
        let offset = jd.day_number() - HIJRI_EPOCH_JDN - UMM_AL_QURA_EPOCH_DAYS;
        let Some(table_day) = u32::try_from(offset)
            .ok()
            .filter(|day| (1..=TABLE_SPAN).contains(day))
        else {
            debug!(%jd, "rejecting Julian Day outside the Umm al-Qura table");
            return Err(CalendarError::out_of_range(
                Calendar::UmmAlQura,
                format!(
                    "{} is outside 1937-03-14..=2077-11-16",
                    jd.to_civil().date_only()
                ),
            ));
        };

        // YEAR_OFFSETS[0] is 0, so at least one offset lies below table_day.
        let index = YEAR_OFFSETS.partition_point(|&offset| offset < table_day) - 1;
        let mask = MONTH_LENGTH_TABLE[index];
        let mut remaining = table_day - YEAR_OFFSETS[index];

        let mut month = 1;
        while month < MAX_MONTH {
            let length = u32::from(month_length(mask, month));
            if remaining <= length {
                break;
            }
            remaining -= length;
            month += 1;
        }

        let date = Self {
            year: UMM_AL_QURA_MIN_YEAR + i32::try_from(index).unwrap_or_default(),
            month: Month::new_unchecked(month),
            day: Day::new_unchecked(u8::try_from(remaining).unwrap_or_default()),
        };
        trace!(%jd, umm_al_qura = %date, "Julian Day to Umm al-Qura");
        Ok(date)
    }
}

impl fmt::Display for UmmAlQuraDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}{DATE_SEPARATOR}{:02}{DATE_SEPARATOR}{:02}",
            self.year,
            self.month.get(),
            self.day.get()
        )
    }
}

impl FromStr for UmmAlQuraDate {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month, day) = parse_date_parts(s)?;
        Self::new(year, month, day)
    }
}

impl serde::Serialize for UmmAlQuraDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for UmmAlQuraDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
