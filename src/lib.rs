//! Exact date conversions between the civil (Julian/Gregorian) calendar and
//! two variants of the Islamic (Hijri) calendar.
//!
//! Every conversion passes through a [`JulianDay`], a continuous count of
//! days (with second resolution) since −4712-01-01 12:00:
//!
//! - [`CivilDate`] ⇄ [`JulianDay`] handles the 1582 Julian to Gregorian
//!   cutover, during which 1582-10-05 through 1582-10-14 do not exist.
//! - [`TabularHijriDate`] is the arithmetic 30-year-cycle calendar, with one
//!   of four [`LeapYearPattern`]s.
//! - [`UmmAlQuraDate`] is the Saudi Umm al-Qura calendar, looked up from an
//!   embedded table covering 1356–1500 AH (1937-03-14 to 2077-11-16).
//!
//! ```
//! use hijri_calendar::{CivilDate, LeapYearPattern, civil_to_tabular_hijri, civil_to_umm_al_qura};
//!
//! let date = CivilDate::new(2008, 12, 29).unwrap();
//! let hijri = civil_to_tabular_hijri(&date, LeapYearPattern::Default).unwrap();
//! assert_eq!(hijri.to_string(), "1430-01-01");
//!
//! let ramadan = CivilDate::new(2024, 3, 11).unwrap();
//! assert_eq!(civil_to_umm_al_qura(&ramadan).unwrap().to_string(), "1445-09-01");
//! ```

mod civil;
mod consts;
mod convert;
mod julian;
mod names;
mod prelude;
mod tabular;
mod types;
mod ummalqura;

pub use civil::{CalendarRegime, CivilDate, Era};
pub use consts::*;
pub use convert::{
    Converter, civil_to_julian_day, civil_to_tabular_hijri, civil_to_umm_al_qura,
    julian_day_to_civil, tabular_hijri_to_civil, tabular_hijri_to_civil_at,
    umm_al_qura_to_civil, umm_al_qura_to_civil_at,
};
pub use julian::JulianDay;
pub use names::HijriMonth;
pub use tabular::{LeapYearPattern, TabularHijriDate};
pub use types::{
    Day, Month, TimeOfDay, days_in_civil_month, is_civil_leap_year, is_gregorian_leap_year,
    is_julian_leap_year,
};
pub use ummalqura::{
    MONTH_LENGTH_TABLE, UMM_AL_QURA_EPOCH_DAYS, UMM_AL_QURA_MAX_YEAR, UMM_AL_QURA_MIN_YEAR,
    UmmAlQuraDate, YEAR_OFFSETS,
};

use crate::prelude::*;

/// The calendar a value or an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Calendar {
    #[display(fmt = "civil")]
    Civil,
    #[display(fmt = "Julian Day")]
    JulianDay,
    #[display(fmt = "tabular Hijri")]
    TabularHijri,
    #[display(fmt = "Umm al-Qura")]
    UmmAlQura,
}

/// Errors from calendar construction and conversion.
///
/// Every variant is a deterministic consequence of the input: either the
/// date is structurally impossible ([`is_invalid_date`](Self::is_invalid_date))
/// or it lies outside a supported range ([`is_out_of_range`](Self::is_out_of_range)).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// Year that no date of the calendar can carry (e.g. Hijri year 0).
    #[error("Invalid {calendar} year: {year}")]
    InvalidYear { calendar: Calendar, year: i32 },

    /// Month outside 1-12.
    #[error("Invalid month: {0} (must be 1-12)")]
    InvalidMonth(u8),

    /// Day number that no month of any calendar has.
    #[error("Invalid day: {0} (must be 1-31)")]
    DayOutOfBounds(u8),

    /// Day exceeding the length of its month.
    #[error("Invalid day {day} for {calendar} month {year}-{month:02}")]
    InvalidDay {
        calendar: Calendar,
        year: i32,
        month: u8,
        day: u8,
    },

    /// Time component outside 00:00:00-23:59:59.
    #[error("Invalid time {hour:02}:{minute:02}:{second:02}")]
    InvalidTime { hour: u8, minute: u8, second: u8 },

    /// One of the ten days skipped by the Julian to Gregorian cutover.
    #[error("Date 1582-10-{day:02} does not exist: the civil calendar skips from 1582-10-04 to 1582-10-15")]
    CutoverGap { day: u8 },

    /// Date before an epoch or outside a table window.
    #[error("{calendar} date out of supported range: {detail}")]
    OutOfRange { calendar: Calendar, detail: String },

    /// Text that does not follow the `YYYY-MM-DD[THH:MM:SS]` layout.
    #[error("Invalid date format: {0}")]
    InvalidFormat(String),
}

impl CalendarError {
    pub(crate) fn out_of_range(calendar: Calendar, detail: impl Into<String>) -> Self {
        Self::OutOfRange {
            calendar,
            detail: detail.into(),
        }
    }

    /// Returns true for structurally impossible dates, including the 1582 gap.
    pub const fn is_invalid_date(&self) -> bool {
        matches!(
            self,
            Self::InvalidYear { .. }
                | Self::InvalidMonth(_)
                | Self::DayOutOfBounds(_)
                | Self::InvalidDay { .. }
                | Self::InvalidTime { .. }
                | Self::CutoverGap { .. }
                | Self::InvalidFormat(_)
        )
    }

    /// Returns true for dates outside a supported epoch or table range.
    pub const fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OutOfRange { .. })
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = CalendarError> = std::result::Result<T, E>;
