/// Earliest supported civil year (4713 BC, astronomical numbering)
pub const MIN_YEAR: i32 = -4712;
/// Maximum supported civil year (inclusive)
pub const MAX_YEAR: i32 = 9999;

/// Maximum valid month (December / Dhu al-Hijjah)
pub const MAX_MONTH: u8 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;
/// Longest month of any supported calendar
pub const MAX_DAY: u8 = 31;

/// Month number for January
pub const JANUARY: u8 = 1;
/// Month number for February
pub const FEBRUARY: u8 = 2;
/// Month number for October, the month of the 1582 cutover
pub const OCTOBER: u8 = 10;
/// Month number for December
pub const DECEMBER: u8 = 12;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each civil month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i32 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i32 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i32 = 400;

/// Year of the Julian to Gregorian cutover
pub const CUTOVER_YEAR: i32 = 1582;
/// Last day of the Julian calendar: 1582-10-04
pub const LAST_JULIAN_DAY: u8 = 4;
/// First day of the Gregorian calendar: 1582-10-15
pub const FIRST_GREGORIAN_DAY: u8 = 15;

/// Seconds in a civil day
pub const SECONDS_PER_DAY: i64 = 86_400;
/// Julian days start at noon, half a day after civil midnight
pub(crate) const SECONDS_PER_HALF_DAY: i64 = SECONDS_PER_DAY / 2;

/// Julian Day Number of the first Gregorian day (1582-10-15)
pub const GREGORIAN_CUTOVER_JDN: i64 = 2_299_161;

/// Day number (noon-based JDN) of the day before 1 Muharram 1 AH.
/// 1 Muharram 1 AH is 622-07-16 (Julian), which begins at JD 1948439.5.
pub const HIJRI_EPOCH_JDN: i64 = 1_948_439;

/// Length of the tabular leap-year cycle in years
pub const HIJRI_CYCLE_YEARS: i32 = 30;
/// Days in a full 30-year tabular cycle (19 × 354 + 11 × 355)
pub const HIJRI_CYCLE_DAYS: i64 = 10_631;
/// Days in a common (non-leap) Hijri year
pub const HIJRI_COMMON_YEAR_DAYS: i64 = 354;
/// Length of a short Hijri month
pub const HIJRI_SHORT_MONTH_DAYS: u8 = 29;
/// Length of a long Hijri month
pub const HIJRI_LONG_MONTH_DAYS: u8 = 30;

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';
/// Time component separator
pub const TIME_SEPARATOR: char = ':';
/// Separator between date and time (ISO 8601 format)
pub const DATE_TIME_SEPARATOR: char = 'T';
