//! Conversions between the three calendars, always passing through a
//! [`JulianDay`].
//!
//! Hijri dates carry no time of day: it is dropped on the way in, and civil
//! results built from a Hijri date are at midnight unless a time is supplied.

use crate::civil::CivilDate;
use crate::julian::JulianDay;
use crate::tabular::{LeapYearPattern, TabularHijriDate};
use crate::types::TimeOfDay;
use crate::ummalqura::UmmAlQuraDate;
use crate::CalendarError;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Julian Day of a civil date and time.
///
/// # Errors
/// Any error of [`CivilDate::new_with_time`], including
/// `CalendarError::CutoverGap` for 1582-10-05 through 1582-10-14.
pub fn civil_to_julian_day(
    year: i32,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
) -> Result<JulianDay, CalendarError> {
    let date = CivilDate::new_with_time(year, month, day, hour, minute, second)?;
    let jd = date.to_julian_day();
    trace!(civil = %date, %jd, "civil to Julian Day");
    Ok(jd)
}

/// Civil date and time of a Julian Day, to the second.
pub fn julian_day_to_civil(jd: JulianDay) -> CivilDate {
    let date = jd.to_civil();
    trace!(%jd, civil = %date, "Julian Day to civil");
    date
}

/// Tabular Hijri date of the civil day, ignoring its time of day.
///
/// # Errors
/// Returns `CalendarError::OutOfRange` before 622-07-16.
pub fn civil_to_tabular_hijri(
    date: &CivilDate,
    pattern: LeapYearPattern,
) -> Result<TabularHijriDate, CalendarError> {
    TabularHijriDate::from_julian_day(date.to_julian_day(), pattern)
}

/// Civil date, at midnight, of a tabular Hijri date.
pub fn tabular_hijri_to_civil(date: &TabularHijriDate) -> CivilDate {
    date.to_julian_day().to_civil()
}

/// As [`tabular_hijri_to_civil`], at the given time of day.
pub fn tabular_hijri_to_civil_at(date: &TabularHijriDate, time: TimeOfDay) -> CivilDate {
    tabular_hijri_to_civil(date).at(time)
}

/// Umm al-Qura date of the civil day, ignoring its time of day.
///
/// # Errors
/// Returns `CalendarError::OutOfRange` outside 1937-03-14..=2077-11-16.
pub fn civil_to_umm_al_qura(date: &CivilDate) -> Result<UmmAlQuraDate, CalendarError> {
    UmmAlQuraDate::from_julian_day(date.to_julian_day())
}

/// Civil date, at midnight, of an Umm al-Qura date.
pub fn umm_al_qura_to_civil(date: &UmmAlQuraDate) -> CivilDate {
    date.to_julian_day().to_civil()
}

/// As [`umm_al_qura_to_civil`], at the given time of day.
pub fn umm_al_qura_to_civil_at(date: &UmmAlQuraDate, time: TimeOfDay) -> CivilDate {
    umm_al_qura_to_civil(date).at(time)
}

/// Conversion settings: the leap-year pattern for tabular dates and whether
/// a caller-supplied time of day survives Hijri to civil conversion.
///
/// ```
/// use hijri_calendar::{Converter, LeapYearPattern};
///
/// let converter: Converter = serde_json::from_str(r#"{"pattern": "fatimid"}"#).unwrap();
/// assert_eq!(converter.pattern(), LeapYearPattern::Fatimid);
/// assert!(converter.keeps_time_of_day());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Converter {
    pattern: LeapYearPattern,
    keep_time_of_day: bool,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter {
    pub const fn new() -> Self {
        Self {
            pattern: LeapYearPattern::Default,
            keep_time_of_day: true,
        }
    }

    #[must_use]
    pub const fn with_pattern(mut self, pattern: LeapYearPattern) -> Self {
        self.pattern = pattern;
        self
    }

    /// When disabled, civil results from Hijri dates are always at midnight.
    #[must_use]
    pub const fn with_time_of_day(mut self, keep: bool) -> Self {
        self.keep_time_of_day = keep;
        self
    }

    pub const fn pattern(&self) -> LeapYearPattern {
        self.pattern
    }

    pub const fn keeps_time_of_day(&self) -> bool {
        self.keep_time_of_day
    }

    /// # Errors
    /// See [`civil_to_tabular_hijri`].
    pub fn to_tabular_hijri(&self, date: &CivilDate) -> Result<TabularHijriDate, CalendarError> {
        civil_to_tabular_hijri(date, self.pattern)
    }

    /// Builds a tabular Hijri date under the configured pattern.
    ///
    /// # Errors
    /// See [`TabularHijriDate::new`].
    pub fn tabular_hijri(
        &self,
        year: i32,
        month: u8,
        day: u8,
    ) -> Result<TabularHijriDate, CalendarError> {
        TabularHijriDate::new(year, month, day, self.pattern)
    }

    pub fn tabular_hijri_to_civil(
        &self,
        date: &TabularHijriDate,
        time: Option<TimeOfDay>,
    ) -> CivilDate {
        self.attach_time(tabular_hijri_to_civil(date), time)
    }

    pub fn umm_al_qura_to_civil(&self, date: &UmmAlQuraDate, time: Option<TimeOfDay>) -> CivilDate {
        self.attach_time(umm_al_qura_to_civil(date), time)
    }

    /// Tabular Hijri date under the configured pattern for the same civil day
    /// as an Umm al-Qura date.
    ///
    /// # Errors
    /// Never fails for dates inside the Umm al-Qura table; kept fallible to
    /// match [`civil_to_tabular_hijri`].
    pub fn umm_al_qura_to_tabular_hijri(
        &self,
        date: &UmmAlQuraDate,
    ) -> Result<TabularHijriDate, CalendarError> {
        TabularHijriDate::from_julian_day(date.to_julian_day(), self.pattern)
    }

    /// Umm al-Qura date for the same civil day as a tabular Hijri date.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` outside the Umm al-Qura table.
    #[allow(clippy::unused_self)]
    pub fn tabular_hijri_to_umm_al_qura(
        &self,
        date: &TabularHijriDate,
    ) -> Result<UmmAlQuraDate, CalendarError> {
        UmmAlQuraDate::from_julian_day(date.to_julian_day())
    }

    fn attach_time(&self, date: CivilDate, time: Option<TimeOfDay>) -> CivilDate {
        match time {
            Some(time) if self.keep_time_of_day => date.at(time),
            _ => date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_civil_to_julian_day() {
        let jd = civil_to_julian_day(2000, 1, 1, 12, 0, 0).unwrap();
        assert!((jd.to_f64() - 2_451_545.0).abs() < 1e-9);
        assert_eq!(
            julian_day_to_civil(jd),
            CivilDate::new_with_time(2000, 1, 1, 12, 0, 0).unwrap()
        );

        assert!(civil_to_julian_day(1582, 10, 4, 0, 0, 0).is_ok());
        assert!(matches!(
            civil_to_julian_day(1582, 10, 10, 0, 0, 0),
            Err(CalendarError::CutoverGap { day: 10 })
        ));
        assert!(civil_to_julian_day(1582, 10, 15, 0, 0, 0).is_ok());
    }

    #[test]
    fn test_hijri_results_are_at_midnight() {
        let date = CivilDate::new_with_time(2008, 12, 29, 18, 30, 0).unwrap();
        let hijri = civil_to_tabular_hijri(&date, LeapYearPattern::Default).unwrap();
        assert_eq!(tabular_hijri_to_civil(&hijri), date.date_only());
        assert_eq!(tabular_hijri_to_civil_at(&hijri, date.time()), date);

        let date = CivilDate::new_with_time(2024, 3, 11, 4, 0, 0).unwrap();
        let uaq = civil_to_umm_al_qura(&date).unwrap();
        assert_eq!(umm_al_qura_to_civil(&uaq), date.date_only());
        assert_eq!(umm_al_qura_to_civil_at(&uaq, date.time()), date);
    }

    #[test]
    fn test_converter_defaults() {
        let converter = Converter::default();
        assert_eq!(converter, Converter::new());
        assert_eq!(converter.pattern(), LeapYearPattern::Default);
        assert!(converter.keeps_time_of_day());
    }

    #[test]
    fn test_converter_pattern() {
        let date = CivilDate::new(2008, 12, 29).unwrap();
        for pattern in LeapYearPattern::ALL {
            let converter = Converter::new().with_pattern(pattern);
            let hijri = converter.to_tabular_hijri(&date).unwrap();
            assert_eq!(hijri.pattern(), pattern);
            assert_eq!(converter.tabular_hijri_to_civil(&hijri, None), date);
        }
    }

    #[test]
    fn test_converter_time_of_day() {
        let noon = Some(TimeOfDay::NOON);
        let uaq = UmmAlQuraDate::new(1445, 9, 1).unwrap();

        let keeping = Converter::new();
        assert_eq!(keeping.umm_al_qura_to_civil(&uaq, noon).time(), TimeOfDay::NOON);
        assert!(keeping.umm_al_qura_to_civil(&uaq, None).time().is_midnight());

        let dropping = Converter::new().with_time_of_day(false);
        assert!(dropping.umm_al_qura_to_civil(&uaq, noon).time().is_midnight());

        let hijri = dropping.tabular_hijri(1430, 1, 1).unwrap();
        assert!(dropping.tabular_hijri_to_civil(&hijri, noon).time().is_midnight());
    }

    #[test]
    fn test_between_hijri_calendars() {
        let converter = Converter::new();
        let uaq = UmmAlQuraDate::new(1356, 1, 1).unwrap();
        let tabular = converter.umm_al_qura_to_tabular_hijri(&uaq).unwrap();
        assert_eq!(tabular.to_julian_day(), uaq.to_julian_day());
        assert_eq!(converter.tabular_hijri_to_umm_al_qura(&tabular).unwrap(), uaq);

        let early = converter.tabular_hijri(1300, 1, 1).unwrap();
        assert!(converter
            .tabular_hijri_to_umm_al_qura(&early)
            .unwrap_err()
            .is_out_of_range());
    }

    #[test]
    fn test_converter_config() {
        let converter: Converter = serde_json::from_str("{}").unwrap();
        assert_eq!(converter, Converter::default());

        let converter: Converter =
            serde_json::from_str(r#"{"pattern":"habash_al_hasib","keep_time_of_day":false}"#)
                .unwrap();
        assert_eq!(converter.pattern(), LeapYearPattern::HabashAlHasib);
        assert!(!converter.keeps_time_of_day());

        let json = serde_json::to_string(&Converter::new().with_pattern(LeapYearPattern::Base15))
            .unwrap();
        assert_eq!(json, r#"{"pattern":"base15","keep_time_of_day":true}"#);

        assert!(serde_json::from_str::<Converter>(r#"{"pattern":"lunar"}"#).is_err());
    }
}
