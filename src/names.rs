use crate::prelude::*;
use crate::types::Month;

/// The twelve months of the Hijri year, shared by the tabular and Umm al-Qura
/// calendars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum HijriMonth {
    #[display(fmt = "Muharram")]
    Muharram,
    #[display(fmt = "Safar")]
    Safar,
    #[display(fmt = "Rabi' al-Awwal")]
    RabiAlAwwal,
    #[display(fmt = "Rabi' al-Thani")]
    RabiAlThani,
    #[display(fmt = "Jumada al-Ula")]
    JumadaAlUla,
    #[display(fmt = "Jumada al-Akhirah")]
    JumadaAlAkhirah,
    #[display(fmt = "Rajab")]
    Rajab,
    #[display(fmt = "Sha'ban")]
    Shaban,
    #[display(fmt = "Ramadan")]
    Ramadan,
    #[display(fmt = "Shawwal")]
    Shawwal,
    #[display(fmt = "Dhu al-Qi'dah")]
    DhuAlQidah,
    #[display(fmt = "Dhu al-Hijjah")]
    DhuAlHijjah,
}

impl HijriMonth {
    pub const ALL: [Self; 12] = [
        Self::Muharram,
        Self::Safar,
        Self::RabiAlAwwal,
        Self::RabiAlThani,
        Self::JumadaAlUla,
        Self::JumadaAlAkhirah,
        Self::Rajab,
        Self::Shaban,
        Self::Ramadan,
        Self::Shawwal,
        Self::DhuAlQidah,
        Self::DhuAlHijjah,
    ];

    /// Month for a 1-based number, `None` outside 1-12.
    pub fn from_number(number: u8) -> Option<Self> {
        let index = usize::from(number.checked_sub(1)?);
        Self::ALL.get(index).copied()
    }

    /// Month for a validated month component.
    pub const fn from_month(month: Month) -> Self {
        Self::ALL[(month.get() - 1) as usize]
    }

    /// 1-based position in the year.
    pub const fn number(self) -> u8 {
        self as u8 + 1
    }

    /// Transliterated English name.
    pub fn name(self) -> String {
        self.to_string()
    }

    /// Ramadan, the month of fasting, is the ninth month.
    pub const fn is_ramadan(self) -> bool {
        matches!(self, Self::Ramadan)
    }
}

impl From<Month> for HijriMonth {
    fn from(month: Month) -> Self {
        Self::from_month(month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_round_trip() {
        for (i, month) in HijriMonth::ALL.iter().enumerate() {
            let number = u8::try_from(i + 1).unwrap();
            assert_eq!(month.number(), number);
            assert_eq!(HijriMonth::from_number(number), Some(*month));
            assert_eq!(HijriMonth::from(Month::new(number).unwrap()), *month);
        }
    }

    #[test]
    fn test_from_number_out_of_range() {
        assert_eq!(HijriMonth::from_number(0), None);
        assert_eq!(HijriMonth::from_number(13), None);
    }

    #[test]
    fn test_names() {
        assert_eq!(HijriMonth::Muharram.to_string(), "Muharram");
        assert_eq!(HijriMonth::RabiAlAwwal.name(), "Rabi' al-Awwal");
        assert_eq!(HijriMonth::DhuAlHijjah.to_string(), "Dhu al-Hijjah");
        assert!(HijriMonth::from_number(9).unwrap().is_ramadan());
    }
}
