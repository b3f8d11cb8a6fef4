//! Calendar-independant date, and the plain `(year, month, day)` triple both
//! calendars are expressed in.

use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

const GREGORIAN_MONTH_DAYS: [i64; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// A calendar-independant date.
///
/// Internally a day number counted from January 1, 1600 (Gregorian), which is
/// day `0`. Supported range is about one million years either side of that
/// epoch; see [`Date::MIN`] and [`Date::MAX`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Date {
    day: i64,
}

impl Date {
    /// Earliest supported day number.
    pub const MIN: i64 = -365_242_500;
    /// Latest supported day number.
    pub const MAX: i64 = 365_242_500;

    /// Creates a `Date` with a day number, or `None` if it is outside
    /// [`Date::MIN`]`..=`[`Date::MAX`].
    pub fn from_day_number(day: i64) -> Option<Self> {
        (Self::MIN..=Self::MAX)
            .contains(&day)
            .then_some(Self { day })
    }
    /// Returns the day number of the date.
    pub fn day_number(&self) -> i64 {
        self.day
    }

    /// Creates a `Date` with a proleptic Gregorian calendar date.
    ///
    /// Months and days are not range checked: out-of-range values simply
    /// carry into the neighbouring month, as the day arithmetic dictates.
    /// Months past 12 count as 12, months below 1 count as 1.
    ///
    /// Returns `None` if the result date is out of supported range.
    ///
    /// # Example
    ///
    /// ```
    /// use jalali_calendar::Date;
    ///
    /// let date = Date::from_gregorian(1600, 1, 1).unwrap();
    /// assert_eq!(0, date.day_number());
    /// let date = Date::from_gregorian(2013, 3, 21).unwrap();
    /// assert_eq!(150_925, date.day_number());
    /// ```
    pub fn from_gregorian(year: i32, month: i32, day: i32) -> Option<Self> {
        let gy = i64::from(year) - 1600;
        let mut days = 365 * gy + (gy + 3).div_euclid(4) - (gy + 99).div_euclid(100)
            + (gy + 399).div_euclid(400);
        days += GREGORIAN_MONTH_DAYS
            .iter()
            .take(month.clamp(1, 12) as usize - 1)
            .sum::<i64>();
        if month > 2 && YearType::from_gregorian(year).is_leap() {
            days += 1;
        }
        Self::from_day_number(days + i64::from(day) - 1)
    }
    /// Represents the date in Gregorian calendar.
    ///
    /// # Example
    ///
    /// ```
    /// use jalali_calendar::{CalendarDate, Date};
    ///
    /// let date = Date::from_day_number(150_925).unwrap();
    /// assert_eq!(CalendarDate::new(2013, 3, 21), date.gregorian());
    /// ```
    pub fn gregorian(&self) -> CalendarDate {
        let mut days = self.day;
        let mut year = 1600 + 400 * days.div_euclid(146_097);
        days = days.rem_euclid(146_097);

        let mut leap = true;
        if days >= 36_525 {
            days -= 1;
            year += 100 * (days / 36_524);
            days %= 36_524;
            if days >= 365 {
                days += 1;
            } else {
                leap = false;
            }
        }

        year += 4 * (days / 1461);
        days %= 1461;
        if days >= 366 {
            leap = false;
            days -= 1;
            year += days / 365;
            days %= 365;
        }

        let mut month = 0;
        for (i, &len) in GREGORIAN_MONTH_DAYS.iter().enumerate() {
            let len = if i == 1 && leap { len + 1 } else { len };
            if days < len {
                break;
            }
            days -= len;
            month = i + 1;
        }
        // Bounded by `Date::MIN..=Date::MAX`, so the year fits.
        CalendarDate::new(year as i32, month as i32 + 1, days as i32 + 1)
    }
    /// Formats the date in ISO 8601 format.
    ///
    /// # Example
    ///
    /// ```
    /// use jalali_calendar::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!("2000-01-01", date.iso_gregorian());
    /// ```
    pub fn iso_gregorian(&self) -> String {
        self.gregorian().iso()
    }
}

impl Add<i32> for Date {
    type Output = Date;
    fn add(self, rhs: i32) -> Self::Output {
        Date {
            day: self.day + i64::from(rhs),
        }
    }
}
impl Sub<Date> for Date {
    type Output = i64;
    fn sub(self, rhs: Date) -> Self::Output {
        self.day - rhs.day
    }
}

/// Indicates whether a year is a leap year or common year.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum YearType {
    Common,
    Leap,
}

impl YearType {
    /// Determines if `year` is a leap year in Gregorian calendar.
    pub fn from_gregorian(year: i32) -> Self {
        if year % 4 == 0 && year % 100 != 0 || year % 400 == 0 {
            Self::Leap
        } else {
            Self::Common
        }
    }
    /// Returns `true` if `self` is `Leap`, otherwise `false`.
    pub fn is_leap(&self) -> bool {
        matches!(self, YearType::Leap)
    }
}

/// A `(year, month, day)` triple in either calendar.
///
/// The triple carries no calendar tag and no validation; which calendar it
/// belongs to is up to the function receiving it.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
pub struct CalendarDate {
    pub year: i32,
    pub month: i32,
    pub day: i32,
}

impl CalendarDate {
    pub const fn new(year: i32, month: i32, day: i32) -> Self {
        Self { year, month, day }
    }

    /// Formats as `YYYY-MM-DD` with the year zero-padded to four digits.
    pub fn iso(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl From<(i32, i32, i32)> for CalendarDate {
    fn from((year, month, day): (i32, i32, i32)) -> Self {
        Self::new(year, month, day)
    }
}

impl From<CalendarDate> for (i32, i32, i32) {
    fn from(date: CalendarDate) -> Self {
        (date.year, date.month, date.day)
    }
}

/// Year unpadded, month and day padded to two digits.
impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Strict parsing: exactly three integer fields separated by `-` or `/`.
///
/// Use [`crate::parse::parse_date_input`] for the lenient form used on user
/// input.
///
/// ```
/// use jalali_calendar::CalendarDate;
///
/// let date: CalendarDate = "2024/03/20".parse().unwrap();
/// assert_eq!(CalendarDate::new(2024, 3, 20), date);
/// assert!("2024-03".parse::<CalendarDate>().is_err());
/// ```
impl FromStr for CalendarDate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidDate(s.to_owned());
        let fields = s
            .replace('/', "-")
            .split('-')
            .map(|tok| tok.trim().parse::<i32>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>, _>>()?;
        match fields[..] {
            [year, month, day] => Ok(Self::new(year, month, day)),
            _ => Err(invalid()),
        }
    }
}

/// The calendar systems a date can be displayed in.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarSystem {
    #[default]
    Jalali,
    Gregorian,
}

impl CalendarSystem {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Jalali => "jalali",
            Self::Gregorian => "gregorian",
        }
    }
}

impl fmt::Display for CalendarSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Case-insensitive, surrounding whitespace ignored.
impl FromStr for CalendarSystem {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jalali" => Ok(Self::Jalali),
            "gregorian" => Ok(Self::Gregorian),
            _ => Err(Error::UnknownCalendar(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_gregorian() {
        let date = Date::from_gregorian(1600, 1, 1).unwrap();
        assert_eq!(0, date.day_number());
        let date = Date::from_gregorian(1600, 3, 1).unwrap();
        assert_eq!(60, date.day_number());
        let date = Date::from_gregorian(1599, 12, 31).unwrap();
        assert_eq!(-1, date.day_number());
    }

    #[test]
    fn to_gregorian() {
        for (day, (y, m, d)) in [
            (0, (1600, 1, 1)),
            (59, (1600, 2, 29)),
            (-1, (1599, 12, 31)),
            (146_097, (2000, 1, 1)),
            (150_925, (2013, 3, 21)),
        ] {
            let date = Date::from_day_number(day).unwrap();
            assert_eq!(CalendarDate::new(y, m, d), date.gregorian(), "{day}");
        }
    }

    #[test]
    fn century_leap_rules() {
        for (y, leap) in [(1700, false), (1800, false), (1900, false), (2000, true)] {
            let end = Date::from_gregorian(y, 12, 31).unwrap();
            let start = Date::from_gregorian(y, 1, 1).unwrap();
            assert_eq!(if leap { 365 } else { 364 }, end - start, "{y}");
            assert_eq!(leap, YearType::from_gregorian(y).is_leap());
        }
    }

    #[test]
    fn matches_chrono_day_by_day() {
        let epoch = chrono::NaiveDate::from_ymd_opt(1600, 1, 1).unwrap();
        let mut day = chrono::NaiveDate::from_ymd_opt(1500, 1, 1).unwrap();
        let end = chrono::NaiveDate::from_ymd_opt(2500, 12, 31).unwrap();
        while day <= end {
            use chrono::Datelike;
            let expected = (day - epoch).num_days();
            let date = Date::from_gregorian(day.year(), day.month() as i32, day.day() as i32)
                .unwrap();
            assert_eq!(expected, date.day_number(), "{day}");
            assert_eq!(day.to_string(), date.iso_gregorian());
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn out_of_range_months_saturate() {
        let dec = Date::from_gregorian(2001, 12, 1).unwrap();
        assert_eq!(dec, Date::from_gregorian(2001, 13, 1).unwrap());
        let jan = Date::from_gregorian(2001, 1, 1).unwrap();
        assert_eq!(jan, Date::from_gregorian(2001, 0, 1).unwrap());
        assert_eq!(jan + 40, Date::from_gregorian(2001, 1, 41).unwrap());
    }

    #[test]
    fn out_of_supported_range() {
        assert_eq!(None, Date::from_gregorian(i32::MAX, 1, 1));
        assert_eq!(None, Date::from_gregorian(i32::MIN, 1, 1));
        assert_eq!(None, Date::from_gregorian(2000, 1, i32::MAX));
        assert!(Date::from_day_number(Date::MAX).is_some());
        assert!(Date::from_day_number(Date::MAX + 1).is_none());
    }

    #[test]
    fn calendar_date_format() {
        let date = CalendarDate::new(622, 3, 9);
        assert_eq!("0622-03-09", date.iso());
        assert_eq!("622-03-09", date.to_string());
    }

    #[test]
    fn calendar_date_from_str() {
        assert_eq!(
            Some(CalendarDate::new(1403, 1, 1)),
            "1403/01/01".parse().ok()
        );
        assert_eq!(
            Some(CalendarDate::new(2022, 11, 5)),
            " 2022-11-5 ".parse().ok()
        );
        for bad in ["", "2022-11", "2022-11-05-01", "a-b-c"] {
            assert!(bad.parse::<CalendarDate>().is_err(), "{bad}");
        }
    }

    #[test]
    fn calendar_system_names() {
        assert_eq!(Some(CalendarSystem::Jalali), " Jalali ".parse().ok());
        assert_eq!(Some(CalendarSystem::Gregorian), "GREGORIAN".parse().ok());
        assert!(matches!(
            "lunar".parse::<CalendarSystem>(),
            Err(Error::UnknownCalendar(name)) if name == "lunar"
        ));
        assert_eq!("gregorian", CalendarSystem::Gregorian.to_string());
        assert_eq!(CalendarSystem::Jalali, CalendarSystem::default());
    }
}
