//! Jalali (Solar Hijri) calendar.
//!
//! The arithmetic is the classical 33-year-cycle algorithm: the Jalali
//! calendar is laid out from the year 979 in cycles of 12053 days (33 years,
//! 8 of them leap), and both directions go through the day number of
//! [`Date`], which makes every Gregorian → Jalali → Gregorian round trip
//! exact.
//!
//! # Example
//!
//! ```
//! use jalali_calendar::CalendarDate;
//! use jalali_calendar::jalali::{gregorian_to_jalali, jalali_to_gregorian};
//!
//! let nowruz = gregorian_to_jalali(CalendarDate::new(2013, 3, 21)).unwrap();
//! assert_eq!(CalendarDate::new(1392, 1, 1), nowruz);
//! assert_eq!(Some(CalendarDate::new(2013, 3, 21)), jalali_to_gregorian(nowruz));
//! ```

use crate::date::{CalendarDate, Date, YearType};

pub mod fmt;

/// Month lengths of a common year. Esfand (month 12) gains a 30th day in leap
/// years; the conversion never reads the last entry, see
/// [`Date::jalali`].
pub const MONTH_DAYS: [i32; 12] = [31, 31, 31, 31, 31, 31, 30, 30, 30, 30, 30, 29];

/// Days between the Gregorian epoch of [`Date`] (1600-01-01) and the Jalali
/// cycle origin (979-01-01, i.e. 1600-03-20).
const EPOCH_OFFSET: i64 = 79;
/// Days in a 33-year cycle.
const CYCLE_DAYS: i64 = 12_053;

/// Days from 979-01-01 to the first day of `year`.
fn year_start(year: i64) -> i64 {
    let jy = year - 979;
    365 * jy + jy.div_euclid(33) * 8 + (jy.rem_euclid(33) + 3) / 4
}

impl Date {
    /// Creates a `Date` with a Jalali calendar date.
    ///
    /// As with [`Date::from_gregorian`], months and days are not range
    /// checked. Returns `None` if the result date is out of supported range.
    ///
    /// # Example
    ///
    /// ```
    /// use jalali_calendar::Date;
    ///
    /// let date = Date::from_jalali(1392, 1, 1).unwrap();
    /// assert_eq!("2013-03-21", date.iso_gregorian());
    /// ```
    pub fn from_jalali(year: i32, month: i32, day: i32) -> Option<Self> {
        let mut days = year_start(i64::from(year));
        days += MONTH_DAYS
            .iter()
            .take(month.clamp(1, 12) as usize - 1)
            .map(|&len| i64::from(len))
            .sum::<i64>();
        Self::from_day_number(days + i64::from(day) - 1 + EPOCH_OFFSET)
    }

    /// Represents the date in Jalali calendar.
    ///
    /// Only the first eleven entries of [`MONTH_DAYS`] are walked; whatever
    /// remains of the year lands in Esfand, which is how Esfand 30 comes out
    /// in leap years.
    ///
    /// # Example
    ///
    /// ```
    /// use jalali_calendar::{CalendarDate, Date};
    ///
    /// let date = Date::from_gregorian(2025, 3, 20).unwrap();
    /// assert_eq!(CalendarDate::new(1403, 12, 30), date.jalali());
    /// ```
    pub fn jalali(&self) -> CalendarDate {
        let mut days = self.day_number() - EPOCH_OFFSET;
        let mut year = 979 + 33 * days.div_euclid(CYCLE_DAYS);
        days = days.rem_euclid(CYCLE_DAYS);

        year += 4 * (days / 1461);
        days %= 1461;
        if days >= 366 {
            year += (days - 1) / 365;
            days = (days - 1) % 365;
        }

        let mut month = 0;
        for &len in &MONTH_DAYS[..11] {
            if days < i64::from(len) {
                break;
            }
            days -= i64::from(len);
            month += 1;
        }
        // Bounded by `Date::MIN..=Date::MAX`, so the year fits.
        CalendarDate::new(year as i32, month + 1, days as i32 + 1)
    }
    /// Formats the date as a Jalali `YYYY-MM-DD`, year zero-padded.
    pub fn iso_jalali(&self) -> String {
        self.jalali().iso()
    }
}

impl YearType {
    /// Determines if `year` is a leap year in Jalali calendar, i.e. whether it
    /// has 366 days.
    ///
    /// # Example
    ///
    /// ```
    /// use jalali_calendar::YearType;
    ///
    /// assert!(YearType::from_jalali(1403).is_leap());
    /// assert!(!YearType::from_jalali(1404).is_leap());
    /// ```
    pub fn from_jalali(year: i32) -> Self {
        let year = i64::from(year);
        if year_start(year + 1) - year_start(year) == 366 {
            Self::Leap
        } else {
            Self::Common
        }
    }
}

/// Number of days in a Jalali month, or `None` if `month` is not in `1..=12`.
///
/// ```
/// use jalali_calendar::jalali::days_in_month;
///
/// assert_eq!(Some(31), days_in_month(1403, 6));
/// assert_eq!(Some(30), days_in_month(1403, 12));
/// assert_eq!(Some(29), days_in_month(1402, 12));
/// assert_eq!(None, days_in_month(1402, 13));
/// ```
pub fn days_in_month(year: i32, month: i32) -> Option<i32> {
    let len = *MONTH_DAYS.get(usize::try_from(month).ok()?.checked_sub(1)?)?;
    Some(if month == 12 && YearType::from_jalali(year).is_leap() {
        len + 1
    } else {
        len
    })
}

impl CalendarDate {
    /// Creates a Jalali date, checking the month and the day against the
    /// month length of that year.
    ///
    /// ```
    /// use jalali_calendar::CalendarDate;
    ///
    /// assert!(CalendarDate::new_jalali(1403, 12, 30).is_some());
    /// assert!(CalendarDate::new_jalali(1402, 12, 30).is_none());
    /// ```
    pub fn new_jalali(year: i32, month: i32, day: i32) -> Option<Self> {
        (1..=days_in_month(year, month)?)
            .contains(&day)
            .then_some(Self::new(year, month, day))
    }
}

/// Converts a Gregorian date into Jalali calendar.
///
/// `None` only if the date is out of the supported range of [`Date`].
pub fn gregorian_to_jalali(date: CalendarDate) -> Option<CalendarDate> {
    Date::from_gregorian(date.year, date.month, date.day).map(|d| d.jalali())
}

/// Converts a Jalali date into Gregorian calendar.
///
/// `None` only if the date is out of the supported range of [`Date`].
pub fn jalali_to_gregorian(date: CalendarDate) -> Option<CalendarDate> {
    Date::from_jalali(date.year, date.month, date.day).map(|d| d.gregorian())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn g2j(y: i32, m: i32, d: i32) -> (i32, i32, i32) {
        gregorian_to_jalali(CalendarDate::new(y, m, d)).unwrap().into()
    }

    fn j2g(y: i32, m: i32, d: i32) -> (i32, i32, i32) {
        jalali_to_gregorian(CalendarDate::new(y, m, d)).unwrap().into()
    }

    #[test]
    fn known_dates() {
        for (g, j) in [
            ((2013, 3, 21), (1392, 1, 1)),
            ((2024, 3, 20), (1403, 1, 1)),
            ((2023, 3, 21), (1402, 1, 1)),
            ((2017, 1, 1), (1395, 10, 12)),
            ((1999, 5, 1), (1378, 2, 11)),
            ((2000, 2, 29), (1378, 12, 10)),
            ((1970, 1, 1), (1348, 10, 11)),
            ((2021, 3, 20), (1399, 12, 30)),
            ((1600, 3, 20), (979, 1, 1)),
            ((622, 3, 21), (1, 1, 1)),
        ] {
            assert_eq!(j, g2j(g.0, g.1, g.2), "{g:?}");
            assert_eq!(g, j2g(j.0, j.1, j.2), "{j:?}");
        }
    }

    #[test]
    fn esfand_thirtieth() {
        assert_eq!((2025, 3, 20), j2g(1403, 12, 30));
        assert_eq!((1403, 12, 30), g2j(2025, 3, 20));
        let date = Date::from_gregorian(2025, 3, 20).unwrap();
        assert_eq!("1403-12-30", date.iso_jalali());
        // Not a real date in a common year, rolls into Nowruz.
        assert_eq!((2014, 3, 21), j2g(1392, 12, 30));
    }

    #[test]
    fn round_trip_1700_to_2100() {
        let mut date = Date::from_gregorian(1700, 1, 1).unwrap();
        let end = Date::from_gregorian(2100, 12, 31).unwrap();
        while date <= end {
            let g = date.gregorian();
            let j = gregorian_to_jalali(g).unwrap();
            assert_eq!(Some(g), jalali_to_gregorian(j), "{g}");
            assert_eq!(Some(date), Date::from_jalali(j.year, j.month, j.day));
            date = date + 1;
        }
    }

    #[test]
    fn jalali_days_are_contiguous() {
        use chrono::Datelike;
        let mut day = chrono::NaiveDate::from_ymd_opt(1700, 1, 1).unwrap();
        let mut prev = g2j(1699, 12, 31);
        while day.year() <= 2100 {
            let j = g2j(day.year(), day.month() as i32, day.day() as i32);
            let expected = if Some(prev.2) == days_in_month(prev.0, prev.1) {
                if prev.1 == 12 {
                    (prev.0 + 1, 1, 1)
                } else {
                    (prev.0, prev.1 + 1, 1)
                }
            } else {
                (prev.0, prev.1, prev.2 + 1)
            };
            assert_eq!(expected, j, "{day}");
            prev = j;
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn leap_years() {
        for (year, leap) in [
            (1395, true),
            (1396, false),
            (1398, false),
            (1399, true),
            (1400, false),
            (1403, true),
            (1404, false),
        ] {
            assert_eq!(leap, YearType::from_jalali(year).is_leap(), "{year}");
        }
        for year in 1..=2000 {
            let start = Date::from_jalali(year, 1, 1).unwrap();
            let next = Date::from_jalali(year + 1, 1, 1).unwrap();
            let leap = YearType::from_jalali(year).is_leap();
            assert_eq!(if leap { 366 } else { 365 }, next - start, "{year}");
        }
    }

    #[test]
    fn validated_dates() {
        assert_eq!(None, CalendarDate::new_jalali(1402, 0, 1));
        assert_eq!(None, CalendarDate::new_jalali(1402, 7, 31));
        assert_eq!(None, CalendarDate::new_jalali(1402, 1, 0));
        assert_eq!(
            Some(CalendarDate::new(1402, 12, 29)),
            CalendarDate::new_jalali(1402, 12, 29)
        );
    }

    #[test]
    fn out_of_range() {
        assert_eq!(None, gregorian_to_jalali(CalendarDate::new(i32::MAX, 1, 1)));
        assert_eq!(None, jalali_to_gregorian(CalendarDate::new(i32::MIN, 1, 1)));
    }
}
