//! Text in, text out: the display and input conversions a host wires into its
//! date fields.
//!
//! Display conversions never fail; text that does not parse as a date comes
//! back unchanged. Input conversions report a failed parse as `None` so the
//! host can reject the value.

use tracing::trace;

use super::{gregorian_to_jalali, jalali_to_gregorian};
use crate::parse::{parse_date_input, split_datetime};

/// Years at or above this are taken to be Gregorian already when reading
/// Jalali input.
///
/// Input text carries no calendar tag. Any realistic Jalali year is well
/// below 1700 and any realistic Gregorian year is above it, so mixed input is
/// told apart by the year alone.
pub const GREGORIAN_YEAR_THRESHOLD: i32 = 1700;

/// Formatting settings. The free functions of this module use
/// [`Formatter::default`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Formatter {
    /// See [`GREGORIAN_YEAR_THRESHOLD`].
    pub gregorian_year_threshold: i32,
}

impl Default for Formatter {
    fn default() -> Self {
        Self {
            gregorian_year_threshold: GREGORIAN_YEAR_THRESHOLD,
        }
    }
}

impl Formatter {
    pub fn with_threshold(gregorian_year_threshold: i32) -> Self {
        Self {
            gregorian_year_threshold,
        }
    }

    /// Gregorian date text as Jalali `YYYY-MM-DD` (year unpadded).
    ///
    /// Returns `text` unchanged if it is not a date.
    pub fn to_jalali_display(&self, text: &str) -> String {
        match parse_date_input(text).and_then(gregorian_to_jalali) {
            Some(date) => date.to_string(),
            None => {
                trace!(text, "not a date, displayed as is");
                text.to_owned()
            }
        }
    }

    /// Jalali date text as Gregorian ISO `YYYY-MM-DD`.
    ///
    /// Dates whose year reaches the threshold are already Gregorian and are
    /// only reformatted. Returns `None` if `text` is not a date.
    pub fn from_jalali_input(&self, text: &str) -> Option<String> {
        let date = parse_date_input(text)?;
        let gregorian = if date.year >= self.gregorian_year_threshold {
            trace!(text, "year past threshold, read as gregorian");
            date
        } else {
            jalali_to_gregorian(date)?
        };
        Some(gregorian.iso())
    }

    /// [`Self::to_jalali_display`] for date-time text: the time part is kept
    /// verbatim. Returns `text` unchanged if the date part is not a date.
    pub fn to_jalali_datetime_display(&self, text: &str) -> String {
        convert_datetime(text, |date| {
            parse_date_input(date)
                .and_then(gregorian_to_jalali)
                .map(|d| d.to_string())
        })
    }

    /// [`Self::from_jalali_input`] for date-time text: the time part is kept
    /// verbatim. Returns `text` unchanged if the date part is not a date.
    pub fn from_jalali_datetime_input(&self, text: &str) -> String {
        convert_datetime(text, |date| self.from_jalali_input(date))
    }
}

fn convert_datetime(text: &str, convert: impl FnOnce(&str) -> Option<String>) -> String {
    let (date, time) = split_datetime(text);
    match convert(&date) {
        Some(date) if time.is_empty() => date,
        Some(date) => format!("{date} {time}"),
        None => {
            trace!(text, "date part not a date, kept as is");
            text.to_owned()
        }
    }
}

/// Gregorian date text as Jalali `YYYY-MM-DD` (year unpadded), or `text`
/// unchanged if it is not a date.
///
/// # Example
///
/// ```
/// use jalali_calendar::jalali::fmt::to_jalali_display;
///
/// assert_eq!("1392-01-01", to_jalali_display("2013-03-21"));
/// assert_eq!("garbage", to_jalali_display("garbage"));
/// ```
pub fn to_jalali_display(text: &str) -> String {
    Formatter::default().to_jalali_display(text)
}

/// Jalali date text as Gregorian ISO `YYYY-MM-DD`, or `None` if `text` is not
/// a date. Years from [`GREGORIAN_YEAR_THRESHOLD`] on are taken as Gregorian
/// and only reformatted.
///
/// # Example
///
/// ```
/// use jalali_calendar::jalali::fmt::from_jalali_input;
///
/// assert_eq!(Some("2013-03-21".to_owned()), from_jalali_input("۱۳۹۲/۱/۱"));
/// assert_eq!(Some("1999-05-01".to_owned()), from_jalali_input("1999-5-1"));
/// assert_eq!(None, from_jalali_input("garbage"));
/// ```
pub fn from_jalali_input(text: &str) -> Option<String> {
    Formatter::default().from_jalali_input(text)
}

/// Date-time variant of [`to_jalali_display`].
///
/// ```
/// use jalali_calendar::jalali::fmt::to_jalali_datetime_display;
///
/// assert_eq!("1392-01-01 10:30:00", to_jalali_datetime_display("2013-03-21 10:30:00"));
/// ```
pub fn to_jalali_datetime_display(text: &str) -> String {
    Formatter::default().to_jalali_datetime_display(text)
}

/// Date-time variant of [`from_jalali_input`].
pub fn from_jalali_datetime_input(text: &str) -> String {
    Formatter::default().from_jalali_datetime_input(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jalali_display() {
        for (text, std) in [
            ("2013-03-21", "1392-01-01"),
            ("2013/3/21", "1392-01-01"),
            ("۲۰۱۷-۰۱-۰۱", "1395-10-12"),
            ("2025-03-20", "1403-12-30"),
            ("0622-03-21", "1-01-01"),
            ("garbage", "garbage"),
            ("", ""),
            ("2013-03", "2013-03"),
        ] {
            assert_eq!(std, to_jalali_display(text), "{text:?}");
        }
    }

    #[test]
    fn jalali_input() {
        for (text, std) in [
            ("1392-01-01", Some("2013-03-21")),
            ("1403/12/30", Some("2025-03-20")),
            ("1999-05-01", Some("1999-05-01")),
            ("1700-1-1", Some("1700-01-01")),
            ("1699-01-01", Some("2320-03-21")),
            ("1-1-1", Some("0622-03-21")),
            ("garbage", None),
            ("", None),
        ] {
            assert_eq!(std.map(str::to_owned), from_jalali_input(text), "{text:?}");
        }
    }

    #[test]
    fn custom_threshold() {
        let fmt = Formatter::with_threshold(3000);
        assert_eq!(Some("2620-03-21".to_owned()), fmt.from_jalali_input("1999-01-01"));
        assert_eq!(Some("3000-01-01".to_owned()), fmt.from_jalali_input("3000-01-01"));
    }

    #[test]
    fn datetime_display() {
        for (text, std) in [
            ("2013-03-21 10:30:00", "1392-01-01 10:30:00"),
            ("2013-03-21   10:30 PM", "1392-01-01 10:30 PM"),
            ("2013-03-21", "1392-01-01"),
            ("garbage 10:30", "garbage 10:30"),
            (" 2013-03 10:30 ", " 2013-03 10:30 "),
        ] {
            assert_eq!(std, to_jalali_datetime_display(text), "{text:?}");
        }
    }

    #[test]
    fn datetime_input() {
        for (text, std) in [
            ("1392-01-01 10:30:00", "2013-03-21 10:30:00"),
            ("۱۳۹۲/۰۱/۰۱ ۱۰:۳۰", "2013-03-21 10:30"),
            ("2013-03-21 08:00", "2013-03-21 08:00"),
            ("1392-01-01", "2013-03-21"),
            ("nope 10:30", "nope 10:30"),
        ] {
            assert_eq!(std, from_jalali_datetime_input(text), "{text:?}");
        }
    }

    #[test]
    fn display_input_round_trip() {
        for text in ["2013-03-21", "2000-02-29", "2024-12-31", "1970-01-01"] {
            assert_eq!(Some(text.to_owned()), from_jalali_input(&to_jalali_display(text)));
        }
    }
}
