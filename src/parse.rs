//! Lenient parsing of user-typed date and date-time text.
//!
//! Nothing here fails loudly: text that does not look like a date yields
//! `None` and the caller picks the fallback.

use crate::date::CalendarDate;

/// Replaces Persian (`۰`–`۹`) and Arabic-Indic (`٠`–`٩`) digits with ASCII
/// digits. Every other character, and the empty string, passes through.
///
/// # Example
///
/// ```
/// use jalali_calendar::parse::normalize_digits;
///
/// assert_eq!("1392/01/01", normalize_digits("۱۳۹۲/۰۱/۰۱"));
/// assert_eq!("2024-03-20", normalize_digits("٢٠٢٤-03-٢٠"));
/// ```
pub fn normalize_digits(text: &str) -> String {
    text.chars().map(ascii_digit).collect()
}

fn ascii_digit(c: char) -> char {
    let zero = match c {
        '\u{06F0}'..='\u{06F9}' => 0x06F0,
        '\u{0660}'..='\u{0669}' => 0x0660,
        _ => return c,
    };
    char::from(b'0' + (c as u32 - zero) as u8)
}

/// Parses the first three `-` or `/` separated integers of `text` as
/// `(year, month, day)`.
///
/// Digits are normalized first and empty fields are skipped, so `"2024//3-1"`
/// parses like `"2024-3-1"`. Fields after the third are ignored. Returns
/// `None` if there are fewer than three fields or one of them is not an
/// integer.
///
/// # Example
///
/// ```
/// use jalali_calendar::CalendarDate;
/// use jalali_calendar::parse::parse_date_input;
///
/// assert_eq!(Some(CalendarDate::new(1392, 1, 1)), parse_date_input("۱۳۹۲/۰۱/۰۱"));
/// assert_eq!(None, parse_date_input("not-a-date"));
/// ```
pub fn parse_date_input(text: &str) -> Option<CalendarDate> {
    let text = normalize_digits(text).replace('/', "-");
    let mut fields = text
        .trim()
        .split('-')
        .map(str::trim)
        .filter(|tok| !tok.is_empty());
    let mut next = || fields.next()?.parse::<i32>().ok();
    Some(CalendarDate::new(next()?, next()?, next()?))
}

/// Splits date-time text at the first run of whitespace into a date portion
/// and the remainder, which is returned untouched (it may contain spaces of
/// its own). Digits are normalized and the whole text is trimmed first.
///
/// # Example
///
/// ```
/// use jalali_calendar::parse::split_datetime;
///
/// assert_eq!(
///     ("2013-03-21".to_owned(), "10:30:00".to_owned()),
///     split_datetime(" 2013-03-21   10:30:00 ")
/// );
/// assert_eq!(("1392-01-01".to_owned(), String::new()), split_datetime("1392-01-01"));
/// ```
pub fn split_datetime(text: &str) -> (String, String) {
    let text = normalize_digits(text);
    let text = text.trim();
    match text.split_once(char::is_whitespace) {
        Some((date, time)) => (date.to_owned(), time.trim_start().to_owned()),
        None => (text.to_owned(), String::new()),
    }
}
