//! Utilities for converting between dates in the Gregorian and Jalali (Solar
//! Hijri) calendars.
//!
//! Conversion goes through a calendar-independant [`Date`] (a day number), so
//! a round trip between the two calendars always returns the date it started
//! from. On top of that sit lenient parsing of typed dates (Persian and
//! Arabic-Indic digits included) and the text-to-text conversions a host
//! application wires into its date fields.
//!
//! # Examples
//!
//! Basic usage with [`Date`]:
//!
//! ```
//! use jalali_calendar::{CalendarDate, Date};
//!
//! let date = Date::from_gregorian(2013, 3, 21).unwrap();
//!
//! assert_eq!(CalendarDate::new(1392, 1, 1), date.jalali());
//! assert_eq!("2013-03-21", date.iso_gregorian());
//! ```
//!
//! Converting text:
//!
//! ```
//! use jalali_calendar::jalali::fmt::{from_jalali_input, to_jalali_datetime_display};
//!
//! assert_eq!("1392-01-01 10:30:00", to_jalali_datetime_display("2013-03-21 10:30:00"));
//! assert_eq!(Some("2013-03-21".to_owned()), from_jalali_input("۱۳۹۲/۰۱/۰۱"));
//! ```
//!
//! Everything in [`date`], [`parse`] and [`jalali`] is pure. Choosing which
//! calendar to show is handled by [`preference`] and [`control`], with the
//! storage left to the host.

pub mod boot;
pub mod config;
pub mod control;
pub mod date;
pub mod error;
pub mod jalali;
pub mod parse;
pub mod preference;

pub use date::{CalendarDate, CalendarSystem, Date, YearType};
pub use error::{Error, Result};
pub use jalali::fmt::{from_jalali_input, to_jalali_display};
pub use jalali::{gregorian_to_jalali, jalali_to_gregorian};
pub use parse::normalize_digits;
